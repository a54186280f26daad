//! Minimal document model for server rendering.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. A node's `parent` is a plain index back-reference; ownership
//! stays with the arena, so parent/child cycles never keep anything alive.
//!
//! Supported surface:
//! - element, namespaced element, text and comment creation
//! - `head`/`body` singletons, `getElementsByTagName`, simple `querySelector`
//! - attributes backed by a real per-element map
//! - append/insert/remove child, first/last child, child list
//! - style declaration, class-list stub, stylesheet stub, listener stubs
//! - HTML serialization (`outer_html`/`inner_html`)

use std::fmt::Write as _;

use super::EnvError;
use crate::utils::html::{escape, escape_attr, is_raw_text_element, is_void_element};

/// XHTML namespace, the default for `create_element`.
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
    Comment(String),
    /// Markup assigned through `innerHTML`, kept opaque and serialized verbatim.
    Markup(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Element-specific state.
#[derive(Debug, Clone)]
pub struct ElementData {
    tag: String,
    namespace: String,
    /// Insertion-ordered so serialization is deterministic.
    attributes: Vec<(String, String)>,
    style: StyleDeclaration,
    class_list: ClassList,
    sheet: Option<StyleSheet>,
}

impl ElementData {
    fn new(tag: String, namespace: String) -> Self {
        let sheet = (tag == "style").then(StyleSheet::default);
        Self {
            tag,
            namespace,
            attributes: Vec::new(),
            style: StyleDeclaration::default(),
            class_list: ClassList,
            sheet,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k == name)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(k, _)| k != name);
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }
}

// ============================================================================
// Style, class list and stylesheet stand-ins
// ============================================================================

/// Inline style declaration (`element.style`, `getComputedStyle`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    properties: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn set_property(&mut self, name: &str, value: &str) {
        match self.properties.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self
                .properties
                .push((name.to_string(), value.to_string())),
        }
    }

    /// Empty string for unset properties, like the browser.
    pub fn get_property_value(&self, name: &str) -> &str {
        self.properties
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn remove_property(&mut self, name: &str) {
        self.properties.retain(|(k, _)| k != name);
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// `color: red; margin: 0`
    pub fn css_text(&self) -> String {
        self.properties
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// `element.classList` stub: accepts calls, tracks nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassList;

impl ClassList {
    pub fn add(&self, _token: &str) {}
    pub fn remove(&self, _token: &str) {}
    pub fn toggle(&self, _token: &str) -> bool {
        false
    }
    pub fn contains(&self, _token: &str) -> bool {
        false
    }
}

/// `HTMLStyleElement.sheet` stub for CSS-in-JS "speedy" insertion.
///
/// Rules are kept so `cssRules` reads back what was inserted, but they are
/// never serialized: the browser does not reflect them into markup either.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: Vec<String>,
}

impl StyleSheet {
    /// Insert at `index` (clamped to the rule count) and return the position.
    pub fn insert_rule(&mut self, rule: &str, index: usize) -> usize {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule.to_string());
        index
    }

    pub fn delete_rule(&mut self, index: usize) {
        if index < self.rules.len() {
            self.rules.remove(index);
        }
    }

    pub fn css_rules(&self) -> &[String] {
        &self.rules
    }
}

// ============================================================================
// Document
// ============================================================================

/// Arena-backed document with `<html>`, `<head>` and `<body>` singletons.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Slots released by `discard`, reused before the arena grows.
    free: Vec<usize>,
    html: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            html: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
        };
        doc.html = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.attach(doc.html, doc.head);
        doc.attach(doc.html, doc.body);
        doc
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: None,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                NodeId(slot)
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Release a detached subtree so later nodes reuse its slots.
    ///
    /// Ids inside the subtree must not be used afterwards.
    pub fn discard(&mut self, id: NodeId) -> Result<(), EnvError> {
        if id == self.html || self.nodes[id.0].parent.is_some() {
            return Err(EnvError::Hierarchy("only detached nodes can be discarded"));
        }
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let node = &mut self.nodes[next.0];
            pending.append(&mut node.children);
            node.kind = NodeKind::Markup(String::new());
            self.free.push(next.0);
        }
        Ok(())
    }

    /// Arena slots in use, discarded ones excluded.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    // ------------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------------

    /// `document.createElement` (tag names are lower-cased).
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let data = ElementData::new(tag.to_ascii_lowercase(), HTML_NAMESPACE.to_string());
        self.push(NodeKind::Element(data))
    }

    /// `document.createElementNS` (qualified name kept verbatim, e.g. SVG `linearGradient`).
    pub fn create_element_ns(&mut self, namespace: &str, qualified_name: &str) -> NodeId {
        let data = ElementData::new(qualified_name.to_string(), namespace.to_string());
        self.push(NodeKind::Element(data))
    }

    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Comment(text.to_string()))
    }

    // ------------------------------------------------------------------------
    // Singletons and lookup
    // ------------------------------------------------------------------------

    pub fn document_element(&self) -> NodeId {
        self.html
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Connected elements with the given tag, in document order (`*` matches all).
    pub fn get_elements_by_tag_name(&self, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(self.html, &mut |id, node| {
            if let NodeKind::Element(el) = &node.kind
                && (tag == "*" || el.tag.eq_ignore_ascii_case(tag))
            {
                found.push(id);
            }
        });
        found
    }

    /// First element, in arena order, matching a simple selector.
    ///
    /// Supported forms: `tag`, `[attr]`, `[attr="value"]`, `tag[attr="value"]`.
    /// Detached elements are searched too, so a CSS-in-JS library can find
    /// the style element it created before inserting it.
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = SimpleSelector::parse(selector)?;
        self.nodes.iter().enumerate().find_map(|(i, node)| match &node.kind {
            NodeKind::Element(el) if selector.matches(el) => Some(NodeId(i)),
            _ => None,
        })
    }

    fn walk(&self, id: NodeId, f: &mut impl FnMut(NodeId, &Node)) {
        let node = &self.nodes[id.0];
        f(id, node);
        for &child in &node.children {
            self.walk(child, f);
        }
    }

    // ------------------------------------------------------------------------
    // Node access
    // ------------------------------------------------------------------------

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(ElementData::tag)
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attribute(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_attribute(name))
    }

    /// No-op on text and comment nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_attribute(name, value);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(el) = self.element_mut(id) {
            el.remove_attribute(name);
        }
    }

    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut StyleDeclaration> {
        self.element_mut(id).map(|el| &mut el.style)
    }

    pub fn class_list(&self, id: NodeId) -> Option<ClassList> {
        self.element(id).map(|el| el.class_list)
    }

    /// Stylesheet of a `<style>` element.
    pub fn sheet_mut(&mut self, id: NodeId) -> Option<&mut StyleSheet> {
        self.element_mut(id).and_then(|el| el.sheet.as_mut())
    }

    /// Accepts and drops the handler; nothing is ever dispatched.
    pub fn add_event_listener<F: FnMut()>(&mut self, _id: NodeId, _event: &str, _handler: F) {}

    pub fn remove_event_listener(&mut self, _id: NodeId, _event: &str) {}

    // ------------------------------------------------------------------------
    // Tree manipulation
    // ------------------------------------------------------------------------

    pub fn parent_node(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn child_nodes(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.last().copied()
    }

    /// True if `ancestor` is `id` or one of its parents.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }

    fn check_insertable(&self, parent: NodeId, child: NodeId) -> Result<(), EnvError> {
        if self.element(parent).is_none() {
            return Err(EnvError::Hierarchy("parent is not an element"));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(EnvError::Hierarchy("node would become its own ancestor"));
        }
        Ok(())
    }

    /// Remove `child` from its current parent, if any.
    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != child);
        }
    }

    /// `parent.appendChild(child)`; moves `child` if it is already attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, EnvError> {
        self.check_insertable(parent, child)?;
        self.detach(child);
        self.attach(parent, child);
        Ok(child)
    }

    /// `parent.insertBefore(child, reference)`; `None` appends.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<NodeId, EnvError> {
        let Some(reference) = reference else {
            return self.append_child(parent, child);
        };
        if self.nodes[reference.0].parent != Some(parent) {
            return Err(EnvError::NotFound);
        }
        self.check_insertable(parent, child)?;
        if child == reference {
            return Ok(child);
        }
        self.detach(child);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference)
            .ok_or(EnvError::NotFound)?;
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        Ok(child)
    }

    /// `parent.removeChild(child)`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, EnvError> {
        if self.nodes[child.0].parent != Some(parent) {
            return Err(EnvError::NotFound);
        }
        self.detach(child);
        Ok(child)
    }

    /// `node.textContent = text`: replaces all children with one text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        match &mut self.nodes[id.0].kind {
            NodeKind::Text(t) | NodeKind::Comment(t) | NodeKind::Markup(t) => {
                *t = text.to_string()
            }
            NodeKind::Element(_) => {
                for child in std::mem::take(&mut self.nodes[id.0].children) {
                    self.nodes[child.0].parent = None;
                }
                if !text.is_empty() {
                    let text = self.create_text_node(text);
                    self.attach(id, text);
                }
            }
        }
    }

    /// `element.innerHTML = html`: replaces all children with the markup.
    ///
    /// The markup is not parsed; it stays one opaque child until serialized.
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) {
        if self.element(id).is_none() {
            return;
        }
        for child in std::mem::take(&mut self.nodes[id.0].children) {
            self.nodes[child.0].parent = None;
        }
        let markup = self.push(NodeKind::Markup(html.to_string()));
        self.attach(id, markup);
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.walk(id, &mut |_, node| {
            if let NodeKind::Text(t) = &node.kind {
                out.push_str(t);
            }
        });
        out
    }

    // ------------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------------

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.serialize(id, false, &mut out);
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        let raw = self.element(id).is_some_and(|el| is_raw_text_element(&el.tag));
        for &child in &self.nodes[id.0].children {
            self.serialize(child, raw, &mut out);
        }
        out
    }

    fn serialize(&self, id: NodeId, raw_text: bool, out: &mut String) {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Text(t) if raw_text => out.push_str(t),
            NodeKind::Text(t) => out.push_str(&escape(t)),
            NodeKind::Comment(t) => {
                let _ = write!(out, "<!--{t}-->");
            }
            NodeKind::Markup(html) => out.push_str(html),
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attributes {
                    let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
                }
                if !el.style.is_empty() && !el.has_attribute("style") {
                    let _ = write!(out, " style=\"{}\"", escape_attr(&el.style.css_text()));
                }
                out.push('>');
                if is_void_element(&el.tag) {
                    return;
                }
                let raw = is_raw_text_element(&el.tag);
                for &child in &node.children {
                    self.serialize(child, raw, out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }
}

// ============================================================================
// Selector
// ============================================================================

/// `tag`, `[attr]`, `[attr=value]` or a tag with one attribute filter.
#[derive(Debug, PartialEq, Eq)]
struct SimpleSelector<'a> {
    tag: Option<&'a str>,
    attr: Option<(&'a str, Option<&'a str>)>,
}

impl<'a> SimpleSelector<'a> {
    fn parse(selector: &'a str) -> Option<Self> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }

        let (tag, rest) = match selector.find('[') {
            Some(pos) => (&selector[..pos], Some(&selector[pos..])),
            None => (selector, None),
        };
        let tag = (!tag.is_empty()).then_some(tag);

        let attr = match rest {
            None => None,
            Some(rest) => {
                let inner = rest.strip_prefix('[')?.strip_suffix(']')?;
                match inner.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim();
                        let value = value
                            .strip_prefix('"')
                            .and_then(|v| v.strip_suffix('"'))
                            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                            .unwrap_or(value);
                        Some((name.trim(), Some(value)))
                    }
                    None => Some((inner.trim(), None)),
                }
            }
        };

        Some(Self { tag, attr })
    }

    fn matches(&self, el: &ElementData) -> bool {
        if let Some(tag) = self.tag
            && !el.tag.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        match self.attr {
            None => true,
            Some((name, None)) => el.has_attribute(name),
            Some((name, Some(value))) => el.get_attribute(name) == Some(value),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let doc = Document::new();
        assert_eq!(doc.get_elements_by_tag_name("head"), vec![doc.head()]);
        assert_eq!(doc.get_elements_by_tag_name("BODY"), vec![doc.body()]);
        assert_eq!(doc.parent_node(doc.head()), Some(doc.document_element()));
    }

    #[test]
    fn test_attributes_read_back() {
        let mut doc = Document::new();
        let style = doc.create_element("style");
        doc.set_attribute(style, "data-emotion", "css");
        assert_eq!(doc.get_attribute(style, "data-emotion"), Some("css"));
        assert!(doc.has_attribute(style, "data-emotion"));

        doc.set_attribute(style, "data-emotion", "css app");
        assert_eq!(doc.get_attribute(style, "data-emotion"), Some("css app"));

        doc.remove_attribute(style, "data-emotion");
        assert!(!doc.has_attribute(style, "data-emotion"));
    }

    #[test]
    fn test_query_selector_finds_marker_element() {
        let mut doc = Document::new();
        assert!(doc.query_selector(r#"style[data-emotion="css"]"#).is_none());

        let style = doc.create_element("style");
        doc.set_attribute(style, "data-emotion", "css");
        // found before being attached
        assert_eq!(doc.query_selector(r#"style[data-emotion="css"]"#), Some(style));

        doc.append_child(doc.head(), style).unwrap();
        assert_eq!(doc.query_selector("[data-emotion]"), Some(style));
        assert_eq!(doc.query_selector("[data-emotion='css']"), Some(style));
        assert_eq!(doc.query_selector("style"), Some(style));
        assert!(doc.query_selector(r#"style[data-emotion="other"]"#).is_none());
    }

    #[test]
    fn test_append_moves_node_and_keeps_back_reference() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let p = doc.create_element("p");

        doc.append_child(a, p).unwrap();
        assert_eq!(doc.parent_node(p), Some(a));

        doc.append_child(b, p).unwrap();
        assert_eq!(doc.parent_node(p), Some(b));
        assert!(doc.child_nodes(a).is_empty());
        assert_eq!(doc.first_child(b), Some(p));
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();

        assert!(matches!(
            doc.append_child(inner, outer),
            Err(EnvError::Hierarchy(_))
        ));
        assert!(doc.append_child(outer, outer).is_err());

        let text = doc.create_text_node("x");
        assert!(doc.append_child(text, inner).is_err());
    }

    #[test]
    fn test_insert_before_and_remove() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        let first = doc.create_element("li");
        let last = doc.create_element("li");
        doc.append_child(list, last).unwrap();
        doc.insert_before(list, first, Some(last)).unwrap();

        assert_eq!(doc.first_child(list), Some(first));
        assert_eq!(doc.last_child(list), Some(last));

        doc.remove_child(list, first).unwrap();
        assert_eq!(doc.child_nodes(list), &[last]);
        assert_eq!(doc.parent_node(first), None);
        assert!(matches!(doc.remove_child(list, first), Err(EnvError::NotFound)));
    }

    #[test]
    fn test_serialization() {
        let mut doc = Document::new();
        let nav = doc.create_element("nav");
        let a = doc.create_element("a");
        doc.set_attribute(a, "href", "/contact");
        doc.set_attribute(a, "title", r#"Bel "ons""#);
        let text = doc.create_text_node("Contact & info");
        doc.append_child(a, text).unwrap();
        doc.append_child(nav, a).unwrap();
        let br = doc.create_element("br");
        doc.append_child(nav, br).unwrap();
        let comment = doc.create_comment("end");
        doc.append_child(nav, comment).unwrap();

        assert_eq!(
            doc.outer_html(nav),
            r#"<nav><a href="/contact" title="Bel &quot;ons&quot;">Contact &amp; info</a><br><!--end--></nav>"#
        );
        assert_eq!(doc.text_content(nav), "Contact & info");
    }

    #[test]
    fn test_style_element_keeps_raw_text_and_sheet() {
        let mut doc = Document::new();
        let style = doc.create_element("style");
        doc.set_text_content(style, ".a > .b { color: red }");
        assert_eq!(doc.outer_html(style), "<style>.a > .b { color: red }</style>");

        let sheet = doc.sheet_mut(style).unwrap();
        assert_eq!(sheet.insert_rule(".x{}", 10), 0);
        assert_eq!(sheet.insert_rule(".y{}", 0), 0);
        assert_eq!(sheet.css_rules(), &[".y{}".to_string(), ".x{}".to_string()]);
        sheet.delete_rule(5);
        sheet.delete_rule(0);
        assert_eq!(sheet.css_rules().len(), 1);
        // rules are not serialized
        assert!(!doc.outer_html(style).contains(".x"));
    }

    #[test]
    fn test_inline_style_and_stubs() {
        let mut doc = Document::new();
        let div = doc.create_element("DIV");
        assert_eq!(doc.tag_name(div), Some("div"));

        let style = doc.style_mut(div).unwrap();
        style.set_property("display", "none");
        assert_eq!(style.get_property_value("display"), "none");
        assert_eq!(style.get_property_value("color"), "");
        assert_eq!(doc.outer_html(div), r#"<div style="display: none"></div>"#);
        let style = doc.style_mut(div).unwrap();
        style.remove_property("display");
        assert!(style.is_empty());
        assert_eq!(doc.outer_html(div), "<div></div>");

        let classes = doc.class_list(div).unwrap();
        classes.add("open");
        assert!(!classes.contains("open"));
        assert!(!classes.toggle("open"));

        let mut clicks = 0;
        doc.add_event_listener(div, "click", || clicks += 1);
        doc.remove_event_listener(div, "click");
        assert_eq!(clicks, 0);
    }

    #[test]
    fn test_inner_html_is_serialized_verbatim() {
        let mut doc = Document::new();
        let main = doc.create_element("main");
        let old = doc.create_text_node("old");
        doc.append_child(main, old).unwrap();

        doc.set_inner_html(main, "<h1>Diensten &amp; prijzen</h1>");
        assert_eq!(doc.parent_node(old), None);
        assert_eq!(doc.outer_html(main), "<main><h1>Diensten &amp; prijzen</h1></main>");
        assert_eq!(doc.inner_html(main), "<h1>Diensten &amp; prijzen</h1>");
    }

    #[test]
    fn test_namespaced_element() {
        let mut doc = Document::new();
        let svg = doc.create_element_ns("http://www.w3.org/2000/svg", "linearGradient");
        let el = doc.element(svg).unwrap();
        assert_eq!(el.tag(), "linearGradient");
        assert_eq!(el.namespace(), "http://www.w3.org/2000/svg");
    }

    #[test]
    fn test_discard_recycles_detached_subtree() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = doc.create_element("div");
        let child = doc.create_element("p");
        doc.append_child(root, child).unwrap();
        doc.append_child(body, root).unwrap();
        let used = doc.node_count();

        assert_eq!(doc.discard(root), Err(EnvError::Hierarchy("only detached nodes can be discarded")));
        doc.remove_child(body, root).unwrap();
        doc.discard(root).unwrap();
        assert_eq!(doc.node_count(), used - 2);
        assert_eq!(doc.query_selector("p"), None);

        let again = doc.create_element("section");
        assert!(again == root || again == child);
        assert_eq!(doc.node_count(), used - 1);
        assert!(doc.discard(doc.document_element()).is_err());
    }
}
