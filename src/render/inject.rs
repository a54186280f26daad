//! Per-route head and body injection into the production template.
//!
//! Substitution works on whole tags rather than fixed attribute layouts: a
//! `<meta>` is identified by its `name`/`property` wherever that attribute
//! sits, and only its `content` value is rewritten. Attributes may appear in
//! any order and wrap across lines. Every inserted value is HTML-escaped.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::seo::{Breadcrumb, RouteMetadata, SiteNavigation, jsonld};
use crate::utils::html::escape_attr;

/// Attribute-value pair proving the root mount holds server-rendered markup.
pub const SSR_MARKER: &str = r#"data-server-rendered="true""#;

const HEAD_CLOSE: &str = "</head>";

static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>.*?</title\s*>").unwrap());

/// Whole `<meta>` tag. Quoted values may contain `>`.
static RE_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap()
});

static RE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<link\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap()
});

/// `name="value"` or `name='value'` inside a tag.
static RE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z_:][-a-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static RE_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)(\bcontent\s*=\s*)(?:"[^"]*"|'[^']*')"#).unwrap()
});

static RE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)(\bhref\s*=\s*)(?:"[^"]*"|'[^']*')"#).unwrap());

/// Empty `<div id="root"></div>`, other attributes allowed around `id`.
/// Group 1 ends with the whitespace before `id`, so `data-id` never matches.
static RE_ROOT_MOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<div((?:[^>"']|"[^"]*"|'[^']*')*?\s)id\s*=\s*["']root["']((?:[^>"']|"[^"]*"|'[^']*')*)>\s*</div\s*>"#,
    )
    .unwrap()
});

/// Everything injected into one page.
pub struct PageParts<'a> {
    pub meta: &'a RouteMetadata,
    pub breadcrumbs: &'a [Breadcrumb],
    pub navigation: &'a SiteNavigation,
    pub fragment: &'a str,
}

/// Anchor the template lacks, if any.
pub fn missing_anchor(template: &str) -> Option<&'static str> {
    if !template.contains(HEAD_CLOSE) {
        Some("`</head>`")
    } else if !RE_ROOT_MOUNT.is_match(template) {
        Some(r#"an empty `<div id="root"></div>`"#)
    } else {
        None
    }
}

/// Render one page from the template.
///
/// Order: title, meta tags, canonical, JSON-LD before `</head>`, root mount.
pub fn inject_page(template: &str, parts: &PageParts<'_>) -> String {
    let meta = parts.meta;
    let html = replace_title(template, &meta.title);
    let html = replace_meta_contents(&html, meta);
    let html = replace_canonical(&html, &meta.canonical);
    let html = insert_structured_data(&html, parts.breadcrumbs, parts.navigation);
    mount_fragment(&html, parts.fragment)
}

fn replace_title(html: &str, title: &str) -> String {
    let title = escape_attr(title);
    RE_TITLE
        .replace(html, |_: &Captures| format!("<title>{title}</title>"))
        .into_owned()
}

/// Case-insensitive lookup of an attribute value inside a single tag.
fn attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    RE_ATTR.captures_iter(tag).find_map(|caps| {
        caps[1]
            .eq_ignore_ascii_case(name)
            .then(|| caps.get(2).or_else(|| caps.get(3)))
            .flatten()
            .map(|m| m.as_str())
    })
}

/// Value a `<meta>` keyed by `name`/`property` should carry, if it is one we own.
fn meta_value<'a>(key: &str, meta: &'a RouteMetadata) -> Option<&'a str> {
    let value = match key.to_ascii_lowercase().as_str() {
        "title" | "og:title" | "twitter:title" => &meta.title,
        "description" | "og:description" | "twitter:description" => &meta.description,
        "og:url" | "twitter:url" => &meta.canonical,
        "og:type" => &meta.kind,
        "og:image" | "twitter:image" if !meta.image.is_empty() => &meta.image,
        _ => return None,
    };
    Some(value.as_str())
}

fn replace_meta_contents(html: &str, meta: &RouteMetadata) -> String {
    RE_META
        .replace_all(html, |caps: &Captures| {
            let tag = &caps[0];
            let key = attr(tag, "name").or_else(|| attr(tag, "property"));
            match key.and_then(|key| meta_value(key, meta)) {
                Some(value) => replace_attr_value(&RE_CONTENT, tag, value),
                None => tag.to_string(),
            }
        })
        .into_owned()
}

fn replace_canonical(html: &str, canonical: &str) -> String {
    RE_LINK
        .replace_all(html, |caps: &Captures| {
            let tag = &caps[0];
            let is_canonical = attr(tag, "rel").is_some_and(|rel| rel.eq_ignore_ascii_case("canonical"));
            if is_canonical {
                replace_attr_value(&RE_HREF, tag, canonical)
            } else {
                tag.to_string()
            }
        })
        .into_owned()
}

/// Rewrite the value matched by `re` (prefix in group 1) with an escaped, double-quoted one.
fn replace_attr_value(re: &Regex, tag: &str, value: &str) -> String {
    let value = escape_attr(value);
    re.replace(tag, |caps: &Captures| format!("{}\"{}\"", &caps[1], value))
        .into_owned()
}

fn insert_structured_data(html: &str, breadcrumbs: &[Breadcrumb], nav: &SiteNavigation) -> String {
    let Some(anchor) = html.find(HEAD_CLOSE) else {
        return html.to_string();
    };

    let mut scripts = String::new();
    if !breadcrumbs.is_empty() {
        scripts.push_str(&jsonld::script_tag(&jsonld::breadcrumb_list(breadcrumbs)));
        scripts.push('\n');
    }
    scripts.push_str(&nav.script_tag());
    scripts.push('\n');

    let mut out = String::with_capacity(html.len() + scripts.len());
    out.push_str(&html[..anchor]);
    out.push_str(&scripts);
    out.push_str(&html[anchor..]);
    out
}

fn mount_fragment(html: &str, fragment: &str) -> String {
    RE_ROOT_MOUNT
        .replace(html, |caps: &Captures| {
            format!(
                r#"<div{}id="root"{} {SSR_MARKER}>{fragment}</div>"#,
                &caps[1], &caps[2]
            )
        })
        .into_owned()
}

// ============================================================================
// Tests
// ============================================================================
