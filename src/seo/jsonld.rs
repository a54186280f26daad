//! Structured data (JSON-LD) blocks.
//!
//! Payloads are built as typed `serde` structs and serialized compactly,
//! so the validator can look for `"@type":"BreadcrumbList"` verbatim.

use serde::Serialize;

use super::Breadcrumb;
use crate::config::NavItem;
use crate::core::Route;
use crate::utils::html::escape_script_json;

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Wrap a JSON payload in a `<script type="application/ld+json">` tag.
pub fn script_tag(json: &str) -> String {
    format!(
        "<script type=\"application/ld+json\">{}</script>",
        escape_script_json(json)
    )
}

// ============================================================================
// BreadcrumbList
// ============================================================================

#[derive(Serialize)]
struct BreadcrumbList<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "itemListElement")]
    items: Vec<ListItem<'a>>,
}

#[derive(Serialize)]
struct ListItem<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    position: usize,
    name: &'a str,
    item: &'a str,
}

/// Serialize a breadcrumb trail as a `BreadcrumbList`.
pub fn breadcrumb_list(crumbs: &[Breadcrumb]) -> String {
    let list = BreadcrumbList {
        context: SCHEMA_CONTEXT,
        kind: "BreadcrumbList",
        items: crumbs
            .iter()
            .enumerate()
            .map(|(i, crumb)| ListItem {
                kind: "ListItem",
                position: i + 1,
                name: &crumb.name,
                item: &crumb.url,
            })
            .collect(),
    };
    // Serializing plain strings and integers cannot fail.
    serde_json::to_string(&list).unwrap_or_default()
}

// ============================================================================
// Site navigation
// ============================================================================

/// Global navigation menu as structured data.
///
/// Built once from `[[site.nav]]` and injected unchanged into every page.
#[derive(Debug, Clone)]
pub struct SiteNavigation {
    links: Vec<NavLink>,
    json: String,
}

/// A navigation entry with its absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub name: String,
    pub path: String,
    pub url: String,
}

#[derive(Serialize)]
struct NavigationList<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "itemListElement")]
    items: Vec<NavigationElement<'a>>,
}

#[derive(Serialize)]
struct NavigationElement<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    position: usize,
    name: &'a str,
    url: &'a str,
}

impl SiteNavigation {
    pub fn new(origin: &str, nav: &[NavItem]) -> Self {
        let links: Vec<NavLink> = nav
            .iter()
            .map(|item| {
                let route = Route::new(&item.path);
                NavLink {
                    name: item.name.clone(),
                    path: route.as_str().to_string(),
                    url: route.absolute(origin),
                }
            })
            .collect();

        let list = NavigationList {
            context: SCHEMA_CONTEXT,
            kind: "ItemList",
            items: links
                .iter()
                .enumerate()
                .map(|(i, link)| NavigationElement {
                    kind: "SiteNavigationElement",
                    position: i + 1,
                    name: &link.name,
                    url: &link.url,
                })
                .collect(),
        };
        let json = serde_json::to_string(&list).unwrap_or_default();

        Self { links, json }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Compact JSON payload.
    pub fn json(&self) -> &str {
        &self.json
    }

    /// Ready-to-inject script tag.
    pub fn script_tag(&self) -> String {
        script_tag(&self.json)
    }
}
