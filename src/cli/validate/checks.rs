//! The four readiness rules applied to each rendered page.

use regex::Regex;
use std::sync::LazyLock;

use crate::core::Route;
use crate::render::SSR_MARKER;

static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").unwrap());

/// `"@type":"BreadcrumbList"` in compact or spaced form.
static RE_BREADCRUMB_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""@type"\s*:\s*"BreadcrumbList""#).unwrap());

/// Rules shared by every page of one site.
#[derive(Debug, Clone)]
pub struct PageChecks {
    origin: String,
    nav_paths: Vec<Route>,
}

impl PageChecks {
    pub fn new(origin: &str, nav_paths: &[String]) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            nav_paths: nav_paths.iter().map(|p| Route::new(p)).collect(),
        }
    }

    /// Every violated rule, in rule order. Empty means the page is ready.
    pub fn check(&self, html: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if !has_title(html) {
            errors.push("missing or empty <title>".to_string());
        }
        if !RE_BREADCRUMB_LIST.is_match(html) {
            errors.push("missing BreadcrumbList structured data".to_string());
        }
        if !html.contains(SSR_MARKER) {
            errors.push(format!("missing server-rendered marker ({SSR_MARKER})"));
        }

        let missing: Vec<&str> = self
            .nav_paths
            .iter()
            .filter(|path| !self.links_to(html, path))
            .map(Route::as_str)
            .collect();
        if !missing.is_empty() {
            errors.push(format!("missing navigation links: {}", missing.join(", ")));
        }

        errors
    }

    /// Raw-text search for any accepted href form of `path`.
    fn links_to(&self, html: &str, path: &Route) -> bool {
        let mut forms = vec![format!(r#"href="{path}""#)];
        if !path.is_root() {
            forms.push(format!(r#"href="{path}/""#));
        }
        forms.push(format!(r#"href="{}""#, path.absolute(&self.origin)));
        forms.iter().any(|form| html.contains(form.as_str()))
    }
}

fn has_title(html: &str) -> bool {
    RE_TITLE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .is_some_and(|m| !m.as_str().trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAV: [&str; 5] = ["/", "/diensten", "/over-ons", "/contact", "/winkel"];

    fn checks() -> PageChecks {
        let nav: Vec<String> = NAV.iter().map(|s| s.to_string()).collect();
        PageChecks::new("https://example.com", &nav)
    }

    fn page(title: &str, jsonld: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{href}">x</a>"#))
            .collect();
        format!(
            r#"<html><head><title>{title}</title>
<script type="application/ld+json">{jsonld}</script></head>
<body><div id="root" data-server-rendered="true">{anchors}</div></body></html>"#
        )
    }

    const CRUMBS: &str = r#"{"@type":"BreadcrumbList"}"#;

    #[test]
    fn test_ready_page() {
        let html = page("Schoon", CRUMBS, &NAV);
        assert!(checks().check(&html).is_empty());
    }

    #[test]
    fn test_missing_two_nav_links() {
        let html = page("Schoon", CRUMBS, &["/", "/diensten", "/over-ons"]);
        assert_eq!(
            checks().check(&html),
            ["missing navigation links: /contact, /winkel"]
        );
    }

    #[test]
    fn test_alternative_link_forms() {
        let html = page(
            "Schoon",
            CRUMBS,
            &[
                "https://example.com/",
                "/diensten/",
                "https://example.com/over-ons",
                "/contact",
                "/winkel/",
            ],
        );
        assert!(checks().check(&html).is_empty());
    }

    #[test]
    fn test_blank_title() {
        let html = page("  \n ", CRUMBS, &NAV);
        assert_eq!(checks().check(&html), ["missing or empty <title>"]);
    }

    #[test]
    fn test_spaced_breadcrumb_json_accepted() {
        let html = page("Schoon", r#"{ "@type": "BreadcrumbList" }"#, &NAV);
        assert!(checks().check(&html).is_empty());

        let html = page("Schoon", r#"{"@type":"ItemList"}"#, &NAV);
        assert_eq!(checks().check(&html), ["missing BreadcrumbList structured data"]);
    }

    #[test]
    fn test_missing_marker() {
        let html = page("Schoon", CRUMBS, &NAV).replace(SSR_MARKER, "");
        assert_eq!(checks().check(&html).len(), 1);
    }
}
