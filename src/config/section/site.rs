//! `[site]` section configuration.
//!
//! Site identity and the global navigation menu.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://example.com"
//! name = "Example Schoonmaak"
//! description = "Professionele schoonmaak voor huis en bedrijf"
//! language = "nl-NL"
//! image = "https://example.com/og-image.jpg"
//!
//! [[site.nav]]
//! name = "Home"
//! path = "/"
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Canonical origin used for canonical links, breadcrumbs and JSON-LD.
    pub url: String,

    /// Site name, also the fallback title when no home route is configured.
    pub name: String,

    /// Fallback description when no home route is configured.
    pub description: String,

    /// Language reported by `navigator.language` during rendering.
    pub language: String,

    /// Default social preview image.
    pub image: Option<String>,

    /// Global navigation menu, in display order.
    pub nav: Vec<NavItem>,
}

/// One entry of the global navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub name: String,
    pub path: String,
}

impl NavItem {
    fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            url: "https://example.com".to_string(),
            name: "Schoonmaak".to_string(),
            description: String::new(),
            language: "nl-NL".to_string(),
            image: None,
            nav: default_nav(),
        }
    }
}

fn default_nav() -> Vec<NavItem> {
    vec![
        NavItem::new("Home", "/"),
        NavItem::new("Diensten", "/diensten"),
        NavItem::new("Over ons", "/over-ons"),
        NavItem::new("Winkel", "/winkel"),
        NavItem::new("Contact", "/contact"),
    ]
}

impl SiteSectionConfig {
    /// Origin without trailing slash.
    pub fn origin(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.language, "nl-NL");
        assert_eq!(config.site.nav.len(), 5);
        assert_eq!(config.site.nav[0].path, "/");
    }

    #[test]
    fn test_site_custom_nav_replaces_default() {
        let config = test_parse_config(
            r#"[site]
url = "https://schoon.nl/"

[[site.nav]]
name = "Home"
path = "/"

[[site.nav]]
name = "Blog"
path = "/blog""#,
        );
        assert_eq!(config.site.origin(), "https://schoon.nl");
        assert_eq!(config.site.nav.len(), 2);
        assert_eq!(config.site.nav[1].name, "Blog");
    }
}
