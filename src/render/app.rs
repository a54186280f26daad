//! Application entry used by the renderer.
//!
//! [`ServerEntry`] is the seam to the UI: given a route and the installed
//! [`Environment`], return that route's markup. [`ShellApp`] is the shipped
//! implementation: it builds the site chrome (header navigation and footer)
//! through the environment's DOM and mounts the route's page markup from the
//! server bundle between them.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{fs, io, path::Path};

use super::RenderError;
use crate::config::{NavItem, SiteSectionConfig};
use crate::core::Route;
use crate::env::{Environment, NodeId};

/// Produces the server-rendered fragment of one route.
pub trait ServerEntry {
    fn render(&self, route: &Route, env: &mut Environment) -> Result<String>;
}

// ============================================================================
// Server bundle
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BundleFile {
    routes: FxHashMap<String, String>,
    fallback: Option<String>,
    settings: Map<String, Value>,
}

/// Page markup keyed by route, as emitted by the server build, plus the
/// site settings snapshot taken at build time.
///
/// ```json
/// {
///   "routes": { "/": "<h1>…</h1>", "/over-ons": "…" },
///   "fallback": "<h1>404</h1>",
///   "settings": { "announcement": "Gesloten op 27 april" }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ServerBundle {
    pages: FxHashMap<Route, String>,
    fallback: Option<String>,
    settings: Map<String, Value>,
}

impl ServerBundle {
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let json = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => RenderError::MissingBundle(path.to_path_buf()),
            _ => RenderError::Io {
                action: "read",
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::from_json(&json).map_err(|source| RenderError::InvalidBundle {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Keys are normalized, so `/over-ons/` and `/over-ons` are the same page.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let file: BundleFile = serde_json::from_str(json)?;
        let pages = file
            .routes
            .into_iter()
            .map(|(path, html)| (Route::new(&path), html))
            .collect();
        Ok(Self {
            pages,
            fallback: file.fallback,
            settings: file.settings,
        })
    }

    /// Markup for `route`, or the fallback page.
    pub fn page(&self, route: &Route) -> Option<&str> {
        self.pages
            .get(route)
            .or(self.fallback.as_ref())
            .map(String::as_str)
    }

    /// Build-time value of a site setting.
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

// ============================================================================
// Shell app
// ============================================================================

const STYLE_SELECTOR: &str = r#"style[data-emotion="css"]"#;
const CONSENT_KEY: &str = "cookie-consent";
const REDUCED_MOTION: &str = "(prefers-reduced-motion: reduce)";
const SETTINGS_ENDPOINT: &str = "/api/site-settings";

const BASE_RULES: [&str; 3] = [
    ".site-header{display:flex;justify-content:space-between}",
    ".site-nav a{padding:0 .75rem}",
    ".site-footer{margin-top:4rem}",
];

/// Site chrome around the page markup from a [`ServerBundle`].
pub struct ShellApp {
    bundle: ServerBundle,
    site_name: String,
    nav: Vec<NavItem>,
}

impl ShellApp {
    pub fn new(bundle: ServerBundle, site: &SiteSectionConfig) -> Self {
        Self {
            bundle,
            site_name: site.name.clone(),
            nav: site.nav.clone(),
        }
    }

    /// Find the injected style element, creating it on first use.
    fn ensure_styles(env: &mut Environment) -> Result<NodeId> {
        let doc = env.document()?;
        if let Some(style) = doc.query_selector(STYLE_SELECTOR) {
            return Ok(style);
        }

        let style = doc.create_element("style");
        doc.set_attribute(style, "data-emotion", "css");
        let head = doc.head();
        doc.append_child(head, style)?;

        if let Some(sheet) = doc.sheet_mut(style) {
            for rule in BASE_RULES {
                let end = sheet.css_rules().len();
                sheet.insert_rule(rule, end);
            }
        }

        // re-locate the way a CSS-in-JS cache does on its next insert
        doc.query_selector(STYLE_SELECTOR)
            .context("injected style element cannot be found again")
    }
}

impl ServerEntry for ShellApp {
    fn render(&self, route: &Route, env: &mut Environment) -> Result<String> {
        let page = self
            .bundle
            .page(route)
            .with_context(|| format!("server bundle has no page for {route} and no fallback"))?;

        Self::ensure_styles(env)?;
        let consent_given = env.local_storage()?.get_item(CONSENT_KEY).is_some();
        let reduced_motion = env.match_media(REDUCED_MOTION)?.matches;
        // live settings win over the build-time snapshot
        let live = env.fetch(SETTINGS_ENDPOINT)?.json();
        let announcement = live
            .get("announcement")
            .or_else(|| self.bundle.setting("announcement"))
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string);

        let doc = env.document()?;
        let body = doc.body();
        let root = doc.create_element("div");
        doc.append_child(body, root)?;

        // header with one anchor per navigation item
        let header = doc.create_element("header");
        doc.set_attribute(header, "class", "site-header");
        if reduced_motion {
            doc.set_attribute(header, "data-reduced-motion", "");
        }
        let brand = doc.create_element("a");
        doc.set_attribute(brand, "href", "/");
        doc.set_attribute(brand, "class", "brand");
        let brand_text = doc.create_text_node(&self.site_name);
        doc.append_child(brand, brand_text)?;
        doc.append_child(header, brand)?;

        let nav = doc.create_element("nav");
        doc.set_attribute(nav, "class", "site-nav");
        for item in &self.nav {
            let link = doc.create_element("a");
            let target = Route::new(&item.path);
            doc.set_attribute(link, "href", target.as_str());
            if &target == route {
                doc.set_attribute(link, "aria-current", "page");
            }
            let text = doc.create_text_node(&item.name);
            doc.append_child(link, text)?;
            doc.append_child(nav, link)?;
        }
        doc.append_child(header, nav)?;
        doc.append_child(root, header)?;

        if let Some(announcement) = announcement {
            let banner = doc.create_element("p");
            doc.set_attribute(banner, "class", "announcement");
            doc.set_text_content(banner, &announcement);
            doc.append_child(root, banner)?;
        }

        let main = doc.create_element("main");
        doc.set_inner_html(main, page);
        doc.append_child(root, main)?;

        let footer = doc.create_element("footer");
        doc.set_attribute(footer, "class", "site-footer");
        let small = doc.create_element("small");
        doc.set_text_content(small, &format!("© {}", self.site_name));
        doc.append_child(footer, small)?;
        if !consent_given {
            let banner = doc.create_element("div");
            doc.set_attribute(banner, "class", "cookie-consent");
            doc.set_attribute(banner, "role", "dialog");
            doc.append_child(footer, banner)?;
        }
        doc.append_child(root, footer)?;

        let html = doc.inner_html(root);
        doc.remove_child(body, root)?;
        doc.discard(root)?;
        Ok(html)
    }
}
