//! Route metadata lookup.
//!
//! A table keyed by normalized path plus one explicit default entry (the
//! home route). Unknown routes take the default's title, description, image
//! and type, but always keep their own canonical URL.

use rustc_hash::FxHashMap;

use super::breadcrumb::{Breadcrumb, humanize_segment};
use super::{MetaProvider, SiteNavigation};
use crate::config::{RouteEntry, SiteConfig};
use crate::core::Route;

const DEFAULT_TYPE: &str = "website";

/// SEO metadata of one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMetadata {
    pub title: String,
    pub description: String,
    pub canonical: String,
    /// Social preview image, empty when neither route nor site sets one.
    pub image: String,
    /// Open Graph type (`website`, `article`, ...).
    pub kind: String,
}

/// Table-backed [`MetaProvider`].
#[derive(Debug, Clone)]
pub struct SiteMeta {
    origin: String,
    default_image: Option<String>,
    table: FxHashMap<Route, RouteEntry>,
    default: RouteEntry,
    navigation: SiteNavigation,
}

impl SiteMeta {
    pub fn from_config(config: &SiteConfig) -> Self {
        let origin = config.site.origin().to_string();

        let table: FxHashMap<Route, RouteEntry> = config
            .routes
            .iter()
            .map(|entry| (Route::new(&entry.path), entry.clone()))
            .collect();

        // Explicit default: the home entry, or one synthesized from [site].
        let default = table.get(&Route::root()).cloned().unwrap_or_else(|| RouteEntry {
            path: "/".to_string(),
            title: config.site.name.clone(),
            description: config.site.description.clone(),
            ..RouteEntry::default()
        });

        let navigation = SiteNavigation::new(&origin, &config.site.nav);

        Self {
            origin,
            default_image: config.site.image.clone(),
            table,
            default,
            navigation,
        }
    }

    /// Configured entry for a route, if any.
    fn entry(&self, route: &Route) -> Option<&RouteEntry> {
        self.table.get(route)
    }
}

impl MetaProvider for SiteMeta {
    fn route_meta(&self, route: &Route) -> RouteMetadata {
        let entry = self.entry(route).unwrap_or(&self.default);

        RouteMetadata {
            title: entry.title.clone(),
            description: entry.description.clone(),
            canonical: route.absolute(&self.origin),
            image: entry
                .image
                .clone()
                .or_else(|| self.default_image.clone())
                .unwrap_or_default(),
            kind: entry
                .kind
                .clone()
                .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
        }
    }

    fn breadcrumbs(&self, route: &Route) -> Vec<Breadcrumb> {
        let home = Breadcrumb::home(&self.origin);
        if route.is_root() {
            return vec![home];
        }

        let name = match self.entry(route) {
            Some(entry) => entry.name.clone().unwrap_or_else(|| entry.title.clone()),
            None => route.segments().last().map(humanize_segment).unwrap_or_default(),
        };

        vec![home, Breadcrumb::new(name, route.absolute(&self.origin))]
    }

    fn site_navigation(&self) -> &SiteNavigation {
        &self.navigation
    }
}
