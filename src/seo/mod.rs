//! SEO metadata consumed by the route renderer.
//!
//! - **meta**: per-route title/description/canonical lookup with home fallback
//! - **breadcrumb**: navigation path from the site root to a route
//! - **jsonld**: `BreadcrumbList` and site navigation structured data
//!
//! The renderer only sees the [`MetaProvider`] trait; [`SiteMeta`] is the
//! table-backed implementation built from `prerender.toml`.

mod breadcrumb;
pub mod jsonld;
mod meta;

pub use breadcrumb::Breadcrumb;
pub use jsonld::SiteNavigation;
pub use meta::{RouteMetadata, SiteMeta};

use crate::core::Route;

/// Metadata collaborator of the route renderer.
pub trait MetaProvider {
    /// Title, description, canonical URL, image and type for a route.
    fn route_meta(&self, route: &Route) -> RouteMetadata;

    /// Breadcrumb trail, always starting with the Home entry.
    fn breadcrumbs(&self, route: &Route) -> Vec<Breadcrumb>;

    /// Site navigation structured data, identical for every route.
    fn site_navigation(&self) -> &SiteNavigation;
}
