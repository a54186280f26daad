//! `[[routes]]` metadata table.
//!
//! One entry per route with custom SEO metadata. Routes without an entry
//! fall back to the home route's values.
//!
//! # Example
//!
//! ```toml
//! [[routes]]
//! path = "/over-ons"
//! title = "Over ons | Schoonmaak"
//! description = "Wie wij zijn"
//! name = "Over ons"             # breadcrumb label, defaults to title
//! image = "https://example.com/team.jpg"
//! type = "website"
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteEntry {
    pub path: String,
    pub title: String,
    pub description: String,
    pub name: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
