//! Breadcrumb trail types.

use serde::Serialize;

/// Label of the first crumb of every trail.
pub const HOME_NAME: &str = "Home";

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// The Home crumb for `origin`.
    pub fn home(origin: &str) -> Self {
        Self::new(HOME_NAME, format!("{}/", origin.trim_end_matches('/')))
    }
}

/// Label for a route without a configured name: last segment, dashes as
/// spaces, first letter upper-cased (`/schoonmaak-tips` → `Schoonmaak tips`).
pub fn humanize_segment(segment: &str) -> String {
    let spaced = segment.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
