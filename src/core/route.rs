//! Route path type.
//!
//! A route is a normalized URL path taken from the sitemap:
//! - Always starts with `/`
//! - No trailing slash, except the root route `/`
//! - Never carries scheme, host, query or fragment

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name written for every rendered route.
pub const INDEX_FILE: &str = "index.html";

/// Normalized route path (cheap to clone).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Route(Arc<str>);

impl Route {
    /// The root route `/`.
    pub fn root() -> Self {
        Self(Arc::from("/"))
    }

    /// Normalize a path: add the leading slash, strip the trailing one.
    ///
    /// # Examples
    /// ```ignore
    /// assert_eq!(Route::new("/over-ons/").as_str(), "/over-ons");
    /// assert_eq!(Route::new("contact").as_str(), "/contact");
    /// assert_eq!(Route::new("").as_str(), "/");
    /// ```
    pub fn new(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::root();
        }
        if trimmed.starts_with('/') {
            Self(Arc::from(trimmed))
        } else {
            Self(Arc::from(format!("/{trimmed}")))
        }
    }

    /// Parse an absolute URL (sitemap `<loc>`) into its route.
    ///
    /// Returns `None` for anything `url` refuses to parse.
    pub fn from_url(loc: &str) -> Option<Self> {
        let parsed = url::Url::parse(loc.trim()).ok()?;
        Some(Self::new(parsed.path()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        &*self.0 == "/"
    }

    /// Path segments, without empty pieces.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Static file location of this route under `output`.
    ///
    /// `/` maps to `output/index.html`, `/a/b` to `output/a/b/index.html`.
    pub fn output_path(&self, output: &Path) -> PathBuf {
        let mut path = output.to_path_buf();
        for segment in self.segments() {
            path.push(segment);
        }
        path.push(INDEX_FILE);
        path
    }

    /// Absolute URL of this route under `origin` (no trailing slash on `origin`).
    pub fn absolute(&self, origin: &str) -> String {
        let origin = origin.trim_end_matches('/');
        if self.is_root() {
            format!("{origin}/")
        } else {
            format!("{origin}{}", self.0)
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
