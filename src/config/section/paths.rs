//! `[paths]` section configuration.
//!
//! Every file the three stages read or write. Relative paths are resolved
//! against the project root (the directory holding `prerender.toml`).
//!
//! # Example
//!
//! ```toml
//! [paths]
//! built_html = "dist/index.html"
//! template = "template.html"
//! production_template = "dist/.prerender/template.html"
//! output = "dist"
//! sitemaps = ["public/sitemap.xml", "dist/sitemap.xml"]
//! server_bundle = "dist/server/entry-server.json"
//! log = "prerender.log"
//! assets_prefix = "/assets/"
//! dev_entry = '<script type="module" src="/src/main.tsx"></script>'
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// HTML produced by the bundler, source of the asset tags.
    pub built_html: PathBuf,

    /// Hand-authored HTML template carrying the SEO tags.
    pub template: PathBuf,

    /// Finalized template shared by every rendered route.
    pub production_template: PathBuf,

    /// Root directory of the rendered pages.
    pub output: PathBuf,

    /// Sitemap candidates, first existing wins.
    pub sitemaps: Vec<PathBuf>,

    /// Server-render bundle consumed by the app entry.
    pub server_bundle: PathBuf,

    /// Append-only finalizer log.
    pub log: PathBuf,

    /// URL prefix of bundler-generated assets.
    pub assets_prefix: String,

    /// Development bootstrap tag removed from the template.
    pub dev_entry: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            built_html: "dist/index.html".into(),
            template: "template.html".into(),
            production_template: "dist/.prerender/template.html".into(),
            output: "dist".into(),
            sitemaps: vec!["public/sitemap.xml".into(), "dist/sitemap.xml".into()],
            server_bundle: "dist/server/entry-server.json".into(),
            log: "prerender.log".into(),
            assets_prefix: "/assets/".to_string(),
            dev_entry: r#"<script type="module" src="/src/main.tsx"></script>"#.to_string(),
        }
    }
}

impl PathsConfig {
    /// Resolve every relative path against `root`.
    pub fn normalize(&mut self, root: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = root.join(&*p);
            }
        };
        join(&mut self.built_html);
        join(&mut self.template);
        join(&mut self.production_template);
        join(&mut self.output);
        join(&mut self.server_bundle);
        join(&mut self.log);
        self.sitemaps.iter_mut().for_each(join);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_joins_relative_paths() {
        let mut paths = PathsConfig::default();
        paths.log = PathBuf::from("/var/log/prerender.log");
        paths.normalize(Path::new("/site"));

        assert_eq!(paths.built_html, Path::new("/site/dist/index.html"));
        assert_eq!(paths.output, Path::new("/site/dist"));
        assert_eq!(paths.sitemaps[0], Path::new("/site/public/sitemap.xml"));
        assert_eq!(paths.sitemaps[1], Path::new("/site/dist/sitemap.xml"));
        // absolute paths are kept
        assert_eq!(paths.log, Path::new("/var/log/prerender.log"));
    }
}
