//! Route renderer.
//!
//! # Module Structure
//!
//! ```text
//! render/
//! ├── sitemap.rs   # <loc> parsing, sitemap location
//! ├── inject.rs    # title/meta/canonical/JSON-LD/root mount substitution
//! ├── app.rs       # ServerEntry, ServerBundle, ShellApp
//! └── mod.rs       # RenderError, per-route loop (this file)
//! ```
//!
//! Every prerequisite (sitemap, production template, server bundle) is
//! checked before the first route renders. Routes then render one at a time
//! against the same [`Environment`]. A failing route is recorded and the
//! loop moves on; the caller decides what a non-empty failure list means.

pub mod app;
mod inject;
mod sitemap;

pub use app::{ServerBundle, ServerEntry, ShellApp};
pub use inject::{PageParts, SSR_MARKER, inject_page, missing_anchor};
pub use sitemap::load_routes;

use anyhow::{Context, Result};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::core::Route;
use crate::env::{EnvOptions, Environment};
use crate::seo::{MetaProvider, SiteMeta};
use crate::utils::plural_count;
use crate::{debug, log};

/// Error-chain entries kept per failed route.
const FAILURE_DEPTH: usize = 2;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no sitemap found (tried {})", display_paths(.tried))]
    MissingSitemap { tried: Vec<PathBuf> },

    #[error("production template not found at {0} (run `prerender finalize` first)")]
    MissingTemplate(PathBuf),

    #[error("production template {path} has no {missing}")]
    InvalidTemplate { path: PathBuf, missing: &'static str },

    #[error("server bundle not found at {0}")]
    MissingBundle(PathBuf),

    #[error("server bundle {path} is not valid JSON")]
    InvalidBundle {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to {action} {path}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Results
// ============================================================================

/// A route that failed, with the leading entries of its error chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFailure {
    pub route: Route,
    pub reasons: Vec<String>,
}

#[derive(Debug, Default)]
pub struct RenderSummary {
    pub written: Vec<PathBuf>,
    pub failures: Vec<RouteFailure>,
}

impl RenderSummary {
    pub fn succeeded(&self) -> usize {
        self.written.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Shared inputs of every route render.
pub struct RenderContext<'a> {
    pub template: &'a str,
    pub output: &'a Path,
    pub entry: &'a dyn ServerEntry,
    pub meta: &'a dyn MetaProvider,
}

/// Render every route in order, continuing past failures.
pub fn render_routes(
    routes: &[Route],
    ctx: &RenderContext<'_>,
    env: &mut Environment,
) -> RenderSummary {
    let mut summary = RenderSummary::default();

    for route in routes {
        match render_route(route, ctx, env) {
            Ok(path) => {
                debug!("render"; "{} -> {}", route, path.display());
                summary.written.push(path);
            }
            Err(err) => {
                let reasons: Vec<String> = err
                    .chain()
                    .take(FAILURE_DEPTH)
                    .map(ToString::to_string)
                    .collect();
                log!("error"; "{}: {}", route, reasons.join(": "));
                summary.failures.push(RouteFailure {
                    route: route.clone(),
                    reasons,
                });
            }
        }
    }

    summary
}

fn render_route(route: &Route, ctx: &RenderContext<'_>, env: &mut Environment) -> Result<PathBuf> {
    env.navigate(route)?;
    let fragment = ctx
        .entry
        .render(route, env)
        .with_context(|| format!("failed to render {route}"))?;

    let meta = ctx.meta.route_meta(route);
    let breadcrumbs = ctx.meta.breadcrumbs(route);
    let html = inject_page(
        ctx.template,
        &PageParts {
            meta: &meta,
            breadcrumbs: &breadcrumbs,
            navigation: ctx.meta.site_navigation(),
            fragment: &fragment,
        },
    );

    let path = route.output_path(ctx.output);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

// ============================================================================
// Stage
// ============================================================================

/// Read the production template and check it has both injection anchors.
pub fn load_template(path: &Path) -> Result<String, RenderError> {
    let template = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => RenderError::MissingTemplate(path.to_path_buf()),
        _ => RenderError::Io {
            action: "read",
            path: path.to_path_buf(),
            source,
        },
    })?;
    if let Some(missing) = missing_anchor(&template) {
        return Err(RenderError::InvalidTemplate {
            path: path.to_path_buf(),
            missing,
        });
    }
    Ok(template)
}

/// Run the render stage: check prerequisites, install the environment,
/// render every sitemap route with [`ShellApp`] and [`SiteMeta`].
pub fn render_site(config: &SiteConfig) -> Result<RenderSummary> {
    let paths = &config.paths;

    let (sitemap, routes) = load_routes(&paths.sitemaps)?;
    log!(
        "render"; "{} from {}",
        plural_count(routes.len(), "route"),
        config.root_relative(&sitemap).display()
    );

    let template = load_template(&paths.production_template)?;
    let bundle = ServerBundle::load(&paths.server_bundle)?;
    debug!("render"; "server bundle has {}", plural_count(bundle.len(), "page"));

    let mut env = Environment::new();
    let installed = env.install(&EnvOptions {
        origin: config.site.origin().to_string(),
        language: config.site.language.clone(),
    });
    debug!("render"; "installed {} environment globals", installed);

    let app = ShellApp::new(bundle, &config.site);
    let meta = SiteMeta::from_config(config);
    let ctx = RenderContext {
        template: &template,
        output: &paths.output,
        entry: &app,
        meta: &meta,
    };

    let summary = render_routes(&routes, &ctx, &mut env);
    debug!("render"; "{} swallowed by fetch", plural_count(env.fetch_count(), "request"));
    Ok(summary)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::seo::Breadcrumb;
    use anyhow::bail;
    use tempfile::TempDir;

    const TEMPLATE: &str = r#"<html><head><title></title>
<meta name="description" content="" />
<link rel="canonical" href="" />
</head><body><div id="root"></div></body></html>"#;

    struct EchoEntry;

    impl ServerEntry for EchoEntry {
        fn render(&self, route: &Route, env: &mut Environment) -> Result<String> {
            if route.as_str() == "/kapot" {
                bail!("component threw");
            }
            let path = env.location()?.pathname().to_string();
            Ok(format!("<p>{path}</p>"))
        }
    }

    fn meta() -> SiteMeta {
        SiteMeta::from_config(&test_parse_config(
            r#"[[routes]]
path = "/"
title = "Home"
description = "Welkom""#,
        ))
    }

    fn installed_env() -> Environment {
        let mut env = Environment::new();
        env.install(&EnvOptions::default());
        env
    }

    #[test]
    fn test_render_routes_writes_one_file_per_route() {
        let tmp = TempDir::new().unwrap();
        let meta = meta();
        let ctx = RenderContext {
            template: TEMPLATE,
            output: tmp.path(),
            entry: &EchoEntry,
            meta: &meta,
        };
        let routes = [Route::root(), Route::new("/over-ons"), Route::new("/diensten/ramen")];
        let summary = render_routes(&routes, &ctx, &mut installed_env());

        assert!(summary.is_success());
        assert_eq!(summary.succeeded(), 3);
        assert!(tmp.path().join("index.html").is_file());
        assert!(tmp.path().join("over-ons/index.html").is_file());

        let nested = fs::read_to_string(tmp.path().join("diensten/ramen/index.html")).unwrap();
        // location followed the route
        assert!(nested.contains(r#"data-server-rendered="true"><p>/diensten/ramen</p></div>"#));
        assert!(nested.contains(r#"href="https://example.com/diensten/ramen""#));
    }

    #[test]
    fn test_failure_is_recorded_and_loop_continues() {
        let tmp = TempDir::new().unwrap();
        let meta = meta();
        let ctx = RenderContext {
            template: TEMPLATE,
            output: tmp.path(),
            entry: &EchoEntry,
            meta: &meta,
        };
        let routes = [Route::new("/kapot"), Route::new("/contact")];
        let summary = render_routes(&routes, &ctx, &mut installed_env());

        assert!(!summary.is_success());
        assert_eq!(summary.succeeded(), 1);
        assert_eq!(
            summary.failures,
            vec![RouteFailure {
                route: Route::new("/kapot"),
                reasons: vec![
                    "failed to render /kapot".to_string(),
                    "component threw".to_string(),
                ],
            }]
        );
        assert!(!tmp.path().join("kapot/index.html").exists());
        assert!(tmp.path().join("contact/index.html").is_file());
    }

    #[test]
    fn test_uninstalled_environment_fails_every_route() {
        let tmp = TempDir::new().unwrap();
        let meta = meta();
        let ctx = RenderContext {
            template: TEMPLATE,
            output: tmp.path(),
            entry: &EchoEntry,
            meta: &meta,
        };
        let summary = render_routes(&[Route::root()], &ctx, &mut Environment::new());
        assert_eq!(
            summary.failures[0].reasons,
            ["ReferenceError: location is not defined"]
        );
    }

    #[test]
    fn test_rerender_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let meta = meta();
        let ctx = RenderContext {
            template: TEMPLATE,
            output: tmp.path(),
            entry: &EchoEntry,
            meta: &meta,
        };
        let routes = [Route::root()];
        let mut env = installed_env();
        render_routes(&routes, &ctx, &mut env);
        let first = fs::read(tmp.path().join("index.html")).unwrap();
        render_routes(&routes, &ctx, &mut env);
        assert_eq!(fs::read(tmp.path().join("index.html")).unwrap(), first);
    }

    #[test]
    fn test_load_template_checks_anchors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("template.html");
        assert!(matches!(load_template(&path), Err(RenderError::MissingTemplate(_))));

        fs::write(&path, "<html><head></head><body></body></html>").unwrap();
        assert!(matches!(
            load_template(&path),
            Err(RenderError::InvalidTemplate { .. })
        ));

        fs::write(&path, TEMPLATE).unwrap();
        assert!(load_template(&path).is_ok());
    }

    #[test]
    fn test_missing_sitemap_message() {
        let err = RenderError::MissingSitemap {
            tried: vec![PathBuf::from("public/sitemap.xml"), PathBuf::from("dist/sitemap.xml")],
        };
        assert_eq!(
            err.to_string(),
            "no sitemap found (tried public/sitemap.xml, dist/sitemap.xml)"
        );
    }

    #[test]
    fn test_home_breadcrumb_only_on_root() {
        let crumbs = meta().breadcrumbs(&Route::root());
        assert_eq!(crumbs, vec![Breadcrumb::home("https://example.com")]);
    }
}
