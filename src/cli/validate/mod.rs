//! `prerender validate`: readiness checks over the rendered output.
//!
//! Routes come from the same sitemap the renderer used, so a page that was
//! never written shows up as a failure instead of being skipped.

mod checks;
mod report;

pub use checks::PageChecks;
pub use report::{ReadinessReport, ValidationResult};

use anyhow::{Result, bail};
use std::{fs, io, path::Path};

use crate::config::SiteConfig;
use crate::core::Route;
use crate::log;
use crate::render::load_routes;
use crate::utils::plural_count;

/// Check one route's output file.
pub fn validate_route(route: &Route, output: &Path, checks: &PageChecks) -> Vec<String> {
    let path = route.output_path(output);
    match fs::read_to_string(&path) {
        Ok(html) => checks.check(&html),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            vec![format!("file not found: {}", path.display())]
        }
        Err(err) => vec![format!("cannot read {}: {err}", path.display())],
    }
}

/// Check every route under `output`.
pub fn validate_routes(routes: &[Route], output: &Path, checks: &PageChecks) -> ReadinessReport {
    let mut report = ReadinessReport::default();
    for route in routes {
        report.push(route.clone(), validate_route(route, output, checks));
    }
    report
}

/// Run the validator stage; fails if any route fails a check.
pub fn run(config: &SiteConfig) -> Result<ReadinessReport> {
    let (_, routes) = load_routes(&config.paths.sitemaps)?;
    log!("validate"; "checking {}", plural_count(routes.len(), "route"));

    let checks = PageChecks::new(config.site.origin(), &config.validate.nav_paths);
    let report = validate_routes(&routes, &config.paths.output, &checks);

    report.print();
    log!("validate"; "{}", report);

    if !report.is_success() {
        bail!(
            "{} failed readiness checks",
            plural_count(report.failed(), "route")
        );
    }
    Ok(report)
}
