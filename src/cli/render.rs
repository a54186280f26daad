//! `prerender render`: write one static page per sitemap route.

use anyhow::{Result, bail};

use crate::config::SiteConfig;
use crate::log;
use crate::render::{self, RenderSummary};
use crate::utils::plural_count;

/// Render all routes; fails after the loop if any route failed.
pub fn run(config: &SiteConfig) -> Result<RenderSummary> {
    let summary = render::render_site(config)?;

    log!(
        "render"; "{} rendered, {} failed",
        plural_count(summary.succeeded(), "route"),
        summary.failures.len()
    );

    if !summary.is_success() {
        for failure in &summary.failures {
            eprintln!("  {} {}", failure.route, failure.reasons.join("\n      "));
        }
        bail!(
            "{} failed to render",
            plural_count(summary.failures.len(), "route")
        );
    }

    Ok(summary)
}
