//! `prerender finalize`: build the production template.

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::logger::AuditLog;
use crate::template::{self, FinalizeOutcome};

/// Run the finalizer, appending progress to the configured log file.
pub fn run(config: &SiteConfig) -> Result<FinalizeOutcome> {
    let audit = AuditLog::open(&config.paths.log)
        .with_context(|| format!("failed to open log file {}", config.paths.log.display()))?;
    let outcome = template::finalize(&config.paths, &audit)?;
    Ok(outcome)
}
