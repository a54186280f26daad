//! Template finalizer.
//!
//! Splices the bundler's asset tags into the hand-authored template and
//! drops the development bootstrap script, producing the production
//! template every route is rendered from.
//!
//! ```text
//! dist/index.html ──extract──► <link>… <script>…
//!                                    │
//! template.html ──strip dev entry──► insert before </head> ──► production template
//! ```
//!
//! Progress and failures go to the [`AuditLog`] as well as the console.

mod assets;

pub use assets::{AssetKind, AssetTag, extract_asset_tags};

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::config::PathsConfig;
use crate::logger::AuditLog;
use crate::utils::plural_count;

const HEAD_CLOSE: &str = "</head>";

#[derive(Debug, Error)]
pub enum FinalizeError {
    #[error("built HTML not found at {0} (run the bundler first)")]
    MissingBuiltHtml(PathBuf),

    #[error("template not found at {0}")]
    MissingTemplate(PathBuf),

    #[error("template {0} has no `</head>` to insert assets before")]
    MissingHeadAnchor(PathBuf),

    #[error("failed to {action} {path}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What a finalize run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeOutcome {
    pub output: PathBuf,
    pub stylesheets: usize,
    pub scripts: usize,
    pub removed_dev_entry: bool,
}

/// Splice `tags` before `</head>` and remove `dev_entry`.
///
/// Returns `None` when the template has no `</head>`.
pub fn finalize_template(template: &str, tags: &[AssetTag], dev_entry: &str) -> Option<String> {
    let stripped = if dev_entry.is_empty() {
        template.to_string()
    } else {
        template.replace(dev_entry, "")
    };

    let anchor = stripped.find(HEAD_CLOSE)?;
    let mut out = String::with_capacity(stripped.len() + tags.len() * 96);
    out.push_str(&stripped[..anchor]);
    for tag in tags {
        out.push_str(&tag.html);
        out.push('\n');
    }
    out.push_str(&stripped[anchor..]);
    Some(out)
}

/// Run the finalizer stage, recording every step in `audit`.
pub fn finalize(paths: &PathsConfig, audit: &AuditLog) -> Result<FinalizeOutcome, FinalizeError> {
    let result = finalize_inner(paths, audit);
    if let Err(err) = &result {
        audit.record("error", &err.to_string());
    }
    result
}

fn finalize_inner(paths: &PathsConfig, audit: &AuditLog) -> Result<FinalizeOutcome, FinalizeError> {
    audit.record("finalize", &format!("reading {}", paths.built_html.display()));
    let built = read_required(&paths.built_html, FinalizeError::MissingBuiltHtml)?;

    let tags = extract_asset_tags(&built, &paths.assets_prefix);
    let stylesheets = tags.iter().filter(|t| t.kind == AssetKind::Stylesheet).count();
    let scripts = tags.len() - stylesheets;
    audit.record(
        "finalize",
        &format!(
            "found {} and {}",
            plural_count(stylesheets, "stylesheet"),
            plural_count(scripts, "script")
        ),
    );

    let template = read_required(&paths.template, FinalizeError::MissingTemplate)?;
    let removed_dev_entry = !paths.dev_entry.is_empty() && template.contains(&paths.dev_entry);

    let output = finalize_template(&template, &tags, &paths.dev_entry)
        .ok_or_else(|| FinalizeError::MissingHeadAnchor(paths.template.clone()))?;
    if removed_dev_entry {
        audit.record("finalize", "removed development entry script");
    }

    write_output(&paths.production_template, &output)?;
    audit.record(
        "finalize",
        &format!("wrote {}", paths.production_template.display()),
    );

    Ok(FinalizeOutcome {
        output: paths.production_template.clone(),
        stylesheets,
        scripts,
        removed_dev_entry,
    })
}

fn read_required(path: &Path, missing: fn(PathBuf) -> FinalizeError) -> Result<String, FinalizeError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => missing(path.to_path_buf()),
        _ => FinalizeError::Io {
            action: "read",
            path: path.to_path_buf(),
            source,
        },
    })
}

fn write_output(path: &Path, content: &str) -> Result<(), FinalizeError> {
    let io_err = |action: &'static str, source: io::Error| FinalizeError::Io {
        action,
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err("create", e))?;
    }
    fs::write(path, content).map_err(|e| io_err("write", e))
}

// ============================================================================
// Tests
// ============================================================================
