//! Site configuration management for `prerender.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── site       # [site]
//! │   ├── paths      # [paths]
//! │   ├── routes     # [[routes]]
//! │   └── validate   # [validate]
//! ├── error.rs       # ConfigError, ConfigDiagnostics
//! ├── util.rs        # config file discovery
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The file is optional: without one, defaults describe the conventional
//! layout (`template.html` at the root, bundler output in `dist/`).

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{NavItem, PathsConfig, RouteEntry, SiteSectionConfig, ValidateConfig};

use util::find_config_file;

use crate::{cli::Cli, debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing prerender.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site identity and navigation
    pub site: SiteSectionConfig,

    /// Stage inputs and outputs
    pub paths: PathsConfig,

    /// Per-route metadata table
    pub routes: Vec<RouteEntry>,

    /// Readiness check settings
    pub validate: ValidateConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root is
    /// the config file's parent directory, or cwd when no file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.finalize();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve paths against the project root.
    fn finalize(&mut self) {
        let root = self.root.clone();
        self.paths.normalize(&root);
    }

    /// Validate loaded values, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        match url::Url::parse(&self.site.url) {
            Ok(url) if url.cannot_be_a_base() => {
                diag.error("site.url", "must be an absolute http(s) origin");
            }
            Ok(_) => {}
            Err(_) => diag.error_with_hint(
                "site.url",
                format!("`{}` is not an absolute URL", self.site.url),
                "use a full origin such as `https://example.com`",
            ),
        }

        for (i, item) in self.site.nav.iter().enumerate() {
            if !item.path.starts_with('/') {
                diag.error(format!("site.nav[{i}].path"), "must start with `/`");
            }
        }

        for (i, entry) in self.routes.iter().enumerate() {
            if !entry.path.starts_with('/') {
                diag.error(format!("routes[{i}].path"), "must start with `/`");
            }
        }

        for (i, path) in self.validate.nav_paths.iter().enumerate() {
            if !path.starts_with('/') {
                diag.error(format!("validate.nav_paths[{i}]"), "must start with `/`");
            }
        }

        if self.paths.sitemaps.is_empty() {
            diag.error("paths.sitemaps", "at least one sitemap location is required");
        }

        diag.into_result()
    }

    /// Get path relative to the project root (for display)
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }
}

/// Parse a config string rooted at `/site` (test helper).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let mut config = SiteConfig::from_str(content).unwrap();
    config.root = PathBuf::from("/site");
    config.finalize();
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = test_parse_config("");
        assert!(config.routes.is_empty());
        assert_eq!(config.paths.output, Path::new("/site/dist"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_field_detected() {
        let content = "[site]\nname = \"Test\"\n[paths]\nunknown = \"field\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.iter().any(|f| f.contains("unknown")));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(SiteConfig::from_str("[site\nname=").is_err());
    }

    #[test]
    fn test_validate_reports_all_problems() {
        let config = test_parse_config(
            r#"[site]
url = "example.com"

[[routes]]
path = "over-ons"
title = "Over ons"
description = ""

[validate]
nav_paths = ["contact"]"#,
        );
        match config.validate() {
            Err(ConfigError::Diagnostics(diag)) => {
                assert_eq!(diag.len(), 3);
                let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, ["site.url", "routes[0].path", "validate.nav_paths[0]"]);
            }
            other => panic!("expected diagnostics, got {other:?}"),
        }
    }

    #[test]
    fn test_root_relative() {
        let config = test_parse_config("");
        assert_eq!(
            config.root_relative(&config.paths.output),
            Path::new("dist")
        );
    }
}
