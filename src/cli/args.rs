//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Prerender pipeline for a client-rendered single-page site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: prerender.toml, optional)
    #[arg(short = 'C', long, global = true, default_value = "prerender.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Splice built asset tags into the template
    #[command(visible_alias = "f")]
    Finalize,

    /// Render every sitemap route to static HTML
    #[command(visible_alias = "r")]
    Render,

    /// Check rendered pages against the SEO readiness rules
    #[command(visible_alias = "v")]
    Validate,

    /// Run finalize, render and validate in order
    #[command(visible_alias = "b")]
    Build,
}
