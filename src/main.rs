//! Prerender - static HTML pipeline for a client-rendered single-page site.
//!
//! Stages: finalize the production template, render every sitemap route
//! through the browser environment stand-ins, validate the output.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod env;
mod logger;
mod render;
mod seo;
mod template;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match cli.command {
        Commands::Finalize => cli::finalize::run(&config).map(|_| ()),
        Commands::Render => cli::render::run(&config).map(|_| ()),
        Commands::Validate => cli::validate::run(&config).map(|_| ()),
        Commands::Build => cli::build::run(&config),
    }
}
