//! Command-line interface module.
//!
//! One module per pipeline stage plus the `build` orchestrator. Every stage
//! entry returns `anyhow::Result`, so any failure surfaces as exit status 1.

mod args;
pub mod build;
pub mod finalize;
pub mod render;
pub mod validate;

pub use args::{Cli, Commands};
