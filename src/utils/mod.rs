//! Utility modules shared across the pipeline stages.

pub mod date;
pub mod html;
mod plural;

pub use plural::plural_count;
