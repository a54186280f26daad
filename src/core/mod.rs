//! Core types shared across the pipeline.

mod route;

pub use route::{INDEX_FILE, Route};
