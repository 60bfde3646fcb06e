//! Domain layer for the pipeline cache
//!
//! This module contains the cache's data model, error taxonomy, and ports.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{CacheError, CacheResult};
