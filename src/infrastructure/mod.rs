//! Infrastructure layer module
//!
//! Process-level concerns around the cache:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
