//! Command-line interface for inspecting and editing cache entries.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use crate::domain::errors::CacheError;

/// Exit code when the requested entry or value is not cached.
pub const EXIT_NOT_FOUND: i32 = 2;

/// Print a command failure and terminate the process.
///
/// Cache misses exit with [`EXIT_NOT_FOUND`] so scripts can tell them apart
/// from store failures, which exit with 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let not_found = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<CacheError>())
        .any(CacheError::is_not_found);

    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
            "not_found": not_found,
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }

    std::process::exit(if not_found { EXIT_NOT_FOUND } else { 1 });
}
