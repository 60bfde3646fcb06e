//! Errors raised by entry store adapters.

use std::time::Duration;
use thiserror::Error;

/// Entry store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected the command or the transport failed
    #[error("{op} failed: {message}")]
    Command { op: &'static str, message: String },

    /// The per-operation deadline elapsed
    #[error("{op} timed out after {after:?}")]
    Timeout { op: &'static str, after: Duration },

    /// The store did not apply a TTL
    #[error("Store refused to set expiration on {key}")]
    ExpireRejected { key: String },
}

impl StoreError {
    /// Shorthand for [`StoreError::Command`].
    pub fn command(op: &'static str, message: impl Into<String>) -> Self {
        Self::Command {
            op,
            message: message.into(),
        }
    }
}

/// Result alias for entry store operations.
pub type StoreResult<T> = Result<T, StoreError>;
