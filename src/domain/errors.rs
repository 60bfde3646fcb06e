//! Domain errors for the pipeline cache.

use thiserror::Error;

use super::models::{PipelineId, SubKey};
use super::ports::StoreError;

/// Errors surfaced by cache operations.
///
/// Nothing is retried or defaulted internally; callers decide how to react.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The store could not be reached or did not answer the liveness probe
    #[error("Cannot reach entry store at {address}: {reason}")]
    Connection { address: String, reason: String },

    /// A store command failed
    #[error("Entry store error: {0}")]
    Store(#[from] StoreError),

    /// The pipeline has no entry
    #[error("No cache entry for pipeline {0}")]
    EntryNotFound(PipelineId),

    /// The entry or field is absent
    #[error("No {sub_key} value cached for pipeline {pipeline_id}")]
    ValueNotFound { pipeline_id: PipelineId, sub_key: SubKey },

    /// A stored payload does not match its sub-key's type
    #[error("Cannot decode {sub_key} value: {reason}")]
    Deserialization { sub_key: SubKey, reason: String },

    /// A value could not be serialized
    #[error("Cannot encode {sub_key} value: {reason}")]
    Serialization { sub_key: SubKey, reason: String },

    /// Text did not name a sub-key
    #[error("Unknown sub-key: {0}")]
    UnknownSubKey(String),

    /// A typed read received another sub-key's value
    #[error("Expected a {expected} value but got {found}")]
    ValueMismatch { expected: SubKey, found: SubKey },
}

impl CacheError {
    /// Whether the entry or value simply is not cached.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::EntryNotFound(_) | Self::ValueNotFound { .. })
    }

    /// Whether a store call ran out of time.
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Store(StoreError::Timeout { .. }))
    }
}

/// Result alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_not_found_classification() {
        let id = PipelineId::new();
        assert!(CacheError::EntryNotFound(id).is_not_found());
        assert!(CacheError::ValueNotFound { pipeline_id: id, sub_key: SubKey::Graph }.is_not_found());
        assert!(!CacheError::UnknownSubKey("x".to_string()).is_not_found());
    }

    #[test]
    fn test_timeout_classification() {
        let err: CacheError = StoreError::Timeout {
            op: "HGET",
            after: Duration::from_millis(10),
        }
        .into();
        assert!(err.is_timeout());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_messages_name_the_pipeline() {
        let id = PipelineId::new();
        let msg = CacheError::ValueNotFound { pipeline_id: id, sub_key: SubKey::RunOutput }.to_string();
        assert!(msg.contains("RUN_OUTPUT"));
        assert!(msg.contains(&id.to_string()));
    }
}
