//! Compile-time typed sub-keys.
//!
//! Each marker pairs a [`SubKey`] with its value type, so
//! `cache.set::<artifact::Status>(id, ExecutionStatus::Finished)` is checked
//! by the compiler instead of failing on decode.

use super::{CacheValue, ExecutionStatus, SubKey};

/// A sub-key whose value type is known statically.
pub trait Artifact: Send + Sync + 'static {
    /// Value type stored under this sub-key.
    type Value: Send + Sync + 'static;

    /// The runtime sub-key.
    const SUB_KEY: SubKey;

    /// Tag a value with this sub-key.
    fn wrap(value: Self::Value) -> CacheValue;

    /// Extract the typed value, or hand the mismatched value back.
    fn extract(value: CacheValue) -> Result<Self::Value, CacheValue>;
}

/// Marker for [`SubKey::Status`].
#[derive(Debug, Clone, Copy)]
pub struct Status;

/// Marker for [`SubKey::RunOutput`].
#[derive(Debug, Clone, Copy)]
pub struct RunOutput;

/// Marker for [`SubKey::CompileOutput`].
#[derive(Debug, Clone, Copy)]
pub struct CompileOutput;

/// Marker for [`SubKey::Graph`].
#[derive(Debug, Clone, Copy)]
pub struct Graph;

impl Artifact for Status {
    type Value = ExecutionStatus;
    const SUB_KEY: SubKey = SubKey::Status;

    fn wrap(value: Self::Value) -> CacheValue {
        CacheValue::Status(value)
    }

    fn extract(value: CacheValue) -> Result<Self::Value, CacheValue> {
        match value {
            CacheValue::Status(status) => Ok(status),
            other => Err(other),
        }
    }
}

macro_rules! text_artifact {
    ($marker:ident) => {
        impl Artifact for $marker {
            type Value = String;
            const SUB_KEY: SubKey = SubKey::$marker;

            fn wrap(value: Self::Value) -> CacheValue {
                CacheValue::$marker(value)
            }

            fn extract(value: CacheValue) -> Result<Self::Value, CacheValue> {
                match value {
                    CacheValue::$marker(text) => Ok(text),
                    other => Err(other),
                }
            }
        }
    };
}

text_artifact!(RunOutput);
text_artifact!(CompileOutput);
text_artifact!(Graph);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_agree_with_value_tags() {
        assert_eq!(Status::wrap(ExecutionStatus::Finished).sub_key(), Status::SUB_KEY);
        assert_eq!(RunOutput::wrap(String::new()).sub_key(), RunOutput::SUB_KEY);
        assert_eq!(CompileOutput::wrap(String::new()).sub_key(), CompileOutput::SUB_KEY);
        assert_eq!(Graph::wrap(String::new()).sub_key(), Graph::SUB_KEY);
    }

    #[test]
    fn test_extract_rejects_other_variant() {
        let value = CacheValue::Graph("g".to_string());
        assert_eq!(RunOutput::extract(value.clone()), Err(value.clone()));
        assert_eq!(Graph::extract(value), Ok("g".to_string()));
    }
}
