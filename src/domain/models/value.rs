//! Typed cache values and their wire encoding.
//!
//! Every value is stored as JSON text. Statuses are encoded as their
//! integer code, text artifacts as JSON strings.

use serde::{de::DeserializeOwned, Serialize};

use super::{ExecutionStatus, SubKey};
use crate::domain::errors::{CacheError, CacheResult};

/// A value stored under one sub-key, tagged with that sub-key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheValue {
    /// Value of [`SubKey::Status`]
    Status(ExecutionStatus),
    /// Value of [`SubKey::RunOutput`]
    RunOutput(String),
    /// Value of [`SubKey::CompileOutput`]
    CompileOutput(String),
    /// Value of [`SubKey::Graph`]
    Graph(String),
}

impl CacheValue {
    /// The sub-key this value is stored under.
    pub const fn sub_key(&self) -> SubKey {
        match self {
            Self::Status(_) => SubKey::Status,
            Self::RunOutput(_) => SubKey::RunOutput,
            Self::CompileOutput(_) => SubKey::CompileOutput,
            Self::Graph(_) => SubKey::Graph,
        }
    }

    /// Encode the payload for storage.
    pub fn encode(&self) -> CacheResult<String> {
        let sub_key = self.sub_key();
        match self {
            Self::Status(status) => to_wire(sub_key, status),
            Self::RunOutput(text) | Self::CompileOutput(text) | Self::Graph(text) => {
                to_wire(sub_key, text)
            }
        }
    }

    /// Decode a stored payload according to `sub_key`'s value type.
    pub fn decode(sub_key: SubKey, raw: &str) -> CacheResult<Self> {
        Ok(match sub_key {
            SubKey::Status => Self::Status(from_wire(sub_key, raw)?),
            SubKey::RunOutput => Self::RunOutput(from_wire(sub_key, raw)?),
            SubKey::CompileOutput => Self::CompileOutput(from_wire(sub_key, raw)?),
            SubKey::Graph => Self::Graph(from_wire(sub_key, raw)?),
        })
    }

    /// Text payload, if this is a text artifact.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Status(_) => None,
            Self::RunOutput(text) | Self::CompileOutput(text) | Self::Graph(text) => Some(text),
        }
    }

    /// Build a value for `sub_key` from human-entered text.
    ///
    /// Status values are parsed by name (`FINISHED`, `STATUS_FINISHED`) or code.
    pub fn from_input(sub_key: SubKey, input: &str) -> CacheResult<Self> {
        match sub_key {
            SubKey::Status => {
                let status = ExecutionStatus::from_str(input)
                    .or_else(|| input.trim().parse::<i32>().ok().and_then(ExecutionStatus::from_code))
                    .ok_or_else(|| CacheError::Deserialization {
                        sub_key,
                        reason: format!("'{input}' is not an execution status"),
                    })?;
                Ok(Self::Status(status))
            }
            SubKey::RunOutput => Ok(Self::RunOutput(input.to_string())),
            SubKey::CompileOutput => Ok(Self::CompileOutput(input.to_string())),
            SubKey::Graph => Ok(Self::Graph(input.to_string())),
        }
    }
}

fn to_wire<T: Serialize + ?Sized>(sub_key: SubKey, value: &T) -> CacheResult<String> {
    serde_json::to_string(value).map_err(|err| CacheError::Serialization {
        sub_key,
        reason: err.to_string(),
    })
}

fn from_wire<T: DeserializeOwned>(sub_key: SubKey, raw: &str) -> CacheResult<T> {
    serde_json::from_str(raw).map_err(|err| CacheError::Deserialization {
        sub_key,
        reason: err.to_string(),
    })
}
