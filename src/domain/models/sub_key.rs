//! Sub-keys: the fixed set of artifacts cached per pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{CacheError, CacheResult};

/// Kind of artifact stored under a pipeline entry.
///
/// Each variant has exactly one value type; see [`super::CacheValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubKey {
    /// Current [`super::ExecutionStatus`]
    Status,
    /// Program stdout
    RunOutput,
    /// Compiler output
    CompileOutput,
    /// Rendered execution graph
    Graph,
}

impl SubKey {
    /// Every sub-key, in display order.
    pub const ALL: [Self; 4] = [Self::Status, Self::RunOutput, Self::CompileOutput, Self::Graph];

    /// Wire name, e.g. `RUN_OUTPUT`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "STATUS",
            Self::RunOutput => "RUN_OUTPUT",
            Self::CompileOutput => "COMPILE_OUTPUT",
            Self::Graph => "GRAPH",
        }
    }

    /// Hash field name for this sub-key: its name encoded as a JSON string.
    pub fn wire_field(&self) -> String {
        format!("\"{}\"", self.as_str())
    }

    /// Parse a sub-key from user input or a stored field name.
    ///
    /// Accepts the wire name with or without JSON quotes, in any case, with
    /// `-` or `_` as separator.
    pub fn parse(s: &str) -> CacheResult<Self> {
        let trimmed = s.trim();
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(trimmed);
        let normalized = unquoted.to_uppercase().replace('-', "_");

        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| CacheError::UnknownSubKey(s.to_string()))
    }
}

impl fmt::Display for SubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubKey {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
