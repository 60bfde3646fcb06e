//! Execution status of a pipeline.
//!
//! Statuses travel over the wire as their integer code, so the numbering
//! below is part of the stored format and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status reported by the execution pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ExecutionStatus {
    /// No status reported yet
    #[default]
    Unspecified,
    /// Source is being validated
    Validating,
    /// Validation failed
    ValidationError,
    /// Source is being prepared
    Preparing,
    /// Preparation failed
    PreparationError,
    /// Compilation in progress
    Compiling,
    /// Compilation failed
    CompileError,
    /// Program is running
    Executing,
    /// Run completed successfully
    Finished,
    /// Program exited with an error
    RunError,
    /// Internal failure
    Error,
    /// Run exceeded its time limit
    RunTimeout,
    /// Canceled by the user
    Canceled,
}

impl ExecutionStatus {
    /// Every status, in code order.
    pub const ALL: [Self; 13] = [
        Self::Unspecified,
        Self::Validating,
        Self::ValidationError,
        Self::Preparing,
        Self::PreparationError,
        Self::Compiling,
        Self::CompileError,
        Self::Executing,
        Self::Finished,
        Self::RunError,
        Self::Error,
        Self::RunTimeout,
        Self::Canceled,
    ];

    /// Stable wire code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Unspecified => 0,
            Self::Validating => 1,
            Self::ValidationError => 2,
            Self::Preparing => 3,
            Self::PreparationError => 4,
            Self::Compiling => 5,
            Self::CompileError => 6,
            Self::Executing => 7,
            Self::Finished => 8,
            Self::RunError => 9,
            Self::Error => 10,
            Self::RunTimeout => 11,
            Self::Canceled => 12,
        }
    }

    /// Look up a status by its wire code.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Unspecified),
            1 => Some(Self::Validating),
            2 => Some(Self::ValidationError),
            3 => Some(Self::Preparing),
            4 => Some(Self::PreparationError),
            5 => Some(Self::Compiling),
            6 => Some(Self::CompileError),
            7 => Some(Self::Executing),
            8 => Some(Self::Finished),
            9 => Some(Self::RunError),
            10 => Some(Self::Error),
            11 => Some(Self::RunTimeout),
            12 => Some(Self::Canceled),
            _ => None,
        }
    }

    /// Status name as the execution API spells it, e.g. `STATUS_FINISHED`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "STATUS_UNSPECIFIED",
            Self::Validating => "STATUS_VALIDATING",
            Self::ValidationError => "STATUS_VALIDATION_ERROR",
            Self::Preparing => "STATUS_PREPARING",
            Self::PreparationError => "STATUS_PREPARATION_ERROR",
            Self::Compiling => "STATUS_COMPILING",
            Self::CompileError => "STATUS_COMPILE_ERROR",
            Self::Executing => "STATUS_EXECUTING",
            Self::Finished => "STATUS_FINISHED",
            Self::RunError => "STATUS_RUN_ERROR",
            Self::Error => "STATUS_ERROR",
            Self::RunTimeout => "STATUS_RUN_TIMEOUT",
            Self::Canceled => "STATUS_CANCELED",
        }
    }

    /// Parse a status name. The `STATUS_` prefix is optional and case is ignored.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase().replace('-', "_");
        let name = upper.strip_prefix("STATUS_").unwrap_or(&upper);
        Self::ALL
            .into_iter()
            .find(|status| &status.as_str()["STATUS_".len()..] == name)
    }

    /// Whether the pipeline can no longer change state.
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Finished
                | Self::ValidationError
                | Self::PreparationError
                | Self::CompileError
                | Self::RunError
                | Self::Error
                | Self::RunTimeout
                | Self::Canceled
        )
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ExecutionStatus> for i32 {
    fn from(status: ExecutionStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i32> for ExecutionStatus {
    type Error = String;

    // `Self::Error` would clash with the `Error` variant.
    fn try_from(code: i32) -> Result<Self, String> {
        Self::from_code(code).ok_or_else(|| format!("unknown execution status code {code}"))
    }
}
