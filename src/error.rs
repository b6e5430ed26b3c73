//! Error types for timetable generation.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for timetable operations.
pub type TimetableResult<T> = Result<T, TimetableError>;

/// Errors surfaced by the timetable engine.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// Inputs are inconsistent; nothing was placed.
    #[error("invalid timetable configuration: {}", join_messages(.0))]
    Configuration(Vec<ValidationError>),

    /// A class group used its whole attempt budget without a valid grid.
    #[error("no valid timetable for class group '{class_group}' after {attempts} attempts")]
    PlacementExhausted {
        /// Class group name.
        class_group: String,
        /// Attempts spent.
        attempts: u32,
    },

    /// Whole-pass restarts exceeded their budget.
    #[error("orchestration gave up after {passes} passes (last failure: '{last_failed}')")]
    OrchestrationExhausted {
        /// Passes spent.
        passes: u32,
        /// Class group that failed the final pass.
        last_failed: String,
    },

    /// Input or configuration JSON could not be parsed.
    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimetableError {
    /// Whether a caller may retry (e.g. with another seed) and expect a
    /// different outcome.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::PlacementExhausted { .. })
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
