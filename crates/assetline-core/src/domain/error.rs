// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports can be kept after the run)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Construction Errors (raised before any pipeline run)
    // ========================================================================
    #[error("Cannot build filter '{filter}': {reason}")]
    FilterConstruction { filter: &'static str, reason: String },

    // ========================================================================
    // Task Validation Errors
    // ========================================================================
    #[error("Invalid task '{task}': {reason}")]
    InvalidTask { task: String, reason: String },

    #[error("Duplicate task name: {name}")]
    DuplicateTask { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilterConstruction { filter, reason } => vec![
                format!("The '{}' filter rejected its parameters", filter),
                format!("Details: {}", reason),
                match *filter {
                    "replace-pattern" => {
                        "Check the regular expression syntax (https://docs.rs/regex)".into()
                    }
                    _ => "Check the filter parameters in your manifest".into(),
                },
            ],
            Self::InvalidTask { task, .. } => vec![
                format!("Fix the definition of task '{}'", task),
                "Every task needs a name and at least one filter".into(),
            ],
            Self::DuplicateTask { name } => vec![
                format!("Task '{}' is defined more than once", name),
                "Rename or remove one of the definitions".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilterConstruction { .. } => ErrorCategory::Validation,
            Self::InvalidTask { .. } | Self::DuplicateTask { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
