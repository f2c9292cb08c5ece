//! Unified error handling for Assetline Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Assetline Core operations.
///
/// Any filter failure surfaces as one of these and aborts the remaining
/// filter chain.
#[derive(Debug, Error, Clone)]
pub enum AssetlineError {
    /// Errors from the domain layer (invalid tasks or filter parameters).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (glob, read and write failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl AssetlineError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your manifest and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Assetline".into(),
                "Please report this issue along with the manifest you ran".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// `true` when a glob pattern pointed at a path that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Application(e) if e.is_not_found())
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Io,
    Internal,
}

/// Convenient result type alias.
pub type AssetlineResult<T> = Result<T, AssetlineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ResolutionKind;

    #[test]
    fn not_found_resolution_is_detected_through_the_root_error() {
        let err: AssetlineError = ApplicationError::not_found("out/*.txt", "missing").into();
        assert!(err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn other_resolution_is_not_a_not_found() {
        let err: AssetlineError = ApplicationError::Resolution {
            pattern: "[".into(),
            kind: ResolutionKind::Other,
            reason: "bad syntax".into(),
        }
        .into();
        assert!(!err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn filter_construction_suggests_regex_docs() {
        let err: AssetlineError = DomainError::FilterConstruction {
            filter: "replace-pattern",
            reason: "unclosed group".into(),
        }
        .into();
        assert!(err.suggestions().iter().any(|s| s.contains("regular expression")));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn write_errors_are_io() {
        let err: AssetlineError = ApplicationError::Write {
            path: "out/a.txt".into(),
            reason: "read-only".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Io);
    }
}
