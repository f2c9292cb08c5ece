//! Application layer errors.
//!
//! These errors represent failures while talking to the outside world
//! (glob expansion, reading sources, writing outputs). Errors in task or
//! filter definitions are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Why a glob pattern could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    /// A path segment of the pattern does not exist.
    NotFound,
    /// Invalid syntax, permissions or any other I/O failure.
    Other,
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "no such file or directory"),
            Self::Other => write!(f, "resolution failed"),
        }
    }
}

/// Errors that occur while a pipeline touches the filesystem.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Glob pattern expansion failed.
    #[error("Cannot resolve '{pattern}' ({kind}): {reason}")]
    Resolution {
        pattern: String,
        kind: ResolutionKind,
        reason: String,
    },

    /// A matched file could not be read during Load.
    #[error("Cannot read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// Directory or file creation failed during Write.
    #[error("Cannot write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// Filesystem adapter state is unavailable (lock poisoned, etc.).
    #[error("Filesystem adapter is unavailable")]
    FilesystemLock,
}

impl ApplicationError {
    /// Shorthand for a resolution error of kind [`ResolutionKind::NotFound`].
    pub fn not_found(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            pattern: pattern.into(),
            kind: ResolutionKind::NotFound,
            reason: reason.into(),
        }
    }

    /// `true` when a path segment was missing during glob resolution.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Resolution {
                kind: ResolutionKind::NotFound,
                ..
            }
        )
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Resolution {
                pattern,
                kind: ResolutionKind::NotFound,
                ..
            } => vec![
                format!("Nothing exists at the fixed part of '{}'", pattern),
                "Patterns are resolved relative to the current directory".into(),
            ],
            Self::Resolution { pattern, .. } => vec![
                format!("Check the syntax of pattern '{}'", pattern),
                "Check that the matched directories are readable".into(),
            ],
            Self::Read { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the file is readable".into(),
            ],
            Self::Write { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files already written by this run are left in place".into(),
            ],
            Self::FilesystemLock => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Resolution {
                kind: ResolutionKind::NotFound,
                ..
            } => ErrorCategory::NotFound,
            Self::Resolution { .. } => ErrorCategory::Validation,
            Self::Read { .. } | Self::Write { .. } => ErrorCategory::Io,
            Self::FilesystemLock => ErrorCategory::Internal,
        }
    }
}
