//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not naming or
//! plan rules. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while resolving input or writing files.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The current working directory could not be determined.
    #[error("cannot read working directory: {reason}")]
    WorkingDirectoryUnavailable { reason: String },

    /// Target file is already present; nothing was written to it.
    #[error("{path} already exists")]
    FileExists { path: PathBuf },

    /// Filesystem operation failed.
    #[error("{path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Writing into a freshly created file failed; the file was removed.
    #[error("write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::WorkingDirectoryUnavailable { .. } => vec![
                "Check that the current directory still exists".into(),
                "Or pass the module name explicitly with --name".into(),
            ],
            Self::FileExists { path } => vec![
                format!("Existing files are never overwritten: {}", path.display()),
                "Run in a clean directory or remove the generated files first".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::WriteFailed { .. } => vec![
                "The partially written file was removed".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::WorkingDirectoryUnavailable { .. } => ErrorCategory::Configuration,
            Self::FileExists { .. } => ErrorCategory::AlreadyExists,
            Self::FilesystemError { .. } | Self::WriteFailed { .. } => ErrorCategory::Io,
        }
    }
}
