//! Unified error handling for incgen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for incgen core operations.
///
/// This enum wraps all possible errors that can occur when using incgen-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IncgenError {
    /// Errors from the domain layer (naming and plan rules).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (resolution and file I/O).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl IncgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// `true` when the run stopped because a target file was already present.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::FileExists { .. }))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Incompatible flags, invalid names, unreadable working directory.
    Configuration,
    /// The requested plan breaks a plan rule.
    Validation,
    /// A target file is already present.
    AlreadyExists,
    /// Creation or write failure.
    Io,
    /// A plan broke a rule the chain builder guarantees.
    Internal,
}

/// Convenient result type alias.
pub type IncgenResult<T> = Result<T, IncgenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn file_exists_maps_to_already_exists() {
        let err: IncgenError = ApplicationError::FileExists {
            path: PathBuf::from("/tmp/pub_consts.h"),
        }
        .into();
        assert!(err.is_already_exists());
        assert_eq!(err.category(), ErrorCategory::AlreadyExists);
        assert_eq!(err.to_string(), "/tmp/pub_consts.h already exists");
    }

    #[test]
    fn domain_configuration_errors_keep_their_category() {
        let err: IncgenError = DomainError::InvalidPrefix {
            prefix: String::new(),
            reason: "cannot be empty".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!err.is_already_exists());
    }
}
