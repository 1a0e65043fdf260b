// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be carried in reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("flags --{first} and --{second} are not compatible")]
    ConflictingInputs {
        first: &'static str,
        second: &'static str,
    },

    #[error("invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    #[error("invalid prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    // ========================================================================
    // Plan Invariants
    // ========================================================================
    #[error("generation plan is empty")]
    EmptyPlan,

    #[error("'{file}' is planned more than once")]
    DuplicateFile { file: String },

    #[error("'{file}' includes '{include}', which is not planned before it")]
    DanglingInclude { file: String, include: String },

    #[error("guard {token} is shared by '{first}' and '{second}'")]
    GuardCollision {
        token: String,
        first: String,
        second: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConflictingInputs { first, second } => vec![
                format!("Pass either --{first} or --{second}, not both"),
                "Use --help for usage information".into(),
            ],
            Self::InvalidModuleName { .. } => vec![
                "Module names are used as a directory segment in include paths".into(),
                "Use a single path component, e.g. --name=netcore".into(),
            ],
            Self::InvalidPrefix { .. } => vec![
                "--add needs a non-empty prefix, e.g. --add=util".into(),
            ],
            Self::GuardCollision { .. } => vec![
                "Two files normalize to the same include guard".into(),
                "Try --guard-style=keep-digits or rename the module".into(),
                "Or drop --strict-guards to accept the collision".into(),
            ],
            _ => vec!["This plan cannot be generated as requested".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConflictingInputs { .. }
            | Self::InvalidModuleName { .. }
            | Self::InvalidPrefix { .. } => ErrorCategory::Configuration,
            Self::GuardCollision { .. } | Self::DuplicateFile { .. } => ErrorCategory::Validation,
            Self::EmptyPlan | Self::DanglingInclude { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Internal,
}
