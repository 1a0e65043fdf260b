//! Error handling for the incgen CLI.
//!
//! Provides structured errors with:
//! - One-line user-facing messages
//! - Actionable suggestions, shown with `-v`
//! - Proper error chaining
//!
//! Every failure exits with status 1.

use std::{error::Error, fmt::Write as _};

use owo_colors::OwoColorize;
use thiserror::Error;

use incgen_core::error::{ErrorCategory as CoreCategory, IncgenError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Command line could not be parsed.
    #[error("{message}")]
    Usage { message: String },

    /// A configuration file could not be read, parsed, or written.
    #[error("configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `incgen-core`.
    #[error(transparent)]
    Core(#[from] IncgenError),

    /// An I/O operation outside generation failed.
    #[error("{message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<clap::Error> for CliError {
    /// Keep only clap's first line, without its `error: ` prefix.
    fn from(err: clap::Error) -> Self {
        if err.kind() == clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand {
            return CliError::Usage {
                message: "a subcommand is required here".into(),
            };
        }
        let rendered = err.to_string();
        let first = rendered.lines().next().unwrap_or_default();
        let message = first.strip_prefix("error: ").unwrap_or(first).to_string();
        CliError::Usage { message }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Usage { .. } => vec!["Use --help for usage information".into()],

            Self::ConfigError { .. } => vec![
                "Check the file passed with --config, .incgen.toml and the global config".into(),
                "Use 'incgen config path' to see which file is in effect".into(),
                "Use 'incgen init --force' to rewrite a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and logging.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Usage { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::AlreadyExists => ErrorCategory::AlreadyExists,
                CoreCategory::Io => ErrorCategory::Io,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Io,
        }
    }

    /// Exit code to pass to the OS. Every failure is 1.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Format the error for display with colors.
    ///
    /// The first line is always `error: <message>`; causes and suggestions
    /// follow only when `verbose` is set.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = format!("{} {}\n", "error:".red().bold(), self);

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                let _ = writeln!(
                    output,
                    "  {} {}",
                    "caused by:".dimmed(),
                    err.to_string().dimmed()
                );
                source = err.source();
            }
            for suggestion in self.suggestions() {
                let _ = writeln!(output, "  {} {}", "hint:".yellow().bold(), suggestion);
            }
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] with no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("error: {self}\n");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                let _ = writeln!(out, "  caused by: {err}");
                src = err.source();
            }
            for s in self.suggestions() {
                let _ = writeln!(out, "  hint: {s}");
            }
        }

        out
    }

    /// Log the error using tracing.
    ///
    /// Expected failures stay below the default WARN filter so that stderr
    /// carries only the one-line message.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
            category => tracing::info!(?category, "Run failed: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Configuration error.
    Configuration,
    /// A target file is already present.
    AlreadyExists,
    /// File creation or write failure.
    Io,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
