//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `incgen-adapters` crate provides implementations.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::IncgenResult;

/// Open handle to a file created by [`Filesystem::create_new`].
pub type FileHandle = Box<dyn Write + Send>;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `incgen_adapters::filesystem::LocalFilesystem` (production)
/// - `incgen_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - There is no "open existing" operation: files are only ever created
/// - Relative paths are resolved against the adapter's working directory
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Directory generated files are written to.
    fn current_dir(&self) -> IncgenResult<PathBuf>;

    /// Resolve a path against the working directory.
    fn absolute(&self, path: &Path) -> IncgenResult<PathBuf>;

    /// Create a file that must not exist yet.
    ///
    /// Fails with `ApplicationError::FileExists` if anything is present at
    /// `path`; existing content is never touched.
    fn create_new(&self, path: &Path) -> IncgenResult<FileHandle>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> IncgenResult<()>;
}
