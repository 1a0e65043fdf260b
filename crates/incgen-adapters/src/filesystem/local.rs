//! Local filesystem adapter using std::fs.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tracing::trace;

use incgen_core::{
    application::{
        ApplicationError,
        ports::{FileHandle, Filesystem},
    },
    error::{IncgenError, IncgenResult},
};

/// Production filesystem implementation using `std::fs`.
///
/// Relative paths resolve against the process working directory, or against
/// a fixed root when built with [`LocalFilesystem::rooted`].
#[derive(Debug, Clone, Default)]
pub struct LocalFilesystem {
    root: Option<PathBuf>,
}

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Adapter that treats `root` as its working directory.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl Filesystem for LocalFilesystem {
    fn current_dir(&self) -> IncgenResult<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir().map_err(|e| {
                ApplicationError::WorkingDirectoryUnavailable {
                    reason: e.to_string(),
                }
                .into()
            }),
        }
    }

    fn absolute(&self, path: &Path) -> IncgenResult<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        match &self.root {
            Some(root) => Ok(root.join(path)),
            None => std::path::absolute(path).map_err(|e| map_io_error(path, e, "resolve path")),
        }
    }

    fn create_new(&self, path: &Path) -> IncgenResult<FileHandle> {
        let file = open_exclusive(path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ApplicationError::FileExists {
                path: path.to_path_buf(),
            }
            .into(),
            _ => map_io_error(path, e, "create file"),
        })?;
        trace!(path = %path.display(), "Created file");
        Ok(Box::new(BufWriter::new(file)))
    }

    fn remove_file(&self, path: &Path) -> IncgenResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }
}

fn open_exclusive(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> IncgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
