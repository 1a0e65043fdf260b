//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, RwLock},
};

use incgen_core::{
    application::{
        ApplicationError,
        ports::{FileHandle, Filesystem},
    },
    error::IncgenResult,
};

type Contents = Arc<Mutex<Vec<u8>>>;

/// In-memory filesystem for testing.
///
/// Clones share the same state, so a test can hand one clone to a service
/// and inspect the other.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug)]
struct MemoryFilesystemInner {
    cwd: PathBuf,
    files: BTreeMap<PathBuf, Contents>,
    failing_writes: HashSet<PathBuf>,
    cwd_unavailable: bool,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem whose working directory is `/`.
    pub fn new() -> Self {
        Self::with_cwd("/")
    }

    /// Create a new empty memory filesystem with the given working directory.
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner {
                cwd: cwd.into(),
                files: BTreeMap::new(),
                failing_writes: HashSet::new(),
                cwd_unavailable: false,
            })),
        }
    }

    /// Seed a file (testing helper). Relative paths resolve against the
    /// working directory.
    pub fn insert_file(&self, path: impl AsRef<Path>, content: &str) {
        let mut inner = self.inner.write().unwrap();
        let path = inner.cwd.join(path);
        inner
            .files
            .insert(path, Arc::new(Mutex::new(content.as_bytes().to_vec())));
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        let bytes = inner.files.get(&inner.cwd.join(path))?.lock().ok()?.clone();
        String::from_utf8(bytes).ok()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Make every write to `path` fail after the file is created.
    pub fn fail_writes_for(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.write().unwrap();
        let path = inner.cwd.join(path);
        inner.failing_writes.insert(path);
    }

    /// Make `current_dir` fail, as when the directory was removed.
    pub fn fail_current_dir(&self) {
        self.inner.write().unwrap().cwd_unavailable = true;
    }

}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

struct MemoryFile {
    contents: Contents,
    fail: bool,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail {
            return Err(io::Error::other("injected write failure"));
        }
        self.contents
            .lock()
            .map_err(|_| io::Error::other("file lock poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn lock_error(path: &Path) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "Filesystem lock poisoned".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn current_dir(&self) -> IncgenResult<PathBuf> {
        let inner = self.inner.read().map_err(|_| lock_error(Path::new(".")))?;
        if inner.cwd_unavailable {
            return Err(ApplicationError::WorkingDirectoryUnavailable {
                reason: "No such file or directory".into(),
            }
            .into());
        }
        Ok(inner.cwd.clone())
    }

    fn absolute(&self, path: &Path) -> IncgenResult<PathBuf> {
        let inner = self.inner.read().map_err(|_| lock_error(path))?;
        Ok(inner.cwd.join(path))
    }

    fn create_new(&self, path: &Path) -> IncgenResult<FileHandle> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        if inner.files.contains_key(path) {
            return Err(ApplicationError::FileExists {
                path: path.to_path_buf(),
            }
            .into());
        }

        let contents = Contents::default();
        inner.files.insert(path.to_path_buf(), contents.clone());
        let fail = inner.failing_writes.contains(path);
        Ok(Box::new(MemoryFile { contents, fail }))
    }

    fn remove_file(&self, path: &Path) -> IncgenResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        match inner.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to remove file: not found".into(),
            }
            .into()),
        }
    }
}
