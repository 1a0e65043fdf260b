//! File Writer - exclusive creation and guard/include boilerplate.
//!
//! Every file is written through a [`PendingFile`], which owns the open
//! handle and deletes the file when dropped before [`PendingFile::commit`].
//! Any early return, including `?` on a failed write, therefore leaves no
//! partial file behind.
//!
//! Include file layout:
//!
//! ```text
//! #pragma once            <- only with once-guard, followed by a blank line
//!
//! #ifndef __FOO_PUB_TYPES_H__
//! #define __FOO_PUB_TYPES_H__
//!
//! #include "foo/pub_consts.h"
//!                         <- only if at least one include was written
//! #endif //__FOO_PUB_TYPES_H__
//! ```
//!
//! Source files hold only the include lines.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FileHandle, Filesystem},
    },
    domain::{FileKind, FileSpec, Namer},
    error::IncgenResult,
};

/// Writes planned files through the [`Filesystem`] port.
pub struct FileWriter<'a> {
    filesystem: &'a dyn Filesystem,
    namer: &'a Namer,
    once_guard: bool,
}

impl<'a> FileWriter<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, namer: &'a Namer, once_guard: bool) -> Self {
        Self {
            filesystem,
            namer,
            once_guard,
        }
    }

    /// Lower-case `name`, resolve it to an absolute path and create it
    /// exclusively.
    pub fn create_file(&self, name: &str) -> IncgenResult<(FileHandle, PathBuf)> {
        let disk_name = Namer::disk_name(name);
        let path = self.filesystem.absolute(Path::new(&disk_name))?;
        let handle = self.filesystem.create_new(&path)?;
        Ok((handle, path))
    }

    /// Create an include file guarded by the token derived from `name`.
    pub fn create_include_file(&self, name: &str, deps: &[String]) -> IncgenResult<PathBuf> {
        let (handle, path) = self.create_file(name)?;
        let text = render_include(self.namer, self.once_guard, name, deps);
        PendingFile::new(self.filesystem, path, handle).finish(&text)
    }

    /// Create a source template holding only include lines.
    pub fn create_source_file(&self, name: &str, deps: &[String]) -> IncgenResult<PathBuf> {
        let (handle, path) = self.create_file(name)?;
        let text = render_source(self.namer, deps);
        PendingFile::new(self.filesystem, path, handle).finish(&text)
    }

    /// Create the file described by a plan entry.
    pub fn write_spec(&self, spec: &FileSpec) -> IncgenResult<PathBuf> {
        match spec.kind() {
            FileKind::Include => self.create_include_file(spec.file_name(), spec.includes()),
            FileKind::Source => self.create_source_file(spec.file_name(), spec.includes()),
        }
    }

    /// Render a plan entry into memory using the exact on-disk format.
    pub fn render(&self, spec: &FileSpec) -> String {
        match spec.kind() {
            FileKind::Include => {
                render_include(self.namer, self.once_guard, spec.file_name(), spec.includes())
            }
            FileKind::Source => render_source(self.namer, spec.includes()),
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Guarded include file: pragma, guard, includes, footer.
pub fn render_include(namer: &Namer, once_guard: bool, name: &str, deps: &[String]) -> String {
    let guard = namer.guard_token(name);
    let mut text = String::new();
    if once_guard {
        text.push_str("#pragma once\n\n");
    }
    text.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));
    if !deps.is_empty() {
        text.push_str(&render_source(namer, deps));
        text.push('\n');
    }
    text.push_str(&format!("#endif //{guard}\n"));
    text
}

/// Source template: include lines only.
pub fn render_source(namer: &Namer, deps: &[String]) -> String {
    deps.iter()
        .map(|dep| format!("#include \"{}\"\n", namer.include_path(dep)))
        .collect()
}

fn write_failed(path: &Path, e: &io::Error) -> ApplicationError {
    ApplicationError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

// ── Cleanup guard ─────────────────────────────────────────────────────────────

/// A freshly created file that is removed on drop unless committed.
struct PendingFile<'a> {
    filesystem: &'a dyn Filesystem,
    path: PathBuf,
    handle: Option<FileHandle>,
    committed: bool,
}

impl<'a> PendingFile<'a> {
    fn new(filesystem: &'a dyn Filesystem, path: PathBuf, handle: FileHandle) -> Self {
        Self {
            filesystem,
            path,
            handle: Some(handle),
            committed: false,
        }
    }

    /// Write `text`, flush and close the handle, keeping the file.
    ///
    /// Buffered handles may report a full disk only at the flush; either
    /// failure drops `self` uncommitted, which removes the file.
    fn finish(mut self, text: &str) -> IncgenResult<PathBuf> {
        if let Some(handle) = self.handle.as_mut() {
            handle
                .write_all(text.as_bytes())
                .and_then(|()| handle.flush())
                .map_err(|e| write_failed(&self.path, &e))?;
        }
        self.handle = None;
        self.committed = true;
        Ok(std::mem::take(&mut self.path))
    }
}

impl Drop for PendingFile<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        // Close before removing.
        drop(self.handle.take());
        match self.filesystem.remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed partially written file"),
            Err(e) => warn!(
                error = %e,
                path = %self.path.display(),
                "Failed to remove partially written file"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{GuardRule, ModuleName};
    use crate::error::IncgenError;
    use std::sync::{Arc, Mutex};

    /// Shared buffer standing in for a file on disk.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Rejects every write.
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Accepts writes into a buffer but fails when flushed, like a
    /// `BufWriter` over a full disk.
    struct FlushFails;

    impl Write for FlushFails {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("no space left on device"))
        }
    }

    fn namer(name: Option<&str>) -> Namer {
        Namer::new(
            name.map(|n| ModuleName::new(n).unwrap()),
            GuardRule::LettersOnly,
        )
    }

    fn fs_writing_to(buf: SharedBuf) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_absolute()
            .returning(|p| Ok(Path::new("/work").join(p)));
        fs.expect_create_new()
            .times(1)
            .returning(move |_| Ok(Box::new(buf.clone()) as FileHandle));
        fs.expect_remove_file().never();
        fs
    }

    fn deps(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn include_file_with_dependency() {
        let buf = SharedBuf::default();
        let fs = fs_writing_to(buf.clone());
        let n = namer(Some("foo"));
        let path = FileWriter::new(&fs, &n, false)
            .create_include_file("pub_types.h", &deps(&["pub_consts.h"]))
            .unwrap();

        assert_eq!(path, PathBuf::from("/work/pub_types.h"));
        assert_eq!(
            buf.contents(),
            "#ifndef __FOO_PUB_TYPES_H__\n\
             #define __FOO_PUB_TYPES_H__\n\
             \n\
             #include \"foo/pub_consts.h\"\n\
             \n\
             #endif //__FOO_PUB_TYPES_H__\n"
        );
    }

    #[test]
    fn include_file_without_dependency_has_no_extra_blank_line() {
        let buf = SharedBuf::default();
        let fs = fs_writing_to(buf.clone());
        let n = namer(None);
        FileWriter::new(&fs, &n, false)
            .create_include_file("pub_consts.h", &[])
            .unwrap();

        assert_eq!(
            buf.contents(),
            "#ifndef __PUB_CONSTS_H__\n#define __PUB_CONSTS_H__\n\n#endif //__PUB_CONSTS_H__\n"
        );
    }

    #[test]
    fn once_guard_adds_pragma() {
        let buf = SharedBuf::default();
        let fs = fs_writing_to(buf.clone());
        let n = namer(None);
        FileWriter::new(&fs, &n, true)
            .create_include_file("pub_consts.h", &[])
            .unwrap();

        assert!(buf.contents().starts_with("#pragma once\n\n#ifndef __PUB_CONSTS_H__\n"));
    }

    #[test]
    fn source_file_has_only_include_lines() {
        let buf = SharedBuf::default();
        let fs = fs_writing_to(buf.clone());
        let n = namer(Some("foo"));
        FileWriter::new(&fs, &n, true)
            .create_source_file("foo.c", &deps(&["priv_inlines.h"]))
            .unwrap();

        assert_eq!(buf.contents(), "#include \"foo/priv_inlines.h\"\n");
    }

    #[test]
    fn file_name_is_lower_cased_on_disk() {
        let mut fs = MockFilesystem::new();
        fs.expect_absolute()
            .withf(|p| p.ends_with("netcore.h"))
            .returning(|p| Ok(Path::new("/work").join(p)));
        fs.expect_create_new()
            .withf(|p| p.starts_with("/work") && p.ends_with("netcore.h"))
            .returning(|_| Ok(Box::new(io::sink()) as FileHandle));
        let n = namer(Some("NetCore"));
        let path = FileWriter::new(&fs, &n, false)
            .create_include_file("NetCore.h", &deps(&["pub_inlines.h"]))
            .unwrap();
        assert_eq!(path, PathBuf::from("/work/netcore.h"));
    }

    #[test]
    fn write_failure_removes_the_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_absolute()
            .returning(|p| Ok(Path::new("/work").join(p)));
        fs.expect_create_new()
            .returning(|_| Ok(Box::new(FailingWriter) as FileHandle));
        fs.expect_remove_file()
            .withf(|p| p.ends_with("pub_types.h"))
            .times(1)
            .returning(|_| Ok(()));

        let n = namer(None);
        let err = FileWriter::new(&fs, &n, false)
            .create_include_file("pub_types.h", &deps(&["pub_consts.h"]))
            .unwrap_err();

        assert!(matches!(
            err,
            IncgenError::Application(ApplicationError::WriteFailed { .. })
        ));
    }

    #[test]
    fn flush_failure_removes_the_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_absolute()
            .returning(|p| Ok(Path::new("/work").join(p)));
        fs.expect_create_new()
            .returning(|_| Ok(Box::new(FlushFails) as FileHandle));
        fs.expect_remove_file()
            .withf(|p| p.ends_with("pub_consts.h"))
            .times(1)
            .returning(|_| Ok(()));

        let n = namer(None);
        let err = FileWriter::new(&fs, &n, false)
            .create_include_file("pub_consts.h", &[])
            .unwrap_err();

        match err {
            IncgenError::Application(ApplicationError::WriteFailed { path, reason }) => {
                assert_eq!(path, PathBuf::from("/work/pub_consts.h"));
                assert_eq!(reason, "no space left on device");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn source_write_failure_removes_the_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_absolute()
            .returning(|p| Ok(Path::new("/work").join(p)));
        fs.expect_create_new()
            .returning(|_| Ok(Box::new(FailingWriter) as FileHandle));
        fs.expect_remove_file().times(1).returning(|_| Ok(()));

        let n = namer(Some("foo"));
        let result = FileWriter::new(&fs, &n, false)
            .create_source_file("foo.c", &deps(&["priv_inlines.h"]));
        assert!(result.is_err());
    }

    #[test]
    fn failed_cleanup_still_reports_the_write_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_absolute()
            .returning(|p| Ok(Path::new("/work").join(p)));
        fs.expect_create_new()
            .returning(|_| Ok(Box::new(FailingWriter) as FileHandle));
        fs.expect_remove_file().times(1).returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });

        let n = namer(None);
        let err = FileWriter::new(&fs, &n, false)
            .create_include_file("pub_consts.h", &[])
            .unwrap_err();
        assert!(matches!(
            err,
            IncgenError::Application(ApplicationError::WriteFailed { .. })
        ));
    }

    #[test]
    fn existing_file_is_reported_and_not_removed() {
        let mut fs = MockFilesystem::new();
        fs.expect_absolute()
            .returning(|p| Ok(Path::new("/work").join(p)));
        fs.expect_create_new().returning(|p| {
            Err(ApplicationError::FileExists {
                path: p.to_path_buf(),
            }
            .into())
        });
        fs.expect_remove_file().never();

        let n = namer(None);
        let err = FileWriter::new(&fs, &n, false)
            .create_include_file("pub_consts.h", &[])
            .unwrap_err();
        assert!(err.is_already_exists());
    }

    #[test]
    fn render_matches_written_bytes() {
        let buf = SharedBuf::default();
        let fs = fs_writing_to(buf.clone());
        let n = namer(Some("foo"));
        let writer = FileWriter::new(&fs, &n, true);
        let spec = FileSpec::new(
            crate::domain::FileRole::ExportHeader,
            "foo.h",
            deps(&["pub_inlines.h"]),
        );

        writer.write_spec(&spec).unwrap();
        assert_eq!(writer.render(&spec), buf.contents());
    }
}
