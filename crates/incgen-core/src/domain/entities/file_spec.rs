use serde::Serialize;

use crate::domain::{
    naming::Namer,
    value_objects::{FileKind, FileRole},
};

/// One file of a generation plan.
///
/// `file_name` is the logical name (case preserved), used for include paths
/// and guard tokens. The on-disk name is its lower-cased form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSpec {
    role: FileRole,
    file_name: String,
    kind: FileKind,
    includes: Vec<String>,
}

impl FileSpec {
    pub fn new(role: FileRole, file_name: impl Into<String>, includes: Vec<String>) -> Self {
        Self {
            role,
            file_name: file_name.into(),
            kind: role.kind(),
            includes,
        }
    }

    pub fn role(&self) -> FileRole {
        self.role
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn disk_name(&self) -> String {
        Namer::disk_name(&self.file_name)
    }

    /// Logical names of the files this one includes, in order.
    pub fn includes(&self) -> &[String] {
        &self.includes
    }
}
