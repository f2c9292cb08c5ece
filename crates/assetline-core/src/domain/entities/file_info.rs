use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One filesystem entry produced by glob resolution.
///
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    path: PathBuf,
    is_dir: bool,
    modified: SystemTime,
}

impl FileInfo {
    pub fn new(path: impl Into<PathBuf>, is_dir: bool, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            is_dir,
            modified,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }
}
