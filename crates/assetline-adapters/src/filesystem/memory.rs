//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
    time::SystemTime,
};

use assetline_core::{
    application::{ApplicationError, ResolutionKind, ports::Filesystem},
    domain::FileInfo,
    error::AssetlineResult,
};
use glob::{MatchOptions, Pattern};

#[derive(Debug, Clone)]
struct MemoryFile {
    content: Vec<u8>,
    modified: SystemTime,
}

/// In-memory filesystem for testing.
///
/// Clones share state. Written files are stamped with the current time;
/// use [`MemoryFilesystem::insert_file`] to control modification times.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, MemoryFile>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.directories.insert(ancestor.to_path_buf());
        }
    }
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Builder-style [`insert_file`](Self::insert_file) stamped with now.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.insert_file(path, content, SystemTime::now());
        self
    }

    /// Place a file (and its parent directories) with an explicit mtime.
    pub fn insert_file(
        &self,
        path: impl AsRef<Path>,
        content: impl Into<Vec<u8>>,
        modified: SystemTime,
    ) {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            inner.add_ancestors(path);
            inner.files.insert(
                path.to_path_buf(),
                MemoryFile {
                    content: content.into(),
                    modified,
                },
            );
        }
    }

    /// Read a file's content as text (testing helper).
    pub fn read_file_content(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path.as_ref())
            .map(|f| String::from_utf8_lossy(&f.content).into_owned())
    }

    /// List all files, ordered by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn glob(&self, pattern: &str) -> AssetlineResult<Vec<FileInfo>> {
        let matcher = Pattern::new(pattern).map_err(|e| ApplicationError::Resolution {
            pattern: pattern.to_string(),
            kind: ResolutionKind::Other,
            reason: e.to_string(),
        })?;
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };

        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::FilesystemLock)?;

        // Directory mtimes are not tracked
        let dirs = inner
            .directories
            .iter()
            .filter(|p| matcher.matches_path_with(p, options))
            .map(|p| FileInfo::new(p.clone(), true, SystemTime::UNIX_EPOCH));
        let files = inner
            .files
            .iter()
            .filter(|(p, _)| matcher.matches_path_with(p, options))
            .map(|(p, f)| FileInfo::new(p.clone(), false, f.modified));

        let mut entries: Vec<FileInfo> = dirs.chain(files).collect();
        entries.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_file(&self, path: &Path) -> AssetlineResult<Vec<u8>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::FilesystemLock)?;

        inner
            .files
            .get(path)
            .map(|f| f.content.clone())
            .ok_or_else(|| {
                ApplicationError::Read {
                    path: path.to_path_buf(),
                    reason: "No such file".into(),
                }
                .into()
            })
    }

    fn create_dir_all(&self, path: &Path) -> AssetlineResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::FilesystemLock)?;

        if inner.files.contains_key(path) {
            return Err(ApplicationError::Write {
                path: path.to_path_buf(),
                reason: "A file exists at this path".into(),
            }
            .into());
        }

        inner.add_ancestors(path);
        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> AssetlineResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::FilesystemLock)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::Write {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(
            path.to_path_buf(),
            MemoryFile {
                content: content.to_vec(),
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }
}
