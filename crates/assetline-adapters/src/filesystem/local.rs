//! Local filesystem adapter using std::fs and the `glob` crate.

use std::fs;
use std::io;
use std::path::Path;

use assetline_core::{
    application::{ApplicationError, ResolutionKind, ports::Filesystem},
    domain::FileInfo,
    error::{AssetlineError, AssetlineResult},
};
use tracing::trace;

/// Production filesystem implementation.
///
/// Relative patterns resolve against the process working directory.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn glob(&self, pattern: &str) -> AssetlineResult<Vec<FileInfo>> {
        let paths = glob::glob(pattern).map_err(|e| ApplicationError::Resolution {
            pattern: pattern.to_string(),
            kind: ResolutionKind::Other,
            reason: e.to_string(),
        })?;

        let mut entries = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| {
                let kind = resolution_kind(e.error());
                ApplicationError::Resolution {
                    pattern: pattern.to_string(),
                    kind,
                    reason: e.to_string(),
                }
            })?;

            let metadata = fs::metadata(&path).map_err(|e| ApplicationError::Resolution {
                pattern: pattern.to_string(),
                kind: resolution_kind(&e),
                reason: format!("{}: {}", path.display(), e),
            })?;
            let modified = metadata.modified().map_err(|e| ApplicationError::Resolution {
                pattern: pattern.to_string(),
                kind: ResolutionKind::Other,
                reason: format!("{}: {}", path.display(), e),
            })?;

            trace!(path = %path.display(), "Glob match");
            entries.push(FileInfo::new(path, metadata.is_dir(), modified));
        }
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_file(&self, path: &Path) -> AssetlineResult<Vec<u8>> {
        fs::read(path).map_err(|e| {
            ApplicationError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn create_dir_all(&self, path: &Path) -> AssetlineResult<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(path).map_err(|e| map_write_error(path, e))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> AssetlineResult<()> {
        fs::write(path, content).map_err(|e| map_write_error(path, e))
    }
}

fn resolution_kind(e: &io::Error) -> ResolutionKind {
    if e.kind() == io::ErrorKind::NotFound {
        ResolutionKind::NotFound
    } else {
        ResolutionKind::Other
    }
}

fn map_write_error(path: &Path, e: io::Error) -> AssetlineError {
    ApplicationError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pattern(dir: &TempDir, rest: &str) -> String {
        dir.path().join(rest).to_string_lossy().into_owned()
    }

    #[test]
    fn glob_reports_files_and_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let fs = LocalFilesystem::new();
        let mut entries = fs.glob(&pattern(&dir, "*")).unwrap();
        entries.sort_by(|a, b| a.path().cmp(b.path()));

        assert_eq!(entries.len(), 2);
        assert!(!entries[0].is_dir());
        assert!(entries[1].is_dir());
        assert_eq!(entries[1].path(), dir.path().join("sub"));
    }

    #[test]
    fn glob_in_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let entries = LocalFilesystem.glob(&pattern(&dir, "nope/*.txt")).unwrap();
        assert!(entries.is_empty());
        assert!(!LocalFilesystem.exists(&dir.path().join("nope")));
    }

    #[test]
    fn invalid_pattern_is_a_resolution_error() {
        let err = LocalFilesystem.glob("[").unwrap_err();
        assert!(matches!(
            err,
            AssetlineError::Application(ApplicationError::Resolution {
                kind: ResolutionKind::Other,
                ..
            })
        ));
    }

    #[test]
    fn create_dir_all_and_write_round() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("out/css");
        let file = nested.join("site.css");

        LocalFilesystem.create_dir_all(&nested).unwrap();
        LocalFilesystem.create_dir_all(&nested).unwrap();
        LocalFilesystem.write_file(&file, b"body{}").unwrap();

        assert_eq!(LocalFilesystem.read_file(&file).unwrap(), b"body{}");
    }

    #[cfg(unix)]
    #[test]
    fn created_directories_are_0755() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        LocalFilesystem.create_dir_all(&nested).unwrap();

        let mode = fs::metadata(&nested).unwrap().permissions().mode() & 0o777;
        // umask can only remove bits
        assert_eq!(mode & !0o755, 0);
    }

    #[test]
    fn write_without_parent_fails() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem
            .write_file(&dir.path().join("missing/a.txt"), b"x")
            .unwrap_err();
        assert!(matches!(
            err,
            AssetlineError::Application(ApplicationError::Write { .. })
        ));
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem.read_file(&dir.path().join("x")).unwrap_err();
        assert!(matches!(
            err,
            AssetlineError::Application(ApplicationError::Read { .. })
        ));
    }
}
