//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from external systems.
//! The `assetline-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::FileInfo;
use crate::error::AssetlineResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `assetline_adapters::filesystem::LocalFilesystem` (production)
/// - `assetline_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - All calls are synchronous and blocking
/// - `glob` expands a single pattern; merging, exclusion and "not found"
///   detection live in `GlobResolver`
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Expand one glob pattern into matching entries (any order).
    fn glob(&self, pattern: &str) -> AssetlineResult<Vec<FileInfo>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file.
    fn read_file(&self, path: &Path) -> AssetlineResult<Vec<u8>>;

    /// Create a directory and all parent directories (mode `0755`).
    fn create_dir_all(&self, path: &Path) -> AssetlineResult<()>;

    /// Create or truncate a file and write `content` to it.
    fn write_file(&self, path: &Path, content: &[u8]) -> AssetlineResult<()>;
}
