//! Infrastructure adapters for Assetline.
//!
//! This crate implements the `Filesystem` port defined in
//! `assetline_core::application::ports` and loads TOML task manifests.
//! It contains all direct I/O.

pub mod filesystem;
pub mod task_loader;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use task_loader::{Manifest, TaskLoader};
