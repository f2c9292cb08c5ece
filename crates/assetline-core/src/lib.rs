//! Assetline Core - asset pipeline domain and application layers.
//!
//! Assetline loads files matched by glob patterns into in-memory assets,
//! runs them through an ordered chain of filters, and writes the results.
//! A staleness check lets callers skip work when outputs are newer than
//! their sources.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         assetline-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (PipelineService, filters, outdated)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Port (Filesystem)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   assetline-adapters (Infrastructure)   │
//! │   (LocalFilesystem, MemoryFilesystem)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use assetline_core::prelude::*;
//! use assetline_core::application::filter;
//! # fn demo(fs: Arc<dyn Filesystem>) -> AssetlineResult<()> {
//!
//! if outdated(fs.as_ref(), &["views/*.html"], &["dist/views/*.html"]) {
//!     Pipeline::new().run(&[
//!         filter::load(fs.clone(), ["views/*.html"]),
//!         filter::replace_path("views/", "dist/views/"),
//!         filter::write(fs),
//!     ])?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        PipelineService, RunOutcome, RunReport,
        filter::{Filter, load, write},
        outdated,
        ports::Filesystem,
    };
    pub use crate::domain::{Asset, FileInfo, FilterSpec, Guard, Pipeline, StrTransform, Task};
    pub use crate::error::{AssetlineError, AssetlineResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
