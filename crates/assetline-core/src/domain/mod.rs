//! Core domain layer for Assetline.
//!
//! This module contains the pipeline data model with no I/O of its own.
//! Reading, globbing and writing are handled via ports defined in the
//! application layer.
//!
//! ## Layering rules
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem calls; timestamps arrive inside `FileInfo`
//! - **Plain data**: `Task` and `FilterSpec` are serde-friendly descriptions,
//!   runnable filters are built from them in `crate::application`
pub mod entities;
pub mod error;

pub use entities::{
    asset::Asset,
    file_info::FileInfo,
    pipeline::Pipeline,
    task::{FilterSpec, Guard, StrTransform, Task, validate_tasks},
};

pub use error::{DomainError, ErrorCategory};
