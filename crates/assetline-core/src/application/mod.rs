//! Application layer for Assetline.
//!
//! This layer contains:
//! - **Filters**: the transformation steps and `Pipeline::run`
//! - **Services**: Glob Resolver, Staleness Checker, PipelineService
//! - **Ports**: the `Filesystem` trait implemented by adapters
//! - **Errors**: failures while talking to the filesystem

pub mod error;
pub mod filter;
pub mod ports;
pub mod services;

pub use services::{
    GlobMatches, GlobResolver, PipelineService, RunOutcome, RunReport, outdated,
};

pub use ports::Filesystem;

pub use error::{ApplicationError, ResolutionKind};
