//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and the `Filesystem` port to
//! resolve patterns, check staleness and run tasks.

pub mod glob_resolver;
pub mod pipeline_service;
pub mod staleness;

pub use glob_resolver::{GlobMatches, GlobResolver};
pub use pipeline_service::{PipelineService, RunOutcome, RunReport};
pub use staleness::outdated;
