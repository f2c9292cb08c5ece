//! Filters - the transformation steps of a pipeline.
//!
//! A [`Filter`] is either an [`AssetFilter`], applied to every asset in turn,
//! or a [`PipelineFilter`], applied once to the whole sequence. Chains are
//! plain slices of filters owned by the caller and run with
//! [`Pipeline::run`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use assetline_core::application::filter::{self, Filter};
//! use assetline_core::domain::Pipeline;
//! # fn demo(fs: Arc<dyn assetline_core::application::ports::Filesystem>)
//! #     -> assetline_core::error::AssetlineResult<()> {
//! let chain: Vec<Filter> = vec![
//!     filter::load(fs.clone(), ["fixtures/*.txt"]),
//!     filter::replace_path("fixtures/", "out/"),
//!     filter::add_header("// generated\n"),
//!     filter::write(fs),
//! ];
//! Pipeline::new().run(&chain)?;
//! # Ok(())
//! # }
//! ```

mod asset;
mod pipeline;

use tracing::{debug, instrument};

use crate::{
    domain::{Asset, Pipeline},
    error::AssetlineResult,
};

pub use asset::{AddHeader, ReplacePath, ReplacePattern, Str, Trace};
pub use pipeline::{Cat, Load, Write};

/// Transforms a single asset in place.
///
/// Must not depend on the asset's position; the pipeline applies it to
/// every asset in order.
pub trait AssetFilter: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, asset: &mut Asset) -> AssetlineResult<()>;
}

/// Transforms the whole pipeline (may replace the asset sequence).
pub trait PipelineFilter: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, pipeline: &mut Pipeline) -> AssetlineResult<()>;
}

/// One step in a filter chain.
pub enum Filter {
    Asset(Box<dyn AssetFilter>),
    Pipeline(Box<dyn PipelineFilter>),
}

impl Filter {
    pub fn asset(filter: impl AssetFilter + 'static) -> Self {
        Self::Asset(Box::new(filter))
    }

    pub fn pipeline(filter: impl PipelineFilter + 'static) -> Self {
        Self::Pipeline(Box::new(filter))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Asset(f) => f.name(),
            Self::Pipeline(f) => f.name(),
        }
    }

    /// Apply to `pipeline`; per-asset filters visit assets in order and stop
    /// at the first error.
    pub fn apply(&self, pipeline: &mut Pipeline) -> AssetlineResult<()> {
        match self {
            Self::Asset(f) => pipeline.assets_mut().try_for_each(|asset| f.apply(asset)),
            Self::Pipeline(f) => f.apply(pipeline),
        }
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset(inner) => write!(f, "Filter::Asset({})", inner.name()),
            Self::Pipeline(inner) => write!(f, "Filter::Pipeline({})", inner.name()),
        }
    }
}

impl Pipeline {
    /// Run `filters` in declaration order.
    ///
    /// The first failing filter aborts the chain and its error is returned;
    /// assets keep whatever changes earlier filters made.
    #[instrument(skip_all, fields(filters = filters.len()))]
    pub fn run(&mut self, filters: &[Filter]) -> AssetlineResult<()> {
        for filter in filters {
            debug!(filter = filter.name(), assets = self.len(), "Applying filter");
            filter.apply(self)?;
        }
        Ok(())
    }
}

// -------------------------------------------------------------------------
// Constructors
// -------------------------------------------------------------------------

pub use asset::{add_header, replace_path, replace_pattern, str_transform, trace};
pub use pipeline::{cat, load, write};
