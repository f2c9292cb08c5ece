//! Pipeline-level filters.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::{Filter, PipelineFilter};
use crate::{
    application::{ApplicationError, ports::Filesystem, services::glob_resolver::GlobResolver},
    domain::{Asset, Pipeline},
    error::AssetlineResult,
};

/// Concatenates every asset into a single synthesized asset.
///
/// `join` goes between consecutive assets, not after the last one. This is
/// the only built-in filter that replaces the asset sequence.
#[derive(Debug, Clone)]
pub struct Cat {
    join: String,
    dest: String,
}

impl PipelineFilter for Cat {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn apply(&self, pipeline: &mut Pipeline) -> AssetlineResult<()> {
        let mut buffer = Vec::new();
        for (i, asset) in pipeline.assets().iter().enumerate() {
            if i > 0 {
                buffer.extend_from_slice(self.join.as_bytes());
            }
            buffer.extend_from_slice(asset.bytes());
        }

        debug!(assets = pipeline.len(), dest = %self.dest, "Concatenating assets");
        pipeline.truncate();
        pipeline.add_asset(Asset::new(self.dest.clone(), buffer));
        Ok(())
    }
}

pub fn cat(join: impl Into<String>, dest: impl Into<String>) -> Filter {
    Filter::pipeline(Cat {
        join: join.into(),
        dest: dest.into(),
    })
}

/// Reads every file matched by the patterns into a new asset.
///
/// The whole file is loaded into memory, binary or text. Directories are
/// skipped. Assets are appended in glob-result order.
pub struct Load {
    fs: Arc<dyn Filesystem>,
    patterns: Vec<String>,
}

impl PipelineFilter for Load {
    fn name(&self) -> &'static str {
        "load"
    }

    #[instrument(skip_all, fields(patterns = ?self.patterns))]
    fn apply(&self, pipeline: &mut Pipeline) -> AssetlineResult<()> {
        let matches = GlobResolver::new(self.fs.as_ref()).resolve(&self.patterns)?;

        let mut loaded = 0;
        for info in matches.files() {
            let content = self.fs.read_file(info.path())?;
            pipeline.add_asset(Asset::from_file(info.clone(), content));
            loaded += 1;
        }

        debug!(loaded, matched = matches.matched, "Assets loaded");
        Ok(())
    }
}

pub fn load<I, S>(fs: Arc<dyn Filesystem>, patterns: I) -> Filter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Filter::pipeline(Load {
        fs,
        patterns: patterns.into_iter().map(Into::into).collect(),
    })
}

/// Writes every asset to its write path.
///
/// Parent directories are created on demand and remembered for the rest of
/// the call. The first failure stops the write; files already written stay.
pub struct Write {
    fs: Arc<dyn Filesystem>,
}

impl PipelineFilter for Write {
    fn name(&self) -> &'static str {
        "write"
    }

    #[instrument(skip_all, fields(assets = pipeline.len()))]
    fn apply(&self, pipeline: &mut Pipeline) -> AssetlineResult<()> {
        let mut made_dirs: HashSet<PathBuf> = HashSet::new();

        for asset in pipeline.assets() {
            if asset.write_path.is_empty() {
                return Err(ApplicationError::Write {
                    path: PathBuf::new(),
                    reason: "asset has an empty write path".into(),
                }
                .into());
            }
            let path = Path::new(&asset.write_path);

            if let Some(parent) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                // `out/./css` and `out/css` share one entry
                let dir: PathBuf = parent.components().collect();
                if made_dirs.insert(dir.clone()) {
                    self.fs.create_dir_all(&dir)?;
                }
            }

            self.fs.write_file(path, asset.bytes())?;
            debug!(path = %asset.write_path, bytes = asset.len(), "Asset written");
        }

        info!(files = pipeline.len(), "Pipeline written");
        Ok(())
    }
}

pub fn write(fs: Arc<dyn Filesystem>) -> Filter {
    Filter::pipeline(Write { fs })
}
