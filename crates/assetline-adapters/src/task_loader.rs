//! TOML task manifest loader.
//!
//! # `assetline.toml` format
//!
//! ```toml
//! [[tasks]]
//! name        = "views"
//! description = "Copy templates into dist/"   # optional
//!
//! [tasks.guard]                               # optional
//! src  = ["views/**/*.html"]
//! dest = ["dist/views/**/*.html"]
//!
//! [[tasks.filters]]
//! kind     = "load"
//! patterns = ["views/**/*.html"]
//!
//! [[tasks.filters]]
//! kind = "replace-path"
//! from = "views/"
//! to   = "dist/views/"
//!
//! [[tasks.filters]]
//! kind = "write"
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use assetline_core::{
    domain::{Task, validate_tasks},
    error::{AssetlineError, AssetlineResult},
};

/// Parsed and validated task manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Manifest {
    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.name.as_str())
    }
}

/// Reads task manifests from disk.
pub struct TaskLoader;

impl TaskLoader {
    /// Load and validate the manifest at `path`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> AssetlineResult<Manifest> {
        let source = fs::read_to_string(path).map_err(|e| AssetlineError::Configuration {
            message: format!("cannot read manifest {}: {}", path.display(), e),
        })?;
        let manifest = Self::parse(&source).map_err(|e| match e {
            AssetlineError::Configuration { message } => AssetlineError::Configuration {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })?;
        debug!(tasks = manifest.tasks.len(), "Manifest loaded");
        Ok(manifest)
    }

    /// Parse and validate manifest text.
    pub fn parse(source: &str) -> AssetlineResult<Manifest> {
        let manifest: Manifest =
            toml::from_str(source).map_err(|e| AssetlineError::Configuration {
                message: format!("invalid manifest: {}", e.message()),
            })?;
        validate_tasks(&manifest.tasks).map_err(|e| AssetlineError::Configuration {
            message: e.to_string(),
        })?;
        Ok(manifest)
    }
}
