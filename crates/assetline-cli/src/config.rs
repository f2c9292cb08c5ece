//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `ASSETLINE_*` environment variables, e.g. `ASSETLINE_MANIFEST__PATH`
//! 3. Config file (`--config FILE`, or the platform config dir if present)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Task manifest settings.
    pub manifest: ManifestConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Manifest used when `--manifest` is not given.
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

pub const DEFAULT_MANIFEST: &str = "assetline.toml";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            manifest: ManifestConfig {
                path: PathBuf::from(DEFAULT_MANIFEST),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration on top of the built-in defaults.
    ///
    /// A file named with `--config` must exist; the platform default file
    /// is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default(
                "manifest.path",
                defaults.manifest.path.to_string_lossy().into_owned(),
            )?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::from(Self::config_path()).required(false)),
        };

        let config = builder
            .add_source(Environment::with_prefix("ASSETLINE").separator("__"))
            .build()
            .with_context(|| match config_file {
                Some(path) => format!("Failed to read configuration from {}", path.display()),
                None => "Failed to read configuration".to_string(),
            })?;

        config
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `.assetline.toml`
    /// in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "assetline", "assetline")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".assetline.toml"))
    }

    /// Manifest to use: the explicit override if any, else the configured one.
    pub fn manifest_path<'a>(&'a self, explicit: Option<&'a Path>) -> &'a Path {
        explicit.unwrap_or(&self.manifest.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_manifest_is_assetline_toml() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.manifest.path, PathBuf::from("assetline.toml"));
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("cfg.toml");
        fs::write(&file, "[manifest]\npath = \"build/tasks.toml\"\n").unwrap();

        let cfg = AppConfig::load(Some(&file)).unwrap();
        assert_eq!(cfg.manifest.path, PathBuf::from("build/tasks.toml"));
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&file)).is_err());
    }

    #[test]
    fn manifest_path_prefers_explicit() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.manifest_path(None), Path::new("assetline.toml"));
        assert_eq!(
            cfg.manifest_path(Some(Path::new("other.toml"))),
            Path::new("other.toml")
        );
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
