//! `assetline init` - write a starter task manifest.

use std::fs;

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Starter manifest: copies `assets/` to `dist/` behind a staleness guard.
pub const STARTER_MANIFEST: &str = r#"# Assetline task manifest.
# Run all tasks with `assetline run`, or one with `assetline run <name>`.

[[tasks]]
name = "assets"
description = "Copy assets/ into dist/ with a generated-file header"

# Skip the task while every output is newer than every source.
[tasks.guard]
src = ["assets/**/*"]
dest = ["dist/**/*"]

[[tasks.filters]]
kind = "load"
patterns = ["assets/**/*"]

[[tasks.filters]]
kind = "replace-path"
from = "assets/"
to = "dist/"

[[tasks.filters]]
kind = "add-header"
header = "/* generated by assetline, do not edit */\n"

[[tasks.filters]]
kind = "write"
"#;

pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manifest_path = config.manifest.path;

    if manifest_path.exists() && !args.force {
        output.warning(&format!(
            "Manifest already exists at {}  (use --force to overwrite)",
            manifest_path.display(),
        ))?;
        return Ok(());
    }

    if let Some(parent) = manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create directory '{}'", parent.display())
        })?;
    }

    fs::write(&manifest_path, STARTER_MANIFEST).with_cli_context(|| {
        format!("Failed to write manifest to '{}'", manifest_path.display())
    })?;

    output.success(&format!("Manifest created at {}", manifest_path.display()))?;
    Ok(())
}
