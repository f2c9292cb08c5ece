//! `assetline outdated` - report whether outputs need rebuilding.

use std::process::ExitCode;

use serde::Serialize;

use assetline_adapters::LocalFilesystem;
use assetline_core::application::outdated;

use crate::{cli::OutdatedArgs, error::CliResult, output::OutputManager};

#[derive(Debug, Serialize)]
struct OutdatedReport<'a> {
    outdated: bool,
    src: &'a [String],
    dest: &'a [String],
}

/// Exit status 1 means "outdated" only when `--exit-code` is given.
pub fn execute(args: OutdatedArgs, output: OutputManager) -> CliResult<ExitCode> {
    let stale = outdated(&LocalFilesystem::new(), &args.src, &args.dest);

    if output.is_json() {
        output.json(&OutdatedReport {
            outdated: stale,
            src: &args.src,
            dest: &args.dest,
        })?;
    } else if stale {
        output.warning("Outdated: sources are newer than destinations")?;
    } else {
        output.success("Up to date")?;
    }

    Ok(if stale && args.exit_code {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
