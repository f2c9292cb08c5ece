//! `assetline run` - run manifest tasks.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use assetline_adapters::{LocalFilesystem, Manifest, TaskLoader};
use assetline_core::{
    application::{PipelineService, RunOutcome},
    domain::Task,
};

use crate::{
    cli::RunArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(tasks = ?args.tasks, force = args.force, dry_run = args.dry_run))]
pub fn execute(args: RunArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manifest_path = config.manifest_path(args.manifest.as_deref());
    let manifest = TaskLoader::load(manifest_path).with_cli_context(|| "loading manifest")?;
    let tasks = select_tasks(&manifest, manifest_path, &args.tasks)?;
    debug!(selected = tasks.len(), "Tasks selected");

    let service = PipelineService::new(Arc::new(LocalFilesystem::new()));

    if args.dry_run {
        return print_plan(&service, &tasks, &output);
    }

    let mut reports = Vec::with_capacity(tasks.len());
    for task in tasks {
        let report = service.run_task(task, args.force)?;
        if !output.is_json() {
            match report.outcome {
                RunOutcome::Built { .. } => output.success(&report.to_string())?,
                RunOutcome::Skipped => output.info(&report.to_string())?,
            }
        }
        reports.push(report);
    }

    if output.is_json() {
        output.json(&reports)?;
    }
    Ok(())
}

/// Pick tasks by name, in the order given; every task when `names` is empty.
fn select_tasks<'m>(
    manifest: &'m Manifest,
    manifest_path: &Path,
    names: &[String],
) -> CliResult<Vec<&'m Task>> {
    if names.is_empty() {
        return Ok(manifest.tasks.iter().collect());
    }

    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| {
            if !seen.insert(name.as_str()) {
                return Err(CliError::InvalidInput {
                    message: format!("task '{name}' given more than once"),
                    source: None,
                });
            }
            manifest.task(name).ok_or_else(|| CliError::TaskNotFound {
                name: name.clone(),
                manifest: manifest_path.to_path_buf(),
                available: manifest.task_names().map(str::to_owned).collect(),
            })
        })
        .collect()
}

/// Show what each task would do. Filters are still built so bad patterns
/// are reported, but nothing is read or written.
fn print_plan(service: &PipelineService, tasks: &[&Task], output: &OutputManager) -> CliResult<()> {
    for task in tasks {
        service.build_filters(task)?;
    }

    if output.is_json() {
        output.json(tasks)?;
        return Ok(());
    }

    for task in tasks {
        output.header(&task.name)?;
        if let Some(guard) = &task.guard {
            output.print(&format!(
                "  guard: {} -> {}",
                guard.src.join(" "),
                guard.dest.join(" ")
            ))?;
        }
        for (i, filter) in task.filters.iter().enumerate() {
            output.print(&format!("  {}. {}", i + 1, filter))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetline_core::domain::FilterSpec;

    fn manifest() -> Manifest {
        Manifest {
            tasks: ["views", "bundle", "css"]
                .into_iter()
                .map(|name| Task::new(name).with_filter(FilterSpec::Trace))
                .collect(),
        }
    }

    fn names(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn no_names_selects_every_task_in_manifest_order() {
        let manifest = manifest();
        let tasks = select_tasks(&manifest, Path::new("m.toml"), &[]).unwrap();
        assert_eq!(names(&tasks), ["views", "bundle", "css"]);
    }

    #[test]
    fn names_select_in_given_order() {
        let manifest = manifest();
        let tasks =
            select_tasks(&manifest, Path::new("m.toml"), &["css".into(), "views".into()]).unwrap();
        assert_eq!(names(&tasks), ["css", "views"]);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let manifest = manifest();
        let err = select_tasks(&manifest, Path::new("m.toml"), &["js".into()]).unwrap_err();
        match err {
            CliError::TaskNotFound { name, available, .. } => {
                assert_eq!(name, "js");
                assert_eq!(available, ["views", "bundle", "css"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn repeated_name_is_invalid_input() {
        let manifest = manifest();
        let err = select_tasks(&manifest, Path::new("m.toml"), &["css".into(), "css".into()])
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }
}
