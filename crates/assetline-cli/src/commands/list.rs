//! Implementation of the `assetline list` command.

use assetline_adapters::TaskLoader;
use assetline_core::domain::Task;

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manifest_path = config.manifest_path(args.manifest.as_deref());
    let manifest = TaskLoader::load(manifest_path).with_cli_context(|| "loading manifest")?;

    // the global --output-format json wins over --format
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            if manifest.tasks.is_empty() {
                output.warning(&format!("No tasks in {}", manifest_path.display()))?;
                return Ok(());
            }
            output.header("Tasks:")?;
            for task in &manifest.tasks {
                output.print(&table_row(task))?;
            }
        }

        ListFormat::List => {
            for name in manifest.task_names() {
                output.print(name)?;
            }
        }

        ListFormat::Json => output.json(&manifest.tasks)?,
    }

    Ok(())
}

fn table_row(task: &Task) -> String {
    let mut row = format!(
        "  {:<16} {} filter{}",
        task.name,
        task.filters.len(),
        if task.filters.len() == 1 { "" } else { "s" }
    );
    if task.guard.is_some() {
        row.push_str(", guarded");
    }
    if let Some(description) = &task.description {
        row.push_str("  ");
        row.push_str(description);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetline_core::domain::{FilterSpec, Guard};

    #[test]
    fn table_row_shows_counts_guard_and_description() {
        let task = Task::new("views")
            .with_description("Copy templates")
            .with_guard(Guard {
                src: vec!["a".into()],
                dest: vec!["b".into()],
            })
            .with_filter(FilterSpec::Trace)
            .with_filter(FilterSpec::Write);

        let row = table_row(&task);
        assert!(row.contains("views"));
        assert!(row.contains("2 filters, guarded"));
        assert!(row.ends_with("Copy templates"));
    }

    #[test]
    fn table_row_singular_filter() {
        let task = Task::new("t").with_filter(FilterSpec::Trace);
        assert!(table_row(&task).contains("1 filter"));
        assert!(!table_row(&task).contains("guarded"));
    }
}
