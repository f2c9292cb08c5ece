//! Pipeline Service - runs manifest tasks.
//!
//! This service turns a declarative [`Task`] into a runnable filter chain:
//! 1. Check the staleness guard (unless forced)
//! 2. Build the filters (construction errors surface before any I/O)
//! 3. Run them over a fresh pipeline

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{
        filter::{self, Filter},
        ports::Filesystem,
        services::staleness,
    },
    domain::{FilterSpec, Pipeline, Task},
    error::AssetlineResult,
};

/// What happened to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum RunOutcome {
    /// The chain ran; `assets` were left in the pipeline at the end.
    Built { assets: usize },
    /// The guard found every destination up to date.
    Skipped,
}

/// Result of running one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub task: String,
    #[serde(flatten)]
    pub outcome: RunOutcome,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            RunOutcome::Built { assets } => {
                write!(f, "{}: built ({} asset{})", self.task, assets, plural(assets))
            }
            RunOutcome::Skipped => write!(f, "{}: up to date", self.task),
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Runs tasks against a [`Filesystem`].
pub struct PipelineService {
    fs: Arc<dyn Filesystem>,
}

impl PipelineService {
    pub fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self { fs }
    }

    /// Build the runnable chain for `task`.
    pub fn build_filters(&self, task: &Task) -> AssetlineResult<Vec<Filter>> {
        task.validate()?;
        task.filters
            .iter()
            .map(|spec| self.build_filter(spec))
            .collect()
    }

    fn build_filter(&self, spec: &FilterSpec) -> AssetlineResult<Filter> {
        let built = match spec {
            FilterSpec::Load { patterns } => filter::load(self.fs.clone(), patterns.iter().cloned()),
            FilterSpec::ReplacePath { from, to } => filter::replace_path(from.as_str(), to.as_str()),
            FilterSpec::ReplacePattern {
                pattern,
                replacement,
            } => filter::replace_pattern(pattern, replacement.as_str())?,
            FilterSpec::AddHeader { header } => filter::add_header(header.as_str()),
            FilterSpec::Str { transform } => {
                let transform = *transform;
                filter::str_transform(move |s| transform.apply(s))
            }
            FilterSpec::Cat { join, dest } => filter::cat(join.as_str(), dest.as_str()),
            FilterSpec::Trace => filter::trace(),
            FilterSpec::Write => filter::write(self.fs.clone()),
        };
        Ok(built)
    }

    /// `true` when files matching `dest` must be regenerated from `src`.
    pub fn is_outdated<S: AsRef<str>, D: AsRef<str>>(&self, src: &[S], dest: &[D]) -> bool {
        staleness::outdated(self.fs.as_ref(), src, dest)
    }

    /// Run a single task.
    ///
    /// With a guard and `force == false`, the task is skipped when nothing
    /// is outdated.
    #[instrument(skip_all, fields(task = %task.name, force))]
    pub fn run_task(&self, task: &Task, force: bool) -> AssetlineResult<RunReport> {
        let chain = self.build_filters(task)?;

        if let Some(guard) = task.guard.as_ref().filter(|_| !force) {
            if !self.is_outdated(&guard.src, &guard.dest) {
                info!("Task is up to date");
                return Ok(RunReport {
                    task: task.name.clone(),
                    outcome: RunOutcome::Skipped,
                });
            }
        }

        let mut pipeline = Pipeline::new();
        pipeline.run(&chain)?;

        info!(assets = pipeline.len(), "Task completed");
        Ok(RunReport {
            task: task.name.clone(),
            outcome: RunOutcome::Built {
                assets: pipeline.len(),
            },
        })
    }

    /// Run `tasks` in order, stopping at the first failure.
    pub fn run_all(&self, tasks: &[Task], force: bool) -> AssetlineResult<Vec<RunReport>> {
        tasks.iter().map(|task| self.run_task(task, force)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::MockFilesystem,
        domain::{DomainError, FileInfo, Guard, StrTransform},
        error::AssetlineError,
    };
    use mockall::predicate::eq;
    use std::path::Path;
    use std::time::{Duration, SystemTime};

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn build_task() -> Task {
        Task::new("build")
            .with_filter(FilterSpec::Load {
                patterns: vec!["src/*.txt".into()],
            })
            .with_filter(FilterSpec::ReplacePath {
                from: "src/".into(),
                to: "dist/".into(),
            })
            .with_filter(FilterSpec::Str {
                transform: StrTransform::Uppercase,
            })
            .with_filter(FilterSpec::Write)
    }

    #[test]
    fn run_task_builds_and_writes() {
        let mut fs = MockFilesystem::new();
        fs.expect_glob()
            .with(eq("src/*.txt"))
            .returning(|_| Ok(vec![FileInfo::new("src/a.txt", false, at(1))]));
        fs.expect_read_file().returning(|_| Ok(b"hello".to_vec()));
        fs.expect_create_dir_all()
            .with(eq(Path::new("dist")))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .with(eq(Path::new("dist/a.txt")), eq(b"HELLO".as_slice()))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = PipelineService::new(Arc::new(fs));
        let report = service.run_task(&build_task(), false).unwrap();

        assert_eq!(report.outcome, RunOutcome::Built { assets: 1 });
        assert_eq!(report.to_string(), "build: built (1 asset)");
    }

    #[test]
    fn up_to_date_guard_skips_the_chain() {
        let mut fs = MockFilesystem::new();
        fs.expect_glob()
            .with(eq("src/*.txt"))
            .returning(|_| Ok(vec![FileInfo::new("src/a.txt", false, at(1))]));
        fs.expect_glob()
            .with(eq("dist/*.txt"))
            .returning(|_| Ok(vec![FileInfo::new("dist/a.txt", false, at(5))]));
        fs.expect_read_file().never();
        fs.expect_write_file().never();

        let task = build_task().with_guard(Guard {
            src: vec!["src/*.txt".into()],
            dest: vec!["dist/*.txt".into()],
        });
        let report = PipelineService::new(Arc::new(fs))
            .run_task(&task, false)
            .unwrap();

        assert_eq!(report.outcome, RunOutcome::Skipped);
        assert_eq!(report.to_string(), "build: up to date");
    }

    #[test]
    fn force_ignores_the_guard() {
        let mut fs = MockFilesystem::new();
        fs.expect_glob()
            .with(eq("src/*.txt"))
            .times(1)
            .returning(|_| Ok(vec![FileInfo::new("src/a.txt", false, at(1))]));
        fs.expect_read_file().returning(|_| Ok(b"x".to_vec()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));

        let task = build_task().with_guard(Guard {
            src: vec!["src/*.txt".into()],
            dest: vec!["dist/*.txt".into()],
        });
        let report = PipelineService::new(Arc::new(fs))
            .run_task(&task, true)
            .unwrap();

        assert_eq!(report.outcome, RunOutcome::Built { assets: 1 });
    }

    #[test]
    fn invalid_regex_fails_before_any_io() {
        let mut fs = MockFilesystem::new();
        fs.expect_glob().never();

        let task = Task::new("broken")
            .with_filter(FilterSpec::Load {
                patterns: vec!["*.txt".into()],
            })
            .with_filter(FilterSpec::ReplacePattern {
                pattern: "(".into(),
                replacement: String::new(),
            });
        let err = PipelineService::new(Arc::new(fs))
            .run_task(&task, false)
            .unwrap_err();

        assert!(matches!(
            err,
            AssetlineError::Domain(DomainError::FilterConstruction { .. })
        ));
    }

    #[test]
    fn build_filters_keeps_declared_order() {
        let service = PipelineService::new(Arc::new(MockFilesystem::new()));
        let task = Task::new("names")
            .with_filter(FilterSpec::Trace)
            .with_filter(FilterSpec::Cat {
                join: "\n".into(),
                dest: "all.txt".into(),
            })
            .with_filter(FilterSpec::AddHeader {
                header: "# h\n".into(),
            });

        let names: Vec<_> = service
            .build_filters(&task)
            .unwrap()
            .iter()
            .map(Filter::name)
            .collect();
        assert_eq!(names, ["trace", "cat", "add-header"]);
    }

    #[test]
    fn task_without_filters_is_rejected() {
        let service = PipelineService::new(Arc::new(MockFilesystem::new()));
        let err = service.build_filters(&Task::new("empty")).unwrap_err();
        assert!(matches!(
            err,
            AssetlineError::Domain(DomainError::InvalidTask { .. })
        ));
    }

    #[test]
    fn run_all_stops_at_first_failure() {
        let mut fs = MockFilesystem::new();
        fs.expect_glob().returning(|_| Ok(vec![]));
        fs.expect_exists().returning(|_| false);

        let tasks = vec![
            Task::new("first").with_filter(FilterSpec::Load {
                patterns: vec!["missing/*.txt".into()],
            }),
            Task::new("second").with_filter(FilterSpec::Trace),
        ];
        let err = PipelineService::new(Arc::new(fs))
            .run_all(&tasks, false)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
