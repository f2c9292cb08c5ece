use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A named, reusable filter chain with an optional staleness guard.
///
/// Tasks are plain data; `application::PipelineService` turns them into
/// runnable filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<Guard>,
    pub filters: Vec<FilterSpec>,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            guard: None,
            filters: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidTask {
                task: self.name.clone(),
                reason: "name cannot be empty".into(),
            });
        }
        if self.filters.is_empty() {
            return Err(DomainError::InvalidTask {
                task: self.name.clone(),
                reason: "task has no filters".into(),
            });
        }
        if let Some(guard) = &self.guard {
            if guard.src.is_empty() || guard.dest.is_empty() {
                return Err(DomainError::InvalidTask {
                    task: self.name.clone(),
                    reason: "guard needs both 'src' and 'dest' patterns".into(),
                });
            }
        }
        Ok(())
    }
}

/// Validate a set of tasks: each one individually, and names unique.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for task in tasks {
        task.validate()?;
        if !seen.insert(task.name.as_str()) {
            return Err(DomainError::DuplicateTask {
                name: task.name.clone(),
            });
        }
    }
    Ok(())
}

/// Source and destination patterns for the staleness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guard {
    pub src: Vec<String>,
    pub dest: Vec<String>,
}

/// Declarative description of one filter in a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FilterSpec {
    Load { patterns: Vec<String> },
    ReplacePath { from: String, to: String },
    ReplacePattern { pattern: String, replacement: String },
    AddHeader { header: String },
    Str { transform: StrTransform },
    Cat { join: String, dest: String },
    Trace,
    Write,
}

impl FilterSpec {
    /// Manifest name of the filter kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::ReplacePath { .. } => "replace-path",
            Self::ReplacePattern { .. } => "replace-pattern",
            Self::AddHeader { .. } => "add-header",
            Self::Str { .. } => "str",
            Self::Cat { .. } => "cat",
            Self::Trace => "trace",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { patterns } => write!(f, "load {}", patterns.join(" ")),
            Self::ReplacePath { from, to } => write!(f, "replace-path {from:?} -> {to:?}"),
            Self::ReplacePattern {
                pattern,
                replacement,
            } => write!(f, "replace-pattern /{pattern}/ -> {replacement:?}"),
            Self::AddHeader { header } => write!(f, "add-header {header:?}"),
            Self::Str { transform } => write!(f, "str {transform}"),
            Self::Cat { join, dest } => write!(f, "cat {join:?} -> {dest}"),
            Self::Trace => write!(f, "trace"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Named text transforms available to the `str` filter from a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrTransform {
    Uppercase,
    Lowercase,
    Trim,
    TrimEnd,
}

impl StrTransform {
    pub fn apply(self, input: &str) -> String {
        match self {
            Self::Uppercase => input.to_uppercase(),
            Self::Lowercase => input.to_lowercase(),
            Self::Trim => input.trim().to_string(),
            Self::TrimEnd => input.trim_end().to_string(),
        }
    }
}

impl fmt::Display for StrTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uppercase => write!(f, "uppercase"),
            Self::Lowercase => write!(f, "lowercase"),
            Self::Trim => write!(f, "trim"),
            Self::TrimEnd => write!(f, "trim-end"),
        }
    }
}
