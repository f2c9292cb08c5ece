//! Glob Resolver - expands pattern sets into ordered file listings.
//!
//! The `Filesystem` port expands one pattern at a time; this service merges
//! the results, applies `!` exclusions, and decides when an empty expansion
//! means "not found".

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::FileInfo,
    error::AssetlineResult,
};

/// Result of resolving a pattern set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobMatches {
    /// Deduplicated entries, ordered by path.
    pub entries: Vec<FileInfo>,
    /// Raw number of matches across all include patterns, before dedup.
    pub matched: usize,
}

impl GlobMatches {
    /// Entries that are not directories.
    pub fn files(&self) -> impl Iterator<Item = &FileInfo> {
        self.entries.iter().filter(|info| !info.is_dir())
    }
}

/// Resolves glob pattern sets through a [`Filesystem`].
pub struct GlobResolver<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> GlobResolver<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Resolve `patterns` in order.
    ///
    /// A pattern prefixed with `!` removes its matches from the final set.
    /// An include pattern that matches nothing fails with a not-found
    /// resolution error when its wildcard-free leading path does not exist.
    #[instrument(skip_all, fields(patterns = patterns.len()))]
    pub fn resolve<S: AsRef<str>>(&self, patterns: &[S]) -> AssetlineResult<GlobMatches> {
        let mut found: BTreeMap<PathBuf, FileInfo> = BTreeMap::new();
        let mut excluded: BTreeSet<PathBuf> = BTreeSet::new();
        let mut matched = 0;

        for pattern in patterns {
            let pattern = pattern.as_ref();

            if let Some(negated) = pattern.strip_prefix('!') {
                for info in self.fs.glob(negated)? {
                    excluded.insert(info.path().to_path_buf());
                }
                continue;
            }

            let entries = self.fs.glob(pattern)?;
            if entries.is_empty() {
                let base = literal_base(pattern);
                if !base.as_os_str().is_empty() && !self.fs.exists(&base) {
                    return Err(ApplicationError::not_found(
                        pattern,
                        format!("{} does not exist", base.display()),
                    )
                    .into());
                }
                debug!(pattern, "Pattern matched nothing");
            }

            matched += entries.len();
            for info in entries {
                found.entry(info.path().to_path_buf()).or_insert(info);
            }
        }

        let entries: Vec<FileInfo> = found
            .into_iter()
            .filter(|(path, _)| !excluded.contains(path))
            .map(|(_, info)| info)
            .collect();

        debug!(entries = entries.len(), matched, "Patterns resolved");
        Ok(GlobMatches { entries, matched })
    }
}

/// Leading components of `pattern` that contain no wildcard characters.
pub(crate) fn literal_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    for component in Path::new(pattern).components() {
        if let Component::Normal(part) = component {
            if part.to_string_lossy().contains(['*', '?', '[']) {
                break;
            }
        }
        base.push(component);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use mockall::predicate::eq;
    use std::time::SystemTime;

    fn file(path: &str) -> FileInfo {
        FileInfo::new(path, false, SystemTime::UNIX_EPOCH)
    }

    #[test]
    fn literal_base_stops_at_first_wildcard() {
        assert_eq!(literal_base("fixtures/*.txt"), PathBuf::from("fixtures"));
        assert_eq!(literal_base("a/b/**/c?.md"), PathBuf::from("a/b"));
        assert_eq!(literal_base("a.tmpl"), PathBuf::from("a.tmpl"));
        assert_eq!(literal_base("*.txt"), PathBuf::new());
        assert_eq!(literal_base("/abs/[ab].txt"), PathBuf::from("/abs"));
    }

    #[test]
    fn empty_pattern_list_is_empty_result() {
        let fs = MockFilesystem::new();
        let patterns: [&str; 0] = [];
        let matches = GlobResolver::new(&fs).resolve(&patterns).unwrap();
        assert_eq!(matches, GlobMatches::default());
    }

    #[test]
    fn results_are_deduplicated_and_path_ordered() {
        let mut fs = MockFilesystem::new();
        fs.expect_glob()
            .with(eq("src/*.txt"))
            .returning(|_| Ok(vec![file("src/b.txt"), file("src/a.txt")]));
        fs.expect_glob()
            .with(eq("src/a.*"))
            .returning(|_| Ok(vec![file("src/a.txt")]));

        let matches = GlobResolver::new(&fs)
            .resolve(&["src/*.txt", "src/a.*"])
            .unwrap();

        let paths: Vec<_> = matches.entries.iter().map(|f| f.path().to_path_buf()).collect();
        assert_eq!(paths, [PathBuf::from("src/a.txt"), PathBuf::from("src/b.txt")]);
        assert_eq!(matches.matched, 3);
    }

    #[test]
    fn exclusions_remove_matches() {
        let mut fs = MockFilesystem::new();
        fs.expect_glob()
            .with(eq("src/*.js"))
            .returning(|_| Ok(vec![file("src/app.js"), file("src/app.min.js")]));
        fs.expect_glob()
            .with(eq("src/*.min.js"))
            .returning(|_| Ok(vec![file("src/app.min.js")]));

        let matches = GlobResolver::new(&fs)
            .resolve(&["!src/*.min.js", "src/*.js"])
            .unwrap();

        assert_eq!(matches.entries, vec![file("src/app.js")]);
    }

    #[test]
    fn missing_base_directory_is_not_found() {
        let mut fs = MockFilesystem::new();
        fs.expect_glob().returning(|_| Ok(vec![]));
        fs.expect_exists()
            .with(eq(Path::new("missing")))
            .returning(|_| false);

        let err = GlobResolver::new(&fs).resolve(&["missing/*.txt"]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn existing_base_with_no_matches_is_empty() {
        let mut fs = MockFilesystem::new();
        fs.expect_glob().returning(|_| Ok(vec![]));
        fs.expect_exists().returning(|_| true);

        let matches = GlobResolver::new(&fs).resolve(&["out/*.txt"]).unwrap();
        assert!(matches.entries.is_empty());
        assert_eq!(matches.matched, 0);
    }

    #[test]
    fn adapter_errors_propagate() {
        let mut fs = MockFilesystem::new();
        fs.expect_glob().returning(|pattern| {
            Err(ApplicationError::Resolution {
                pattern: pattern.into(),
                kind: crate::application::ResolutionKind::Other,
                reason: "invalid pattern".into(),
            }
            .into())
        });

        let err = GlobResolver::new(&fs).resolve(&["[z-a]"]).unwrap_err();
        assert!(!err.is_not_found());
    }
}
