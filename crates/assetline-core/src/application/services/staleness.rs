//! Staleness Checker - decides whether generated files need rebuilding.
//!
//! The comparison is all-pairs: if ANY source is newer than ANY destination
//! the whole set is outdated. Resolution failures never propagate; they
//! count as outdated.

use tracing::{debug, error, instrument};

use crate::{
    application::{ports::Filesystem, services::glob_resolver::GlobResolver},
    domain::FileInfo,
};

/// `true` when `dest` must be regenerated from `src`.
///
/// For example `*.go.html -> *.go`: if any template changed, regenerate.
#[instrument(skip_all, fields(src = src.len(), dest = dest.len()))]
pub fn outdated<S, D>(fs: &dyn Filesystem, src: &[S], dest: &[D]) -> bool
where
    S: AsRef<str>,
    D: AsRef<str>,
{
    let Some(src_files) = resolve_side(fs, "src", src) else {
        return true;
    };
    let Some(dest_files) = resolve_side(fs, "dest", dest) else {
        return true;
    };

    if src_files.is_empty() {
        debug!("No sources matched, nothing to rebuild");
        return false;
    }

    // TODO: compare sources to their own outputs once tasks can describe a
    // one-to-one src/dest mapping.
    for src in &src_files {
        for dest in &dest_files {
            if src.modified() > dest.modified() {
                debug!(
                    src = %src.path().display(),
                    dest = %dest.path().display(),
                    "Source is newer than destination"
                );
                return true;
            }
        }
    }
    false
}

fn resolve_side<S: AsRef<str>>(
    fs: &dyn Filesystem,
    side: &'static str,
    patterns: &[S],
) -> Option<Vec<FileInfo>> {
    match GlobResolver::new(fs).resolve(patterns) {
        Ok(matches) => Some(matches.entries),
        Err(e) if e.is_not_found() => {
            debug!(side, error = %e, "Missing files, treating as outdated");
            None
        }
        Err(e) => {
            error!(side, error = %e, "Outdated {} error", side);
            None
        }
    }
}
