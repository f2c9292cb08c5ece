//! Per-asset filters.

use regex::Regex;
use tracing::debug;

use super::{AssetFilter, Filter};
use crate::{
    domain::{Asset, DomainError},
    error::AssetlineResult,
};

/// Rewrites the leading part of the write path.
///
/// ```text
/// ReplacePath("src/", "dist/")   src/x/y.txt -> dist/x/y.txt
/// ```
///
/// Assets whose write path does not start with `from` pass through
/// unchanged. Run it before `write`.
#[derive(Debug, Clone)]
pub struct ReplacePath {
    from: String,
    to: String,
}

impl AssetFilter for ReplacePath {
    fn name(&self) -> &'static str {
        "replace-path"
    }

    fn apply(&self, asset: &mut Asset) -> AssetlineResult<()> {
        let Some(rest) = asset.write_path.strip_prefix(self.from.as_str()) else {
            return Ok(());
        };
        let new_path = format!("{}{}", self.to, rest);
        debug!(from = %asset.write_path, to = %new_path, "ReplacePath");
        asset.write_path = new_path;
        Ok(())
    }
}

pub fn replace_path(from: impl Into<String>, to: impl Into<String>) -> Filter {
    Filter::asset(ReplacePath {
        from: from.into(),
        to: to.into(),
    })
}

/// Regex substitution over the content of text assets.
#[derive(Debug, Clone)]
pub struct ReplacePattern {
    regex: Regex,
    replacement: String,
}

impl ReplacePattern {
    /// Compiles `pattern` once; an invalid pattern fails here, never per asset.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, DomainError> {
        let regex = Regex::new(pattern).map_err(|e| DomainError::FilterConstruction {
            filter: "replace-pattern",
            reason: e.to_string(),
        })?;
        Ok(Self {
            regex,
            replacement: replacement.into(),
        })
    }
}

impl AssetFilter for ReplacePattern {
    fn name(&self) -> &'static str {
        "replace-pattern"
    }

    fn apply(&self, asset: &mut Asset) -> AssetlineResult<()> {
        if let Some(text) = asset.text() {
            if !text.is_empty() {
                let replaced = self.regex.replace_all(text, self.replacement.as_str());
                let replaced = replaced.into_owned();
                asset.rewrite_string(replaced);
            }
        }
        Ok(())
    }
}

pub fn replace_pattern(
    pattern: &str,
    replacement: impl Into<String>,
) -> Result<Filter, DomainError> {
    Ok(Filter::asset(ReplacePattern::new(pattern, replacement)?))
}

/// Prepends a header to text assets unless it is already there.
#[derive(Debug, Clone)]
pub struct AddHeader {
    header: String,
}

impl AssetFilter for AddHeader {
    fn name(&self) -> &'static str {
        "add-header"
    }

    fn apply(&self, asset: &mut Asset) -> AssetlineResult<()> {
        if !asset.is_text() || asset.bytes().starts_with(self.header.as_bytes()) {
            return Ok(());
        }
        let mut content = Vec::with_capacity(self.header.len() + asset.len());
        content.extend_from_slice(self.header.as_bytes());
        content.extend_from_slice(asset.bytes());
        asset.set_bytes(content);
        Ok(())
    }
}

pub fn add_header(header: impl Into<String>) -> Filter {
    Filter::asset(AddHeader {
        header: header.into(),
    })
}

/// Replaces the content of text assets with `transform(content)`.
pub struct Str {
    transform: Box<dyn Fn(&str) -> String + Send + Sync>,
}

impl AssetFilter for Str {
    fn name(&self) -> &'static str {
        "str"
    }

    fn apply(&self, asset: &mut Asset) -> AssetlineResult<()> {
        if let Some(text) = asset.text() {
            let transformed = (self.transform)(text);
            asset.rewrite_string(transformed);
        }
        Ok(())
    }
}

pub fn str_transform<F>(transform: F) -> Filter
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    Filter::asset(Str {
        transform: Box::new(transform),
    })
}

/// Logs a dump of each asset at debug level. Never mutates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl AssetFilter for Trace {
    fn name(&self) -> &'static str {
        "trace"
    }

    fn apply(&self, asset: &mut Asset) -> AssetlineResult<()> {
        debug!(target: "assetline::trace", "{}", asset.dump());
        Ok(())
    }
}

pub fn trace() -> Filter {
    Filter::asset(Trace)
}
