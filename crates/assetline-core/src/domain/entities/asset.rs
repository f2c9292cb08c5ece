use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::domain::entities::file_info::FileInfo;

/// Bytes inspected when deciding whether a buffer is text.
const SNIFF_LEN: usize = 512;

/// In-memory representation of one file flowing through a pipeline.
///
/// Created by `Load` (from disk) or by a synthesizing filter such as `Cat`,
/// mutated in place by later filters and consumed by `Write`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Asset {
    info: Option<FileInfo>,
    content: Vec<u8>,
    /// Destination path; filters may rewrite it.
    pub write_path: String,
}

impl Asset {
    /// Synthesized asset with no source file.
    pub fn new(write_path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            info: None,
            content: content.into(),
            write_path: write_path.into(),
        }
    }

    /// Asset read from disk; the write path starts out as the source path.
    pub fn from_file(info: FileInfo, content: Vec<u8>) -> Self {
        let write_path = info.path().to_string_lossy().into_owned();
        Self {
            info: Some(info),
            content,
            write_path,
        }
    }

    pub fn info(&self) -> Option<&FileInfo> {
        self.info.as_ref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.content
    }

    /// Content as text, if the buffer is text.
    pub fn text(&self) -> Option<&str> {
        if self.is_text() {
            std::str::from_utf8(&self.content).ok()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Replace the whole buffer.
    pub fn set_bytes(&mut self, content: impl Into<Vec<u8>>) {
        self.content = content.into();
    }

    pub fn rewrite_string(&mut self, content: impl Into<String>) {
        self.content = content.into().into_bytes();
    }

    /// Recomputed from the current buffer on every call: valid UTF-8 and no
    /// NUL byte in the first 512 bytes. An empty buffer is text.
    pub fn is_text(&self) -> bool {
        let head = &self.content[..self.content.len().min(SNIFF_LEN)];
        !head.contains(&0) && std::str::from_utf8(&self.content).is_ok()
    }

    /// Multi-line description used by the `trace` filter.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "asset {}", self.write_path);
        match &self.info {
            Some(info) => {
                let modified: DateTime<Local> = info.modified().into();
                let _ = writeln!(out, "  source:   {}", info.path().display());
                let _ = writeln!(out, "  modified: {}", modified.to_rfc3339());
            }
            None => {
                let _ = writeln!(out, "  source:   (synthesized)");
            }
        }
        let kind = if self.is_text() { "text" } else { "binary" };
        let _ = write!(out, "  content:  {} bytes, {}", self.content.len(), kind);
        out
    }
}
