//! Core data models representing workspace notes.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Cloneable**: `Arc<T>` friendly for shared ownership
//! - **Read-only to renderers**: the preview pipeline only ever reads
//!   resources, it never mutates them

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Half-open range of 0-based line numbers: `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// Create a new line range
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of lines covered by the range
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the range covers no lines
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A named section of a note, derived from a heading.
///
/// The range spans from the heading's own line to the line before the next
/// heading of the same or shallower level (end-exclusive).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    /// Heading text as written
    pub label: String,
    /// Anchor form of the label (lowercased, hyphen-separated)
    pub slug: String,
    pub range: LineRange,
}

/// A workspace-tracked note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Workspace-relative path, the canonical identifier
    pub path: PathBuf,
    /// Display title: frontmatter `title`, else first H1, else file stem
    pub title: String,
    /// Full source text, including any frontmatter
    pub text: String,
    /// Named sections in document order
    pub sections: Vec<Section>,
}

impl Resource {
    /// File stem of the note path, lowercased. Used for name resolution.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Normalized identifier used for cycle detection during transclusion.
    pub fn identifier(&self) -> String {
        self.path.to_string_lossy().to_lowercase()
    }

    /// Workspace-relative path with forward slashes, for hrefs.
    pub fn href_path(&self) -> String {
        self.path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Outcome of resolving a `[[wikilink]]` against the workspace index.
#[derive(Debug, Clone)]
pub enum ResolvedLink {
    /// Target exists; render an anchor with `label` as visible text
    Found {
        resource: Arc<Resource>,
        label: String,
    },
    /// No matching resource; render a placeholder with `name` as visible text
    NotFound { name: String },
}

/// Pre-computed line starts for O(log n) offset-to-line lookup.
///
/// Build once per document, then use for all position lookups.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offsets where each line starts (line 0 = offset 0)
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build line index in O(n) - do once per document.
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// 0-based line containing the byte offset, via binary search.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insertion) => insertion - 1,
        }
    }

    /// Total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
