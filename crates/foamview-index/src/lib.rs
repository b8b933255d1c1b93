//! # Foamview Index
//!
//! Workspace note index for the foamview preview system.
//!
//! This crate provides:
//! - Directory scanning with exclusion/extension/size rules ([`NoteIndex::open`])
//! - In-memory indexing for tests and embedding ([`NoteIndex::from_documents`])
//! - Per-note structural parsing via `pulldown-cmark`: frontmatter title,
//!   headings, and derived sections with half-open line ranges
//! - Name resolution by path, stem, title, and trailing path, exposed through
//!   the [`WorkspaceIndex`](foamview_core::WorkspaceIndex) interface
//!
//! ## Quick Start
//!
//! ```
//! use foamview_core::WorkspaceIndex;
//! use foamview_index::NoteIndex;
//!
//! let index = NoteIndex::from_documents([
//!     ("inbox.md", "# Inbox\n\n## Today\n- capture"),
//! ]);
//!
//! let note = index.find("inbox").unwrap().unwrap();
//! assert_eq!(note.title, "Inbox");
//!
//! let section = index.find_section(&note, "Today").unwrap().unwrap();
//! assert_eq!(section.range.start, 2);
//! ```

mod index;
mod note;

pub use index::NoteIndex;
pub use note::{parse_note, slugify};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::{NoteIndex, parse_note, slugify};
    pub use foamview_core::prelude::*;
}
