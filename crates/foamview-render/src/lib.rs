//! # Foamview Render
//!
//! The preview rendering pipeline: turns a note's markup source into an HTML
//! fragment for live preview, with the Foam link dialect layered over
//! CommonMark:
//!
//! - `[[note]]` / `[[note|alias]]` wikilinks, resolved against a workspace
//!   index, with placeholder styling for missing targets
//! - `![[note]]` / `![[note#section]]` transclusion, recursively expanded
//!   with cycle suppression
//! - `#tag` tags
//! - pruning of reference definitions that would otherwise hijack wikilink
//!   syntax through the renderer's native reference-link feature
//!
//! ## Architecture
//!
//! Rendering is a left-to-right fold of an ordered [`MarkupStage`] list over
//! the source text, then a pulldown-cmark finish pass. Token stages scan
//! with compiled regexes, skip code/HTML/frontmatter ranges, and substitute
//! HTML fragments in place. The transclusion stage re-enters the pipeline
//! recursively, threading an explicit visitation stack for cycle safety.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use foamview_index::NoteIndex;
//! use foamview_render::Renderer;
//!
//! let index = NoteIndex::from_documents([
//!     ("greeting.md", "# Greeting\n\nhello from the other note"),
//! ]);
//! let renderer = Renderer::new(Arc::new(index));
//!
//! let html = renderer.render("See [[greeting]] and ![[greeting]]");
//! assert!(html.contains("class='foam-note-link'"));
//! assert!(html.contains("hello from the other note"));
//! ```

mod exclusions;
pub mod fragments;
mod pipeline;
pub mod stages;

pub use pipeline::{
    ALIAS_DIVIDER, MarkupStage, RenderState, Renderer, Replacement, StageContext, VisitationStack,
};
pub use stages::{
    ClearConflictingReferences, ConnectWikilinks, IncludeNotes, RenderTags, default_stages,
};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::fragments::{cyclic_warning, note_link, placeholder_link, tag_span};
    pub use crate::{MarkupStage, RenderState, Renderer, Replacement, StageContext};
    pub use foamview_core::prelude::*;
}
