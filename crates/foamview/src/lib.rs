//! # Foamview
//!
//! Facade crate for the foamview preview system: index a notes workspace,
//! then render any note's markup into an HTML fragment with the Foam link
//! dialect (`[[wikilinks]]`, `![[transclusions]]`, `#tags`) resolved.
//!
//! ```
//! use std::sync::Arc;
//! use foamview::{NoteIndex, Renderer, WorkspaceIndex};
//!
//! let index = NoteIndex::from_documents([
//!     ("todo.md", "# Todo\n\n- [ ] write docs"),
//!     ("home.md", "# Home\n\nstart at [[todo]]\n\n![[todo]]"),
//! ]);
//! let home = index.find("home").unwrap().unwrap();
//!
//! let renderer = Renderer::new(Arc::new(index));
//! let html = renderer.render_note(&home);
//! assert!(html.contains("class='foam-note-link'"));
//! assert!(html.contains("write docs"));
//! ```

pub use foamview_core::{
    Error, LineRange, RenderConfig, ResolvedLink, Resource, Result, Section, SectionSlicing,
    WorkspaceConfig, WorkspaceIndex,
};
pub use foamview_index::NoteIndex;
pub use foamview_render::{MarkupStage, RenderState, Renderer, Replacement, StageContext};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use foamview_core::prelude::*;
    pub use foamview_index::NoteIndex;
    pub use foamview_render::Renderer;
}
