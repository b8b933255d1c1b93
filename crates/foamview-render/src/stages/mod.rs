//! The pipeline stages, in registration order.

mod inclusion;
mod references;
mod tags;
mod wikilinks;

pub use inclusion::IncludeNotes;
pub use references::ClearConflictingReferences;
pub use tags::RenderTags;
pub use wikilinks::ConnectWikilinks;

use crate::pipeline::MarkupStage;

/// The fixed stage order of a preview render.
///
/// Reference pruning precedes all token scanning; tags are tried first among
/// token stages; inclusions are consumed before plain wikilinks so the
/// `![[..]]` form is never half-eaten by the link stage.
pub fn default_stages() -> Vec<Box<dyn MarkupStage>> {
    vec![
        Box::new(ClearConflictingReferences),
        Box::new(RenderTags),
        Box::new(IncludeNotes),
        Box::new(ConnectWikilinks),
    ]
}
