//! The workspace index interface consumed by the preview pipeline.
//!
//! The pipeline treats name resolution as a black box: how a needle maps to
//! a note (path vs. stem vs. title precedence, extension handling) is owned
//! entirely by the index implementation.

use crate::error::Result;
use crate::models::{Resource, Section};
use std::sync::Arc;

/// Resolution interface over a collection of notes.
///
/// Implementations must be cheap to query repeatedly: the rendering pipeline
/// calls [`find`](WorkspaceIndex::find) once per wikilink, tag, and
/// transclusion token in a document.
pub trait WorkspaceIndex {
    /// Resolve a needle to a note, or `None` when nothing matches.
    ///
    /// The needle may be a workspace-relative path, a file name, a note
    /// title, or a `#tag`-shaped literal. A `name#fragment` needle resolves
    /// the part before the `#`; the fragment is the caller's business.
    fn find(&self, needle: &str) -> Result<Option<Arc<Resource>>>;

    /// Look up a named section of a resource by fragment identifier.
    ///
    /// Matching is case-insensitive on the section label, with a fallback on
    /// the anchor slug.
    fn find_section(&self, resource: &Resource, fragment: &str) -> Result<Option<Section>>;
}
