//! The preview rendering pipeline.
//!
//! A render is a left-to-right fold of an ordered stage list over the
//! document source, followed by a CommonMark finish pass:
//!
//! 1. `clear-references` - prunes reference definitions that would hijack
//!    wikilink syntax
//! 2. `foam-tags` - `#tag` tokens
//! 3. `include-notes` - `![[note]]` transclusion (the only recursive stage)
//! 4. `connect-wikilinks` - `[[note]]` links
//!
//! Each stage is a uniform `(RenderState, &mut StageContext) -> RenderState`
//! transform. Token stages substitute regex matches in the source text,
//! skipping excluded ranges; injected fragments then pass through the finish
//! pass as raw HTML.
//!
//! The visitation stack is created fresh per top-level [`Renderer::render`]
//! call and threaded explicitly through every recursive re-entry, so cycle
//! detection can never leak across unrelated documents.

use pulldown_cmark::{Options, Parser, html};
use regex::{Captures, Regex};
use std::sync::Arc;

use foamview_core::{RenderConfig, Resource, WorkspaceIndex};

use crate::exclusions::ExcludedRanges;
use crate::stages::default_stages;

/// Divider between a wikilink target and its display alias.
pub const ALIAS_DIVIDER: char = '|';

/// CommonMark options shared by every parse of the pipeline.
pub(crate) fn cmark_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    opts.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    opts
}

/// Document state flowing through the stage fold.
#[derive(Debug, Clone)]
pub struct RenderState {
    /// Source text, progressively rewritten by the stages
    pub source: String,
}

impl RenderState {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Outcome of a stage's per-token handler.
///
/// `Unhandled` means the token falls through untouched for a later stage
/// (or the finish pass) to deal with.
#[derive(Debug)]
pub enum Replacement {
    Handled(String),
    Unhandled,
}

/// One stage of the rendering pipeline.
pub trait MarkupStage {
    /// Stage name, for diagnostics
    fn name(&self) -> &'static str;

    /// Transform the document state
    fn apply(&self, state: RenderState, ctx: &mut StageContext<'_>) -> RenderState;
}

/// Resource identifiers currently mid-expansion, used to detect and suppress
/// cyclic transclusion.
///
/// Invariant: an identifier appears at most once. This bounds the total work
/// of a render by the number of distinct reachable resources.
#[derive(Debug, Default)]
pub struct VisitationStack {
    entries: Vec<String>,
}

impl VisitationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.iter().any(|e| e == identifier)
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn push(&mut self, identifier: String) {
        debug_assert!(!self.contains(&identifier));
        self.entries.push(identifier);
    }

    pub(crate) fn pop(&mut self) {
        self.entries.pop();
    }
}

/// Per-render context handed to every stage.
pub struct StageContext<'a> {
    pub(crate) renderer: &'a Renderer,
    /// Resources currently being expanded by enclosing transclusions
    pub visited: &'a mut VisitationStack,
}

impl StageContext<'_> {
    /// The workspace index to resolve names against
    pub fn index(&self) -> &dyn WorkspaceIndex {
        &*self.renderer.index
    }

    /// Pipeline configuration
    pub fn config(&self) -> &RenderConfig {
        &self.renderer.config
    }

    /// Re-enter the full pipeline on nested content, sharing this render's
    /// visitation stack.
    pub fn render_nested(&mut self, source: &str) -> String {
        self.renderer.render_with_stack(source, self.visited)
    }
}

/// Renders a note's markup source into a preview HTML fragment.
///
/// Rendering is synchronous and infallible: resolution misses, cycles, and
/// internal faults all degrade to visible-but-harmless output per stage, and
/// never abort the rest of the document.
pub struct Renderer {
    index: Arc<dyn WorkspaceIndex>,
    config: RenderConfig,
    stages: Vec<Box<dyn MarkupStage>>,
}

impl Renderer {
    /// Create a renderer over the given workspace index with defaults.
    pub fn new(index: Arc<dyn WorkspaceIndex>) -> Self {
        Self::with_config(index, RenderConfig::default())
    }

    /// Create a renderer with explicit pipeline configuration.
    pub fn with_config(index: Arc<dyn WorkspaceIndex>, config: RenderConfig) -> Self {
        Self::with_stages(index, config, default_stages())
    }

    /// Create a renderer with a custom stage list.
    ///
    /// Stages run in list order on every render, including recursive
    /// re-entries from transclusion.
    pub fn with_stages(
        index: Arc<dyn WorkspaceIndex>,
        config: RenderConfig,
        stages: Vec<Box<dyn MarkupStage>>,
    ) -> Self {
        Self {
            index,
            config,
            stages,
        }
    }

    /// Render a document to an HTML fragment.
    pub fn render(&self, source: &str) -> String {
        let mut visited = VisitationStack::new();
        self.render_with_stack(source, &mut visited)
    }

    /// Render a workspace note to an HTML fragment.
    ///
    /// Unlike [`render`](Self::render), the note's own identifier seeds the
    /// visitation stack, so a note transcluding itself warns at that very
    /// inclusion point instead of expanding one redundant level first.
    pub fn render_note(&self, resource: &Resource) -> String {
        let mut visited = VisitationStack::new();
        visited.push(resource.identifier());
        self.render_with_stack(&resource.text, &mut visited)
    }

    pub(crate) fn render_with_stack(
        &self,
        source: &str,
        visited: &mut VisitationStack,
    ) -> String {
        let mut state = RenderState::new(source);
        for stage in &self.stages {
            log::trace!("Applying stage '{}'", stage.name());
            let mut ctx = StageContext {
                renderer: self,
                visited: &mut *visited,
            };
            state = stage.apply(state, &mut ctx);
        }
        finish(&state.source)
    }
}

/// The CommonMark finish pass.
fn finish(source: &str) -> String {
    let parser = Parser::new_ext(source, cmark_options());
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Substitute pattern matches in the source, one scan, left to right.
///
/// Matches starting inside an excluded range are never offered to the
/// handler; `Unhandled` leaves the matched text in place.
pub(crate) fn substitute_tokens(
    source: &str,
    pattern: &Regex,
    mut replace: impl FnMut(&Captures<'_>) -> Replacement,
) -> String {
    let excluded = ExcludedRanges::compute(source);
    let mut out = String::with_capacity(source.len());
    let mut last = 0;

    for caps in pattern.captures_iter(source) {
        let matched = caps.get(0).unwrap();
        if excluded.contains(matched.start()) {
            continue;
        }
        if let Replacement::Handled(html) = replace(&caps) {
            out.push_str(&source[last..matched.start()]);
            out.push_str(&html);
            last = matched.end();
        }
    }

    out.push_str(&source[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    #[test]
    fn test_visitation_stack_invariant() {
        let mut stack = VisitationStack::new();
        assert_eq!(stack.depth(), 0);
        stack.push("a.md".to_string());
        stack.push("b.md".to_string());
        assert!(stack.contains("a.md"));
        assert!(!stack.contains("c.md"));
        stack.pop();
        assert!(!stack.contains("b.md"));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_substitute_tokens_handled_and_unhandled() {
        static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@(\w+)").unwrap());

        let out = substitute_tokens("hi @alice and @bob", &WORD, |caps| {
            if &caps[1] == "alice" {
                Replacement::Handled("<b>alice</b>".to_string())
            } else {
                Replacement::Unhandled
            }
        });
        assert_eq!(out, "hi <b>alice</b> and @bob");
    }

    #[test]
    fn test_substitute_tokens_skips_code() {
        static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@(\w+)").unwrap());

        let out = substitute_tokens("`@alice` and @bob", &WORD, |_| {
            Replacement::Handled("X".to_string())
        });
        assert_eq!(out, "`@alice` and X");
    }

    #[test]
    fn test_finish_renders_markdown() {
        let html = finish("# Title\n\nsome *text*");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_finish_passes_html_through() {
        let html = finish("before <span class='foam-tag'>#x</span> after");
        assert!(html.contains("<span class='foam-tag'>#x</span>"));
    }
}
