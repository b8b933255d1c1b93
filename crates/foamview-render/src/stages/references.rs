//! Reference-definition pruning.
//!
//! The underlying renderer treats `[[x]]`-shaped text as a reference-link
//! shorthand when a matching `[x]: url` definition exists elsewhere in the
//! document. Left alone, such definitions silently convert wikilink syntax
//! into ordinary links and bypass the wikilink and inclusion stages
//! entirely. This stage prunes the offending definitions before any token
//! scanning happens:
//!
//! - keys containing the alias divider (`[a|b]: url`), which would resolve
//!   aliased wikilinks to the wrong target
//! - keys that are also the target of an inclusion token (`![[key]]`)
//!   anywhere in the raw source
//!
//! The definition table pulldown-cmark builds cannot be handed back to it,
//! so pruning a key means deleting its definition line from the source; the
//! observable effect is the same as removing the table entry.

use pulldown_cmark::Parser;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::pipeline::{
    ALIAS_DIVIDER, MarkupStage, RenderState, StageContext, cmark_options,
};

/// A reference definition line: `[label]: destination`
static REF_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}\[([^\]]+)\]:").unwrap());

pub struct ClearConflictingReferences;

impl MarkupStage for ClearConflictingReferences {
    fn name(&self) -> &'static str {
        "clear-references"
    }

    fn apply(&self, state: RenderState, _ctx: &mut StageContext<'_>) -> RenderState {
        match prune_conflicting_references(&state.source) {
            Some(pruned) => RenderState::new(pruned),
            None => state,
        }
    }
}

/// Remove conflicting reference definition lines. Returns `None` when the
/// source has nothing to prune.
fn prune_conflicting_references(source: &str) -> Option<String> {
    let keys: Vec<String> = Parser::new_ext(source, cmark_options())
        .reference_definitions()
        .iter()
        .map(|(label, _)| label.to_string())
        .collect();
    if keys.is_empty() {
        return None;
    }

    let source_lower = source.to_lowercase();
    let pruned: HashSet<String> = keys
        .into_iter()
        .filter(|key| {
            key.contains(ALIAS_DIVIDER)
                || source_lower.contains(&format!("![[{}]]", key.to_lowercase()))
        })
        .map(|key| key.to_lowercase())
        .collect();
    if pruned.is_empty() {
        return None;
    }

    log::debug!("Pruning {} conflicting reference definition(s)", pruned.len());
    let kept: Vec<&str> = source
        .lines()
        .filter(|line| match definition_label(line) {
            Some(label) => !pruned.contains(&label),
            None => true,
        })
        .collect();
    Some(kept.join("\n"))
}

fn definition_label(line: &str) -> Option<String> {
    REF_DEFINITION
        .captures(line)
        .map(|caps| caps[1].trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(source: &str) -> String {
        prune_conflicting_references(source).unwrap_or_else(|| source.to_string())
    }

    #[test]
    fn test_prunes_inclusion_target_definition() {
        let source = "![[note]]\n\n[note]: http://example.com";
        let out = apply(source);
        assert!(out.contains("![[note]]"));
        assert!(!out.contains("[note]:"));
    }

    #[test]
    fn test_prunes_alias_divider_keys() {
        let source = "text\n\n[a|b]: http://example.com";
        assert!(!apply(source).contains("[a|b]:"));
    }

    #[test]
    fn test_pruning_is_case_insensitive() {
        let source = "![[Note]]\n\n[NOTE]: http://example.com";
        assert!(!apply(source).contains("[NOTE]:"));
    }

    #[test]
    fn test_keeps_unrelated_definitions() {
        let source = "see [docs][api]\n\n[api]: http://example.com/api";
        assert!(apply(source).contains("[api]:"));
    }

    #[test]
    fn test_no_definitions_is_untouched() {
        let source = "plain text with ![[note]]";
        assert_eq!(apply(source), source);
    }

    #[test]
    fn test_definition_label() {
        assert_eq!(definition_label("[Key]: url"), Some("key".to_string()));
        assert_eq!(definition_label("   [k]: url"), Some("k".to_string()));
        assert_eq!(definition_label("not a definition"), None);
        // four spaces of indentation is a code block, not a definition
        assert_eq!(definition_label("    [k]: url"), None);
    }
}
