//! Note transclusion: `![[note]]` and `![[note#section]]` tokens.
//!
//! This is the only recursive stage: included note bodies are re-rendered
//! through the full pipeline, so their own links, tags, and inclusions are
//! expanded too. Termination is guaranteed by the visitation stack: a
//! resource already mid-expansion renders as a visible cyclic-link warning
//! instead of recursing, which bounds total work by the number of distinct
//! reachable resources.
//!
//! Degradation rules, per token:
//! - unknown target: the original `![[..]]` text stays as-is
//! - cyclic target: warning block, stack untouched
//! - anything else going wrong: logged, and the inclusion disappears rather
//!   than breaking the rest of the document

use regex::Regex;
use std::sync::LazyLock;

use foamview_core::{LineRange, Result, SectionSlicing};

use crate::fragments::cyclic_warning;
use crate::pipeline::{MarkupStage, RenderState, Replacement, StageContext, substitute_tokens};

/// Inclusion token: `![[...]]`
static INCLUSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\[\]]+?)\]\]").unwrap());

#[inline]
fn has_inclusion(content: &str) -> bool {
    content.contains("![[")
}

pub struct IncludeNotes;

impl MarkupStage for IncludeNotes {
    fn name(&self) -> &'static str {
        "include-notes"
    }

    fn apply(&self, state: RenderState, ctx: &mut StageContext<'_>) -> RenderState {
        if !has_inclusion(&state.source) {
            return state;
        }

        let source = state.source;
        let rewritten = substitute_tokens(&source, &INCLUSION, |caps| {
            let token = &caps[1];
            match expand(token, ctx) {
                Ok(html) => Replacement::Handled(html),
                Err(e) => {
                    log::warn!("Error while including [[{token}]] into the current document: {e}");
                    Replacement::Handled(String::new())
                }
            }
        });
        RenderState::new(rewritten)
    }
}

/// Expand one inclusion token into an HTML fragment.
fn expand(token: &str, ctx: &mut StageContext<'_>) -> Result<String> {
    let (target, fragment) = split_fragment(token);

    let resource = match ctx.index().find(target)? {
        Some(resource) => resource,
        None => return Ok(format!("![[{token}]]")),
    };

    let identifier = resource.identifier();
    if ctx.visited.contains(&identifier) {
        log::debug!("Cyclic inclusion of {identifier} suppressed");
        return Ok(cyclic_warning(token));
    }

    let content = match fragment {
        Some(fragment) => match ctx.index().find_section(&resource, fragment)? {
            Some(section) => {
                slice_lines(&resource.text, section.range, ctx.config().section_slicing)
            }
            // unknown section: include the whole note
            None => resource.text.clone(),
        },
        None => resource.text.clone(),
    };

    ctx.visited.push(identifier);
    let html = ctx.render_nested(&content);
    ctx.visited.pop();
    Ok(html)
}

/// Split `target#fragment` at the first `#`. Inclusions have no alias form.
fn split_fragment(token: &str) -> (&str, Option<&str>) {
    match token.find('#') {
        Some(pos) => (&token[..pos], Some(&token[pos + 1..])),
        None => (token, None),
    }
}

/// Slice a note body to a section's line range.
fn slice_lines(text: &str, range: LineRange, slicing: SectionSlicing) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let end = match slicing {
        SectionSlicing::EndExclusive => range.end,
        SectionSlicing::EndInclusive => range.end + 1,
    };
    let start = range.start.min(lines.len());
    let end = end.clamp(start, lines.len());
    lines[start..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fragment() {
        assert_eq!(split_fragment("note"), ("note", None));
        assert_eq!(split_fragment("note#section"), ("note", Some("section")));
        assert_eq!(split_fragment("note#a#b"), ("note", Some("a#b")));
    }

    #[test]
    fn test_inclusion_pattern_requires_bang() {
        assert!(INCLUSION.is_match("![[note]]"));
        assert!(!INCLUSION.is_match("[[note]]"));
    }

    #[test]
    fn test_slice_lines_end_exclusive() {
        let text = "l0\nl1\nl2\nl3\nl4\nl5";
        let sliced = slice_lines(text, LineRange::new(3, 6), SectionSlicing::EndExclusive);
        assert_eq!(sliced, "l3\nl4\nl5");
        let sliced = slice_lines(text, LineRange::new(1, 3), SectionSlicing::EndExclusive);
        assert_eq!(sliced, "l1\nl2");
    }

    #[test]
    fn test_slice_lines_end_inclusive() {
        let text = "l0\nl1\nl2\nl3";
        let sliced = slice_lines(text, LineRange::new(1, 2), SectionSlicing::EndInclusive);
        assert_eq!(sliced, "l1\nl2");
    }

    #[test]
    fn test_slice_lines_clamps_out_of_bounds() {
        let text = "l0\nl1";
        assert_eq!(
            slice_lines(text, LineRange::new(1, 10), SectionSlicing::EndExclusive),
            "l1"
        );
        assert_eq!(
            slice_lines(text, LineRange::new(5, 9), SectionSlicing::EndExclusive),
            ""
        );
    }
}
