//! Tag recognition: `#tag` tokens.
//!
//! A tag is `#` followed by an identifier (optional digits, then a required
//! letter/slash/underscore/hyphen, then any run of letters, digits, `/`,
//! `_`, `-`; Unicode letters included), preceded by start-of-line or
//! whitespace so the pattern never fires inside URLs or after a heading's
//! leading `#`.
//!
//! When a resource exists for the literal tag text the match falls through
//! unhandled, leaving the raw token in the pipeline for later stages. A
//! lookup failure is logged and treated as "no resource".

use regex::Regex;
use std::sync::LazyLock;

use crate::fragments::tag_span;
use crate::pipeline::{MarkupStage, RenderState, Replacement, StageContext, substitute_tokens};

/// Tag token with its required leading boundary in group 1.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|\s)#([0-9]*[\p{L}/_-][\p{L}\p{N}/_-]*)").unwrap());

#[inline]
fn has_tag(content: &str) -> bool {
    content.contains('#')
}

pub struct RenderTags;

impl MarkupStage for RenderTags {
    fn name(&self) -> &'static str {
        "foam-tags"
    }

    fn apply(&self, state: RenderState, ctx: &mut StageContext<'_>) -> RenderState {
        if !has_tag(&state.source) {
            return state;
        }

        let source = state.source;
        let rewritten = substitute_tokens(&source, &TAG, |caps| {
            let boundary = caps.get(1).unwrap().as_str();
            let tag = format!("#{}", &caps[2]);

            match ctx.index().find(&tag) {
                Ok(Some(_)) => Replacement::Unhandled,
                Ok(None) => Replacement::Handled(format!("{boundary}{}", tag_span(&tag))),
                Err(e) => {
                    log::warn!("Error while creating link for {tag} in preview: {e}");
                    Replacement::Handled(format!("{boundary}{}", tag_span(&tag)))
                }
            }
        });
        RenderState::new(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_pattern() {
        let tag = |s: &str| TAG.captures(s).map(|c| c[2].to_string());

        assert_eq!(tag("a #tag here"), Some("tag".to_string()));
        assert_eq!(tag("#nested/tag"), Some("nested/tag".to_string()));
        assert_eq!(tag("#2021-review"), Some("2021-review".to_string()));
        assert_eq!(tag("#été"), Some("été".to_string()));

        // bare numbers are not tags
        assert_eq!(tag("issue #123"), None);
        // no boundary: urls and mid-word hashes
        assert_eq!(tag("http://x.com/#anchor"), None);
        assert_eq!(tag("c#m"), None);
        // a heading's leading # is followed by whitespace, never an identifier
        assert_eq!(tag("# Title"), None);
    }

    #[test]
    fn test_tag_at_line_start() {
        let caps = TAG.captures("line one\n#inbox rest").unwrap();
        assert_eq!(&caps[2], "inbox");
        assert_eq!(&caps[1], "\n");
    }
}
