//! Wikilink resolution: `[[note]]` and `[[note|alias]]` tokens.
//!
//! The `![[..]]` inclusion form is never matched here: inclusion tokens are
//! consumed by the inclusion stage before this one runs, and any inclusion
//! token still in the text (an unresolved one) is recognized by its leading
//! `!` and left alone.

use regex::Regex;
use std::sync::LazyLock;

use foamview_core::{ResolvedLink, Result, WorkspaceIndex};

use crate::fragments::{note_link, placeholder_link};
use crate::pipeline::{
    ALIAS_DIVIDER, MarkupStage, RenderState, Replacement, StageContext, substitute_tokens,
};

/// Wikilink token: `[[...]]`
static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]]+?)\]\]").unwrap());

#[inline]
fn has_wikilink(content: &str) -> bool {
    content.contains("[[")
}

pub struct ConnectWikilinks;

impl MarkupStage for ConnectWikilinks {
    fn name(&self) -> &'static str {
        "connect-wikilinks"
    }

    fn apply(&self, state: RenderState, ctx: &mut StageContext<'_>) -> RenderState {
        if !has_wikilink(&state.source) {
            return state;
        }

        let source = state.source;
        let rewritten = substitute_tokens(&source, &WIKILINK, |caps| {
            let matched = caps.get(0).unwrap();
            // ![[..]] is inclusion syntax, not a link
            if matched.start() > 0 && source.as_bytes()[matched.start() - 1] == b'!' {
                return Replacement::Unhandled;
            }

            let token = &caps[1];
            match resolve_link(token, ctx.index()) {
                Ok(ResolvedLink::Found { resource, label }) => {
                    Replacement::Handled(note_link(&resource, &label))
                }
                Ok(ResolvedLink::NotFound { name }) => {
                    Replacement::Handled(placeholder_link(&name))
                }
                Err(e) => {
                    log::warn!("Error while creating link for [[{token}]] in preview: {e}");
                    // degraded path labels the placeholder with the raw
                    // token, alias and all
                    Replacement::Handled(placeholder_link(token))
                }
            }
        });
        RenderState::new(rewritten)
    }
}

/// Resolve a wikilink token against the workspace index.
///
/// The target name is everything before the first alias divider; the display
/// label everything after it. Without a divider both are the full token.
pub fn resolve_link(token: &str, index: &dyn WorkspaceIndex) -> Result<ResolvedLink> {
    let (name, label) = match token.find(ALIAS_DIVIDER) {
        Some(pos) => (&token[..pos], &token[pos + ALIAS_DIVIDER.len_utf8()..]),
        None => (token, token),
    };

    match index.find(name)? {
        Some(resource) => Ok(ResolvedLink::Found {
            resource,
            label: label.to_string(),
        }),
        None => Ok(ResolvedLink::NotFound {
            name: name.to_string(),
        }),
    }
}
