//! HTML fragment builders shared by the token stages.
//!
//! These are pure formatting functions with no state and no failure modes.
//! The emitted class names are styling hooks consumed downstream; treat them
//! as fixed.

use foamview_core::Resource;
use pulldown_cmark_escape::{escape_href, escape_html};

/// Build a placeholder anchor for a link whose target does not exist.
pub fn placeholder_link(content: &str) -> String {
    format!(
        "<a class='foam-placeholder-link' title=\"Link to non-existing resource\" href=\"javascript:void(0);\">{}</a>",
        body(content)
    )
}

/// Build an anchor to a resolved note.
pub fn note_link(resource: &Resource, label: &str) -> String {
    let href = href(&format!("/{}", resource.href_path()));
    format!(
        "<a class='foam-note-link' title='{}' href='{}' data-href='{}'>{}</a>",
        attr(&resource.title),
        href,
        href,
        body(label)
    )
}

/// Build a styled span for an unresolved tag.
pub fn tag_span(content: &str) -> String {
    format!("<span class='foam-tag'>{}</span>", body(content))
}

/// Build the warning block emitted in place of a cyclic inclusion.
pub fn cyclic_warning(token: &str) -> String {
    format!(
        "<div class=\"foam-cyclic-link-warning\">Cyclic link detected for wikilink: {}</div>",
        body(token)
    )
}

fn body(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let _ = escape_html(&mut out, s);
    out
}

fn attr(s: &str) -> String {
    // escape_html covers double quotes; attributes here are single-quoted
    body(s).replace('\'', "&#39;")
}

fn href(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let _ = escape_href(&mut out, s);
    out
}
