//! Per-note parsing: title, headings, and derived sections.
//!
//! Uses pulldown-cmark for the structural pass:
//! - Frontmatter is read from YAML metadata block events
//! - Headings are collected with their level and 0-based line
//! - Sections are derived afterwards: a heading's section runs from its own
//!   line to the next heading of the same or shallower level

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::path::PathBuf;

use foamview_core::{LineIndex, LineRange, Resource, Section};

/// A heading collected during the structural pass.
struct RawHeading {
    text: String,
    level: u8,
    line: usize,
}

/// Parse a note's source text into a [`Resource`].
///
/// `path` is the workspace-relative identifier. Parsing never fails: a note
/// with no frontmatter and no headings still yields a resource titled after
/// its file stem, with no sections.
pub fn parse_note(path: PathBuf, text: &str) -> Resource {
    let index = LineIndex::new(text);

    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, opts);

    let mut headings: Vec<RawHeading> = Vec::new();
    let mut frontmatter_title: Option<String> = None;

    let mut in_metadata = false;
    let mut metadata_content = String::new();
    let mut current_heading: Option<(HeadingLevel, usize)> = None;
    let mut heading_text = String::new();

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::MetadataBlock(_)) => {
                in_metadata = true;
                metadata_content.clear();
            }
            Event::End(TagEnd::MetadataBlock(_)) => {
                in_metadata = false;
                if let Ok(serde_json::Value::Object(map)) =
                    serde_yaml::from_str(&metadata_content)
                {
                    frontmatter_title = map
                        .get("title")
                        .and_then(|v| v.as_str())
                        .map(|s| s.to_string());
                }
            }
            Event::Text(text) if in_metadata => {
                metadata_content.push_str(&text);
            }

            Event::Start(Tag::Heading { level, .. }) => {
                current_heading = Some((level, range.start));
                heading_text.clear();
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, start)) = current_heading.take() {
                    headings.push(RawHeading {
                        text: heading_text.trim().to_string(),
                        level: heading_level_num(level),
                        line: index.line_of(start),
                    });
                }
            }
            Event::Text(text) if current_heading.is_some() => {
                heading_text.push_str(&text);
            }
            Event::Code(code) if current_heading.is_some() => {
                heading_text.push_str(&code);
            }

            _ => {}
        }
    }

    let title = frontmatter_title
        .or_else(|| {
            headings
                .iter()
                .find(|h| h.level == 1)
                .map(|h| h.text.clone())
        })
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default()
        });

    let sections = derive_sections(&headings, index.line_count());

    Resource {
        path,
        title,
        text: text.to_string(),
        sections,
    }
}

/// Derive half-open section ranges from the collected headings.
fn derive_sections(headings: &[RawHeading], line_count: usize) -> Vec<Section> {
    headings
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let end = headings[i + 1..]
                .iter()
                .find(|next| next.level <= heading.level)
                .map(|next| next.line)
                .unwrap_or(line_count);
            Section {
                label: heading.text.clone(),
                slug: slugify(&heading.text),
                range: LineRange::new(heading.line, end),
            }
        })
        .collect()
}

fn heading_level_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Turn heading text into its anchor slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(text: &str) -> Resource {
        parse_note(PathBuf::from("notes/test.md"), text)
    }

    #[test]
    fn test_title_from_frontmatter() {
        let resource = note("---\ntitle: My Note\n---\n\n# Different Heading\n");
        assert_eq!(resource.title, "My Note");
    }

    #[test]
    fn test_title_from_first_h1() {
        let resource = note("intro line\n\n# The Heading\n\ntext\n");
        assert_eq!(resource.title, "The Heading");
    }

    #[test]
    fn test_title_falls_back_to_stem() {
        let resource = note("just text, no headings");
        assert_eq!(resource.title, "test");
    }

    #[test]
    fn test_sections_span_to_next_same_level_heading() {
        // line:    0        1  2        3       4  5
        let text = "# One\n\ntext\n## Sub\nmore\n# Two\nrest";
        let resource = note(text);

        let one = &resource.sections[0];
        assert_eq!(one.label, "One");
        assert_eq!(one.range, LineRange::new(0, 5));

        let sub = &resource.sections[1];
        assert_eq!(sub.label, "Sub");
        assert_eq!(sub.range, LineRange::new(3, 5));

        let two = &resource.sections[2];
        assert_eq!(two.label, "Two");
        assert_eq!(two.range, LineRange::new(5, 7));
    }

    #[test]
    fn test_last_section_runs_to_end_of_file() {
        let text = "# Only\nline 1\nline 2";
        let resource = note(text);
        assert_eq!(resource.sections[0].range, LineRange::new(0, 3));
    }

    #[test]
    fn test_section_slug() {
        let resource = note("## BIG heading?! with Special @chars\n");
        assert_eq!(resource.sections[0].slug, "big-heading-with-special-chars");
    }

    #[test]
    fn test_slugify_collapses_spaces() {
        assert_eq!(slugify("Multiple   Spaces   Here"), "multiple-spaces-here");
    }

    #[test]
    fn test_heading_with_inline_code() {
        let resource = note("# Using `render` here\n");
        assert_eq!(resource.sections[0].label, "Using render here");
    }
}
