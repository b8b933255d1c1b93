//! Byte ranges where token substitution must not fire.
//!
//! Code blocks, inline code, HTML, and frontmatter are regions where
//! wikilink/tag syntax is plain text to the underlying renderer; the token
//! stages skip any match starting inside them. HTML exclusion also keeps a
//! later stage from re-matching text inside fragments an earlier stage
//! already injected.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::ops::Range;

use crate::pipeline::cmark_options;

#[derive(Debug, Default, Clone)]
pub(crate) struct ExcludedRanges {
    ranges: Vec<Range<usize>>,
}

impl ExcludedRanges {
    /// Scan the source once and collect all excluded regions.
    pub(crate) fn compute(source: &str) -> Self {
        let mut excluded = ExcludedRanges::default();

        let parser = Parser::new_ext(source, cmark_options());
        let mut code_block_start: Option<usize> = None;
        let mut metadata_start: Option<usize> = None;

        for (event, range) in parser.into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    code_block_start = Some(range.start);
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(start) = code_block_start.take() {
                        excluded.add(start..range.end);
                    }
                }
                Event::Start(Tag::MetadataBlock(_)) => {
                    metadata_start = Some(range.start);
                }
                Event::End(TagEnd::MetadataBlock(_)) => {
                    if let Some(start) = metadata_start.take() {
                        excluded.add(start..range.end);
                    }
                }
                Event::Code(_) | Event::Html(_) | Event::InlineHtml(_) => {
                    excluded.add(range.clone());
                }
                _ => {}
            }
        }

        excluded.optimize();
        excluded
    }

    /// Check if a byte offset falls within any excluded range.
    #[inline]
    pub(crate) fn contains(&self, offset: usize) -> bool {
        if self.ranges.is_empty() {
            return false;
        }

        // Binary search: the candidate is the last range starting at or
        // before the offset.
        let idx = self.ranges.partition_point(|r| r.start <= offset);
        if idx == 0 {
            return false;
        }
        offset < self.ranges[idx - 1].end
    }

    fn add(&mut self, range: Range<usize>) {
        self.ranges.push(range);
    }

    /// Sort and merge overlapping ranges for efficient lookup.
    fn optimize(&mut self) {
        if self.ranges.is_empty() {
            return;
        }
        self.ranges.sort_by_key(|r| r.start);

        let mut merged = Vec::with_capacity(self.ranges.len());
        let mut current = self.ranges[0].clone();

        for range in self.ranges.iter().skip(1) {
            if range.start <= current.end {
                current.end = current.end.max(range.end);
            } else {
                merged.push(current);
                current = range.clone();
            }
        }
        merged.push(current);
        self.ranges = merged;
    }
}
