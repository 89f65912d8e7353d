//! Code-span masking pass.
//!
//! Link syntax inside fenced blocks, indented blocks and inline code is an
//! example, not a reference. This module locates those spans with
//! pulldown-cmark (CommonMark rules, including unclosed fences which run to
//! end of document) and blanks them out before link matching.
//!
//! Masking replaces every masked byte except `\n` with a space, so byte
//! offsets and line numbers in the masked text equal those in the original.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::borrow::Cow;
use std::ops::Range;

/// Fast pre-filter: skip the CommonMark pass if no code can be present.
#[inline]
fn has_code_marker(content: &str) -> bool {
    content.contains('`') || content.contains('~') || content.contains("    ") || content.contains('\t')
}

/// Byte ranges of code spans, sorted and merged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExcludedRanges {
    ranges: Vec<Range<usize>>,
}

impl ExcludedRanges {
    /// Locate every code block and inline code span in `content`.
    pub fn scan(content: &str) -> Self {
        let mut excluded = Self::default();
        if !has_code_marker(content) {
            return excluded;
        }

        let mut opts = Options::empty();
        opts.insert(Options::ENABLE_TABLES);
        opts.insert(Options::ENABLE_STRIKETHROUGH);

        let mut code_block_start: Option<usize> = None;
        for (event, range) in Parser::new_ext(content, opts).into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    code_block_start = Some(range.start);
                }
                Event::End(TagEnd::CodeBlock) => {
                    let start = code_block_start.take().unwrap_or(range.start);
                    excluded.add(start..range.end);
                }
                Event::Code(_) => {
                    excluded.add(range);
                }
                _ => {}
            }
        }

        excluded.optimize();
        excluded
    }

    /// Check if a byte offset falls within any excluded range.
    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.start <= offset);
        if idx == 0 {
            return false;
        }
        offset < self.ranges[idx - 1].end
    }

    /// Number of disjoint ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Blank out the excluded ranges of `content`, keeping newlines.
    pub fn mask<'a>(&self, content: &'a str) -> Cow<'a, str> {
        if self.ranges.is_empty() {
            return Cow::Borrowed(content);
        }

        let mut bytes = content.as_bytes().to_vec();
        for range in &self.ranges {
            let end = range.end.min(bytes.len());
            let start = range.start.min(end);
            for b in &mut bytes[start..end] {
                if *b != b'\n' {
                    *b = b' ';
                }
            }
        }

        // Ranges come from pulldown-cmark and sit on char boundaries, so the
        // lossy path is never taken in practice.
        match String::from_utf8(bytes) {
            Ok(masked) => Cow::Owned(masked),
            Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
        }
    }

    fn add(&mut self, range: Range<usize>) {
        if range.start < range.end {
            self.ranges.push(range);
        }
    }

    /// Sort and merge overlapping ranges for binary-search lookup.
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

/// Mask all code spans in `content`.
///
/// ```
/// use linkgraph_parser::mask_code;
///
/// let masked = mask_code("see `[x](./a.md)` here");
/// assert!(!masked.contains("./a.md"));
/// assert_eq!(masked.len(), "see `[x](./a.md)` here".len());
/// ```
pub fn mask_code(content: &str) -> Cow<'_, str> {
    ExcludedRanges::scan(content).mask(content)
}
