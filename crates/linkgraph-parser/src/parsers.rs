//! Link extraction: mask code spans, then match link syntax.

use linkgraph_core::{LineIndex, LinkCandidate};

use crate::engine::ExcludedRanges;

pub mod link_utils;
mod markdown_links;

use self::link_utils::IgnoreRules;

/// Extracts candidate references from one document's text.
///
/// Stateless between documents: the same extractor can be reused for a
/// whole corpus and always returns the same output for the same text.
#[derive(Debug, Clone, Default)]
pub struct LinkExtractor {
    rules: IgnoreRules,
}

impl LinkExtractor {
    /// Extractor with the standard ignore rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor that only accepts `./` and `../` targets
    pub fn relative_only() -> Self {
        Self::with_rules(IgnoreRules::relative_only())
    }

    /// Extractor with a custom rule list
    pub fn with_rules(rules: IgnoreRules) -> Self {
        Self { rules }
    }

    /// Every link in document order, ignored ones included with their reason.
    pub fn extract_all(&self, content: &str) -> Vec<LinkCandidate> {
        let excluded = ExcludedRanges::scan(content);
        if !excluded.is_empty() {
            log::trace!("masking {} code spans", excluded.len());
        }
        let masked = excluded.mask(content);
        let index = LineIndex::new(&masked);
        markdown_links::match_links(&masked, &index, &self.rules)
    }

    /// Links that should be resolved, in document order.
    pub fn extract(&self, content: &str) -> Vec<LinkCandidate> {
        let mut links = self.extract_all(content);
        links.retain(LinkCandidate::is_reference);
        links
    }
}
