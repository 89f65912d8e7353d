//! # Linkgraph Parser
//!
//! Pulls candidate cross-document references out of one document's raw
//! text.
//!
//! ## Architecture
//!
//! Extraction is a two-pass lexical filter:
//!
//! ### Pass 1: code masking
//! - `pulldown-cmark` locates fenced blocks, indented blocks and inline code
//! - Those byte ranges are blanked out, newlines kept, so positions survive
//!
//! ### Pass 2: link matching
//! - A compiled pattern matches `[text](target)` in the masked text
//! - Each target is run through an ordered list of ignore rules
//!   (URL, anchor, bracket placeholder, template placeholder, foreign scheme)
//!
//! Malformed or unbalanced syntax never errors; it just does not match.
//!
//! ## Quick Start
//!
//! ```
//! use linkgraph_parser::LinkExtractor;
//!
//! let content = "See [guide](./guide.md) and `[not](./this.md)`.\n[web](https://example.com)";
//!
//! let refs = LinkExtractor::new().extract(content);
//! assert_eq!(refs.len(), 1);
//! assert_eq!(refs[0].target, "./guide.md");
//! assert_eq!(refs[0].line(), 1);
//! ```

mod engine;
pub mod parsers;

pub use engine::{ExcludedRanges, mask_code};
pub use parsers::LinkExtractor;
pub use parsers::link_utils::{IgnoreRule, IgnoreRules};

// Re-export core types for consumers
pub use linkgraph_core::{IgnoreReason, LinkCandidate, SourcePosition};

/// Extract resolvable references with the standard rules.
pub fn extract_references(content: &str) -> Vec<LinkCandidate> {
    LinkExtractor::new().extract(content)
}
