//! Markdown link matcher: `[text](target)`, `[text](target "title")`, `[text](<target with spaces>)`
//!
//! Runs over text that has already been through the masking pass, so byte
//! offsets and line numbers still refer to the original document.

use regex::Regex;
use std::sync::LazyLock;
use linkgraph_core::{LineIndex, LinkCandidate, SourcePosition};

use super::link_utils::IgnoreRules;

/// Matches markdown links:
/// - `[text](target)`
/// - `[text](target "title")`, also with `'title'` or `(title)`
/// - `[text](<target with spaces>)`
/// - `[text](anything up to the closing paren)` when none of the above fit,
///   e.g. `[text](./my notes.md)`
///
/// Alternatives are tried in order, so a well-formed target with a title
/// never falls through to the bare form. Display text may contain one level
/// of nested brackets. A link never spans lines.
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    const TITLE: &str = r#"(?:"[^"\n]*"|'[^'\n]*'|\([^()\n]*\))"#;
    Regex::new(&format!(
        r#"\[(?P<text>[^\[\]]*(?:\[[^\[\]]*\][^\[\]]*)*)\]\((?:<(?P<angle>[^<>\n]+)>(?:[ \t]+{TITLE})?[ \t]*|(?P<url>[^()\s"']+)(?:[ \t]+{TITLE})?[ \t]*|(?P<bare>[^)\n]+))\)"#
    ))
    .expect("valid markdown link pattern")
});

/// Fast pre-filter: skip regex if no markdown link pattern exists.
#[inline]
fn has_markdown_link(content: &str) -> bool {
    content.contains("](")
}

/// Find every link in `masked`, in document order, classifying each target.
pub(crate) fn match_links(masked: &str, index: &LineIndex, rules: &IgnoreRules) -> Vec<LinkCandidate> {
    if !has_markdown_link(masked) {
        return Vec::new();
    }

    MARKDOWN_LINK
        .captures_iter(masked)
        .filter_map(|caps| {
            let full_match = caps.get(0)?;
            let target = caps
                .name("angle")
                .or_else(|| caps.name("url"))
                .or_else(|| caps.name("bare"))
                .map(|m| m.as_str().trim())?;
            if target.is_empty() {
                return None;
            }

            let display_text = caps.name("text").map(|m| m.as_str()).unwrap_or("");

            Some(LinkCandidate {
                target: target.to_string(),
                display_text: display_text.to_string(),
                position: SourcePosition::from_offset_indexed(
                    index,
                    full_match.start(),
                    full_match.len(),
                ),
                ignored: rules.classify(target),
            })
        })
        .collect()
}
