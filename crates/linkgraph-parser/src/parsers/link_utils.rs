//! Ignore rules for link targets.
//!
//! Each rule is an independent predicate. [`IgnoreRules`] evaluates them in
//! order and reports the first one that matches, so every rule can be tested
//! on its own and the list can be extended without touching the others.

use linkgraph_core::IgnoreReason;
use regex::Regex;
use std::sync::LazyLock;

/// A single ignore predicate over a raw link target
pub type IgnoreRule = fn(&str) -> bool;

/// URI scheme prefix: `scheme:`
static URI_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("valid scheme pattern"));

/// Marker used by example paths in documentation templates
const EXAMPLE_MARKER: &str = "your_project";

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// `http://` or `https://` address (case-insensitive scheme)
///
/// ```
/// use linkgraph_parser::parsers::link_utils::is_external_url;
///
/// assert!(is_external_url("https://example.com"));
/// assert!(is_external_url("HTTP://EXAMPLE.COM"));
/// assert!(!is_external_url("./http.md"));
/// ```
pub fn is_external_url(target: &str) -> bool {
    starts_with_ignore_case(target, "http://") || starts_with_ignore_case(target, "https://")
}

/// Same-document anchor such as `#installation`
pub fn is_anchor(target: &str) -> bool {
    target.starts_with('#')
}

/// Whole target wrapped in brackets, such as `[topic]`
pub fn is_bracket_placeholder(target: &str) -> bool {
    target.len() >= 2 && target.starts_with('[') && target.ends_with(']')
}

/// Template or example marker: `<name>` anywhere, or `your_project`
pub fn is_template_placeholder(target: &str) -> bool {
    let angle = target
        .find('<')
        .is_some_and(|open| target[open + 1..].contains('>'));
    angle || target.to_ascii_lowercase().contains(EXAMPLE_MARKER)
}

/// A URI scheme other than `file:`.
///
/// A single-letter scheme is a Windows drive letter, not a scheme.
pub fn is_foreign_scheme(target: &str) -> bool {
    URI_SCHEME.captures(target).is_some_and(|caps| {
        let scheme = &caps[1];
        scheme.len() > 1 && !scheme.eq_ignore_ascii_case("file")
    })
}

/// `./`, `../`, `.\` or `..\` prefix
pub fn is_dot_relative(target: &str) -> bool {
    ["./", "../", ".\\", "..\\"]
        .iter()
        .any(|prefix| target.starts_with(prefix))
}

fn is_not_dot_relative(target: &str) -> bool {
    !is_dot_relative(target)
}

/// Ordered, first-match-wins list of ignore rules.
#[derive(Clone)]
pub struct IgnoreRules {
    rules: Vec<(IgnoreReason, IgnoreRule)>,
}

impl IgnoreRules {
    /// The standard rule order: URL, anchor, bracket placeholder,
    /// template placeholder, foreign scheme.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                (IgnoreReason::ExternalUrl, is_external_url),
                (IgnoreReason::Anchor, is_anchor),
                (IgnoreReason::BracketPlaceholder, is_bracket_placeholder),
                (IgnoreReason::TemplatePlaceholder, is_template_placeholder),
                (IgnoreReason::ForeignScheme, is_foreign_scheme),
            ],
        }
    }

    /// Standard rules plus a final rule dropping anything not `./`/`../` prefixed.
    pub fn relative_only() -> Self {
        Self::standard().with_rule(IgnoreReason::NotRelative, is_not_dot_relative)
    }

    /// Append a rule after the existing ones
    pub fn with_rule(mut self, reason: IgnoreReason, rule: IgnoreRule) -> Self {
        self.rules.push((reason, rule));
        self
    }

    /// First matching rule, if any
    pub fn classify(&self, target: &str) -> Option<IgnoreReason> {
        self.rules
            .iter()
            .find(|(_, rule)| rule(target))
            .map(|&(reason, _)| reason)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for IgnoreRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|(reason, _)| reason))
            .finish()
    }
}
