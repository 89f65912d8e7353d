//! Core data models shared by the extractor, resolver, graph and verifier.
//!
//! These types are designed to be:
//! - **Serializable**: output-facing types derive Serialize
//! - **Platform-stable**: document identities are `/`-separated strings
//! - **Type-Safe**: enums replace magic strings for link status

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};

/// Position in source text (line, column, byte offset)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    pub length: usize,
}

impl SourcePosition {
    /// Create position from byte offset using a pre-computed line index.
    pub fn from_offset_indexed(index: &LineIndex, offset: usize, length: usize) -> Self {
        let (line, column) = index.line_col(offset);
        Self {
            line,
            column,
            offset,
            length,
        }
    }
}

/// Pre-computed line starts for O(log n) line/column lookup.
///
/// Build once per document, then use for all position lookups.
///
/// # Example
/// ```
/// use linkgraph_core::{LineIndex, SourcePosition};
///
/// let content = "Line 1\nLine 2\nLine 3";
/// let index = LineIndex::new(content);
///
/// let pos = SourcePosition::from_offset_indexed(&index, 7, 6);
/// assert_eq!(pos.line, 2);
/// assert_eq!(pos.column, 1);
/// ```
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offsets where each line starts (line 1 = index 0)
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build line index in O(n).
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Get (line, column) for a byte offset via binary search.
    ///
    /// Line numbers start at 1, column numbers start at 1.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line_idx = self.line_starts.partition_point(|&start| start <= offset);
        let line = line_idx.max(1);
        let line_start = self
            .line_starts
            .get(line_idx.saturating_sub(1))
            .copied()
            .unwrap_or(0);
        (line, offset - line_start + 1)
    }

    /// Get total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Canonical identity of a document: its path relative to the corpus root,
/// joined with `/` regardless of platform.
///
/// Paths outside the root keep their absolute form (still `/`-joined) so
/// that they remain distinguishable and printable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap an already-normalized identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().replace('\\', "/"))
    }

    /// Build the identity of `path` relative to `root`.
    pub fn from_path(root: &Path, path: &Path) -> Self {
        match path.strip_prefix(root) {
            Ok(relative) => Self(join_components(relative)),
            Err(_) => Self(join_components(path)),
        }
    }

    /// The identity string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment, used as a short display label.
    pub fn base_name(&self) -> &str {
        self.0.rsplit('/').find(|s| !s.is_empty()).unwrap_or(&self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn join_components(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                out.push_str(&prefix.as_os_str().to_string_lossy().replace('\\', "/"));
            }
            Component::RootDir => out.push('/'),
            Component::CurDir => {}
            Component::ParentDir => {
                push_segment(&mut out, "..");
            }
            Component::Normal(name) => {
                push_segment(&mut out, &name.to_string_lossy());
            }
        }
    }
    out
}

fn push_segment(out: &mut String, segment: &str) {
    if !out.is_empty() && !out.ends_with('/') {
        out.push('/');
    }
    out.push_str(segment);
}

/// Why a candidate link is not treated as a cross-document reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// `http://` or `https://` address
    ExternalUrl,
    /// Same-document anchor: `#section`
    Anchor,
    /// Bracket-only placeholder: `[topic]`
    BracketPlaceholder,
    /// Example or template marker: `<name>`, `your_project`
    TemplatePlaceholder,
    /// Any URI scheme other than `file:` (`mailto:`, `ftp:`, ...)
    ForeignScheme,
    /// Not `./` or `../` prefixed while extracting in relative-only mode
    NotRelative,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IgnoreReason::ExternalUrl => "external URL",
            IgnoreReason::Anchor => "in-document anchor",
            IgnoreReason::BracketPlaceholder => "bracket placeholder",
            IgnoreReason::TemplatePlaceholder => "template placeholder",
            IgnoreReason::ForeignScheme => "non-file URI scheme",
            IgnoreReason::NotRelative => "not a relative path",
        };
        f.write_str(s)
    }
}

/// One `[text](target)` occurrence found by the extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCandidate {
    /// Target exactly as written (angle brackets stripped)
    pub target: String,
    pub display_text: String,
    pub position: SourcePosition,
    /// Set when an ignore classifier matched
    pub ignored: Option<IgnoreReason>,
}

impl LinkCandidate {
    /// 1-based line of the link
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// Whether the candidate should be resolved
    pub fn is_reference(&self) -> bool {
        self.ignored.is_none()
    }
}

/// Outcome of processing one candidate link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ReferenceStatus {
    /// Resolved to a path that exists on disk
    Resolved,
    /// Resolved to a path that does not exist
    Broken,
    /// Dropped by an ignore classifier
    Ignored(IgnoreReason),
    /// Resolution failed and the lenient policy skipped it
    Unverified,
}

/// A parsed link from one document, with its final status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub source: DocumentId,
    pub target: String,
    pub line: usize,
    pub status: ReferenceStatus,
}

impl Reference {
    /// Create a new reference record
    pub fn new(
        source: DocumentId,
        target: impl Into<String>,
        line: usize,
        status: ReferenceStatus,
    ) -> Self {
        Self {
            source,
            target: target.into(),
            line,
            status,
        }
    }
}
