//! Verification issues and their rendering

use linkgraph_core::{DocumentId, Error, Result, to_json_string};
use linkgraph_corpus::CacheStats;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One defect found while verifying the corpus.
///
/// Broken links are recorded per occurrence: the same missing target
/// referenced twice is two issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// Resolved target does not exist
    BrokenLink {
        file: DocumentId,
        line: usize,
        target: String,
        expected: PathBuf,
    },
    /// Document could not be read or decoded
    UnreadableDocument { file: DocumentId, message: String },
    /// Target could not be resolved to a path (strict policy only)
    UnresolvableReference {
        file: DocumentId,
        line: usize,
        target: String,
        reason: String,
    },
}

impl Issue {
    pub fn file(&self) -> &DocumentId {
        match self {
            Issue::BrokenLink { file, .. }
            | Issue::UnreadableDocument { file, .. }
            | Issue::UnresolvableReference { file, .. } => file,
        }
    }
}

/// Output format for a verification report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "human" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(Error::config_error(format!(
                "Unknown report format '{}'. Valid options: text, json",
                s
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Result of verifying one corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub root: PathBuf,
    pub documents_scanned: usize,
    /// References that reached the resolver (ignored links excluded)
    pub references_checked: usize,
    pub issues: Vec<Issue>,
    pub cache: CacheStats,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn broken_links(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, Issue::BrokenLink { .. }))
    }

    pub fn unreadable_documents(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, Issue::UnreadableDocument { .. }))
    }

    pub fn unresolvable_references(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, Issue::UnresolvableReference { .. }))
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Json => self.to_json(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Rendered<'a> {
            passed: bool,
            #[serde(flatten)]
            report: &'a VerificationReport,
        }

        to_json_string(
            &Rendered {
                passed: self.passed(),
                report: self,
            },
            "verification report",
        )
    }

    /// Full text report. Every issue is listed whether or not the run passed.
    pub fn to_text(&self) -> String {
        let rule = "=".repeat(60);
        let mut lines = vec![
            rule.clone(),
            "Link Integrity Report".to_string(),
            rule.clone(),
            format!("Root: {}", self.root.display()),
            format!("Documents scanned: {}", self.documents_scanned),
            format!("References checked: {}", self.references_checked),
            String::new(),
        ];

        if self.passed() {
            lines.push("✅ No issues found. All references resolve.".to_string());
        }

        let broken: Vec<_> = self.broken_links().collect();
        if !broken.is_empty() {
            lines.push(format!("❌ {} broken link(s):", broken.len()));
            lines.push(String::new());
            for issue in broken {
                if let Issue::BrokenLink {
                    file,
                    line,
                    target,
                    expected,
                } = issue
                {
                    lines.push(format!("  File: {}:{}", file, line));
                    lines.push(format!("  Reference: {}", target));
                    lines.push(format!("  Expected: {}", expected.display()));
                    lines.push(String::new());
                }
            }
        }

        let unresolvable: Vec<_> = self.unresolvable_references().collect();
        if !unresolvable.is_empty() {
            lines.push(format!("❌ {} unresolvable reference(s):", unresolvable.len()));
            lines.push(String::new());
            for issue in unresolvable {
                if let Issue::UnresolvableReference {
                    file,
                    line,
                    target,
                    reason,
                } = issue
                {
                    lines.push(format!("  File: {}:{}", file, line));
                    lines.push(format!("  Reference: {}", target));
                    lines.push(format!("  Reason: {}", reason));
                    lines.push(String::new());
                }
            }
        }

        let unreadable: Vec<_> = self.unreadable_documents().collect();
        if !unreadable.is_empty() {
            lines.push(format!("⚠️ {} unreadable document(s):", unreadable.len()));
            lines.push(String::new());
            for issue in unreadable {
                if let Issue::UnreadableDocument { file, message } = issue {
                    lines.push(format!("  File: {}", file));
                    lines.push(format!("  Message: {}", message));
                    lines.push(String::new());
                }
            }
        }

        lines.push(rule);
        lines.join("\n")
    }
}
