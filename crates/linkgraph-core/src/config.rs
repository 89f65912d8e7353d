//! Scan configuration.
//!
//! Follows a builder pattern with validation at `build()`. There is no
//! configuration file: every field maps to a command-line flag.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Extensions recognized as documents by default (compared case-insensitively)
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Path segments never descended into, in addition to hidden segments
pub const DEFAULT_EXCLUDED_SEGMENTS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    "build",
    "dist",
    "__pycache__",
    "venv",
    ".venv",
];

/// What to do with a reference whose target cannot be resolved to a path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Skip it: the reference is neither a link nor a broken link
    #[default]
    Lenient,
    /// Report it alongside broken links
    Strict,
}

/// Configuration for one scan of a corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Canonical absolute corpus root
    pub root: PathBuf,
    /// Lowercase extensions without the leading dot
    pub extensions: BTreeSet<String>,
    /// Segment names skipped anywhere below the root
    pub excluded_segments: BTreeSet<String>,
    /// Descend into `.hidden` segments
    pub include_hidden: bool,
    pub policy: ResolutionPolicy,
    /// Only treat `./` and `../` targets as references
    pub relative_only: bool,
}

impl ScanConfig {
    /// Create a new scan config with builder
    pub fn builder(root: impl Into<PathBuf>) -> ScanConfigBuilder {
        ScanConfigBuilder::new(root)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(Error::corpus_root(&self.root, "not a directory"));
        }

        if self.extensions.is_empty() {
            return Err(Error::config_error(
                "At least one document extension is required",
            ));
        }

        if let Some(bad) = self
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.contains(['/', '\\', '.']))
        {
            return Err(Error::config_error(format!(
                "Invalid document extension: '{}'",
                bad
            )));
        }

        Ok(())
    }

    /// Whether `path` carries a recognized document extension
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }

    /// Whether a path segment below the root must be skipped
    pub fn is_excluded_segment(&self, segment: &str) -> bool {
        (!self.include_hidden && segment.starts_with('.'))
            || self.excluded_segments.contains(segment)
    }

    /// Whether `path` lies under the corpus root
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }
}

/// Builder for ScanConfig
pub struct ScanConfigBuilder {
    root: PathBuf,
    extensions: BTreeSet<String>,
    excluded_segments: BTreeSet<String>,
    include_hidden: bool,
    policy: ResolutionPolicy,
    relative_only: bool,
}

impl ScanConfigBuilder {
    /// Create a new builder with the default extensions and exclude list
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            excluded_segments: DEFAULT_EXCLUDED_SEGMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            include_hidden: false,
            policy: ResolutionPolicy::Lenient,
            relative_only: false,
        }
    }

    /// Replace the default extension set
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Add one segment name to the exclude list
    pub fn exclude(mut self, segment: impl Into<String>) -> Self {
        self.excluded_segments.insert(segment.into());
        self
    }

    /// Descend into hidden segments
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Report unresolvable references instead of skipping them
    pub fn strict(mut self, strict: bool) -> Self {
        self.policy = if strict {
            ResolutionPolicy::Strict
        } else {
            ResolutionPolicy::Lenient
        };
        self
    }

    /// Only extract `./` and `../` targets
    pub fn relative_only(mut self, relative_only: bool) -> Self {
        self.relative_only = relative_only;
        self
    }

    /// Canonicalize the root, build and validate
    pub fn build(self) -> Result<ScanConfig> {
        let root = std::fs::canonicalize(&self.root)
            .map_err(|e| Error::corpus_root(&self.root, e.to_string()))?;

        let config = ScanConfig {
            root,
            extensions: self.extensions,
            excluded_segments: self.excluded_segments,
            include_hidden: self.include_hidden,
            policy: self.policy,
            relative_only: self.relative_only,
        };
        config.validate()?;
        log::debug!(
            "Scan config: root={} extensions={:?} policy={:?} relative_only={}",
            config.root.display(),
            config.extensions,
            config.policy,
            config.relative_only
        );
        Ok(config)
    }
}
