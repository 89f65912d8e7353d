//! Link integrity verifier

use crate::report::{Issue, VerificationReport};
use linkgraph_core::prelude::*;
use linkgraph_corpus::{CachedProbe, Corpus, ExistenceProbe, FsProbe, resolve_reference};
use linkgraph_parser::LinkExtractor;
use std::path::Path;
use tracing::instrument;

/// Checks every reference in a corpus against the filesystem.
///
/// Each distinct resolved path is probed once per run. Targets outside the
/// corpus root are out of scope and never probed or flagged.
pub struct Verifier<P = FsProbe> {
    config: ScanConfig,
    extractor: LinkExtractor,
    probe: CachedProbe<P>,
    issues: Vec<Issue>,
    documents_scanned: usize,
    references_checked: usize,
}

impl Verifier<FsProbe> {
    pub fn new(config: &ScanConfig) -> Self {
        Self::with_probe(config, FsProbe)
    }
}

impl<P: ExistenceProbe> Verifier<P> {
    /// Verifier over a custom probe, still cached
    pub fn with_probe(config: &ScanConfig, probe: P) -> Self {
        let extractor = if config.relative_only {
            LinkExtractor::relative_only()
        } else {
            LinkExtractor::new()
        };

        Self {
            config: config.clone(),
            extractor,
            probe: CachedProbe::new(probe),
            issues: Vec::new(),
            documents_scanned: 0,
            references_checked: 0,
        }
    }

    fn identity(&self, path: &Path) -> DocumentId {
        DocumentId::from_path(&self.config.root, path)
    }

    /// Check every reference in one document's text
    pub fn verify_document(&mut self, path: &Path, content: &str) {
        self.documents_scanned += 1;
        let file = self.identity(path);

        for link in self.extractor.extract(content) {
            self.references_checked += 1;
            let line = link.line();

            let expected = match resolve_reference(&link.target, path) {
                Ok(expected) => expected,
                Err(e) => {
                    if self.config.policy == ResolutionPolicy::Strict {
                        self.issues.push(Issue::UnresolvableReference {
                            file: file.clone(),
                            line,
                            target: link.target,
                            reason: e.to_string(),
                        });
                    } else {
                        log::debug!("{}:{}: not verifying '{}': {}", file, line, link.target, e);
                    }
                    continue;
                }
            };

            if !self.config.contains(&expected) {
                log::debug!("{}:{}: '{}' is outside the corpus", file, line, link.target);
                continue;
            }

            if !self.probe.exists(&expected) {
                self.issues.push(Issue::BrokenLink {
                    file: file.clone(),
                    line,
                    target: link.target,
                    expected,
                });
            }
        }
    }

    /// Record a document that could not be read
    pub fn record_unreadable(&mut self, path: &Path, error: &Error) {
        self.documents_scanned += 1;
        self.issues.push(Issue::UnreadableDocument {
            file: self.identity(path),
            message: error.to_string(),
        });
    }

    /// Verify every document in the corpus
    #[instrument(skip(self, corpus), fields(root = ?corpus.root(), documents = corpus.len()), name = "verify_corpus")]
    pub fn verify_corpus(&mut self, corpus: &Corpus) {
        for path in corpus.documents() {
            match corpus.read(path) {
                Ok(content) => self.verify_document(path, &content),
                Err(e) => {
                    log::warn!("Cannot read {}: {}", path.display(), e);
                    self.record_unreadable(path, &e);
                }
            }
        }

        let stats = self.probe.stats();
        log::info!(
            "Verified {} references in {} documents: {} issues ({} probes, {} cache hits)",
            self.references_checked,
            self.documents_scanned,
            self.issues.len(),
            stats.probes,
            stats.hits()
        );
    }

    pub fn probe(&self) -> &CachedProbe<P> {
        &self.probe
    }

    pub fn finish(self) -> VerificationReport {
        VerificationReport {
            root: self.config.root,
            documents_scanned: self.documents_scanned,
            references_checked: self.references_checked,
            issues: self.issues,
            cache: self.probe.stats(),
        }
    }
}

/// Discover the corpus under `config.root` and verify it.
///
/// Fails only when the corpus root cannot be listed.
pub fn verify(config: ScanConfig) -> Result<VerificationReport> {
    let mut verifier = Verifier::new(&config);
    let corpus = Corpus::open(config)?;
    verifier.verify_corpus(&corpus);
    Ok(verifier.finish())
}
