//! Graph construction: extract, resolve, probe, accumulate.

use crate::graph::{BrokenLink, ReferenceGraph};
use linkgraph_core::prelude::*;
use linkgraph_corpus::{CachedProbe, Corpus, ExistenceProbe, resolve_reference};
use linkgraph_parser::LinkExtractor;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Accumulates one scan's references into a [`ReferenceGraph`].
///
/// The builder owns its graph and its probe; nothing is shared between
/// scans. Generic over the probe so tests can count or fake lookups.
pub struct GraphBuilder<P = CachedProbe> {
    root: PathBuf,
    policy: ResolutionPolicy,
    extractor: LinkExtractor,
    probe: P,
    graph: ReferenceGraph,
}

impl GraphBuilder<CachedProbe> {
    /// Builder probing the real filesystem through a per-scan cache
    pub fn new(config: &ScanConfig) -> Self {
        Self::with_probe(config, CachedProbe::filesystem())
    }
}

impl<P: ExistenceProbe> GraphBuilder<P> {
    pub fn with_probe(config: &ScanConfig, probe: P) -> Self {
        let extractor = if config.relative_only {
            LinkExtractor::relative_only()
        } else {
            LinkExtractor::new()
        };

        Self {
            root: config.root.clone(),
            policy: config.policy,
            extractor,
            probe,
            graph: ReferenceGraph::new(),
        }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Add one document and every reference found in `content`.
    pub fn scan_document(&mut self, path: &Path, content: &str) {
        let source = DocumentId::from_path(&self.root, path);
        self.graph.add_document(source.clone());

        let candidates = self.extractor.extract_all(content);
        log::debug!("{}: {} links", source, candidates.len());

        for candidate in candidates {
            let line = candidate.line();
            let status = match candidate.ignored {
                Some(reason) => ReferenceStatus::Ignored(reason),
                None => self.resolve_one(&source, path, &candidate.target, line),
            };
            self.graph
                .record(Reference::new(source.clone(), candidate.target, line, status));
        }
    }

    fn resolve_one(
        &mut self,
        source: &DocumentId,
        path: &Path,
        target: &str,
        line: usize,
    ) -> ReferenceStatus {
        match resolve_reference(target, path) {
            Ok(resolved) if self.probe.exists(&resolved) => {
                let target_id = DocumentId::from_path(&self.root, &resolved);
                self.graph.add_reference_edge(source.clone(), target_id);
                ReferenceStatus::Resolved
            }
            Ok(_) => {
                self.push_broken(source, target, line);
                ReferenceStatus::Broken
            }
            Err(e) => match self.policy {
                ResolutionPolicy::Lenient => {
                    log::debug!("{}:{}: skipping '{}': {}", source, line, target, e);
                    ReferenceStatus::Unverified
                }
                ResolutionPolicy::Strict => {
                    self.push_broken(source, target, line);
                    ReferenceStatus::Broken
                }
            },
        }
    }

    fn push_broken(&mut self, source: &DocumentId, target: &str, line: usize) {
        self.graph.add_broken(BrokenLink {
            source: source.clone(),
            target: target.to_string(),
            line,
        });
    }

    /// Scan every document in the corpus.
    ///
    /// Unreadable documents are skipped and take no part in the graph.
    #[instrument(skip(self, corpus), fields(root = ?corpus.root(), documents = corpus.len()), name = "graph_scan")]
    pub fn scan_corpus(&mut self, corpus: &Corpus) {
        for path in corpus.documents() {
            match corpus.read(path) {
                Ok(content) => self.scan_document(path, &content),
                Err(e) => log::warn!("Skipping unreadable document {}: {}", path.display(), e),
            }
        }

        log::info!(
            "Graph built: {} nodes, {} links, {} broken",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.graph.broken_links().len()
        );
    }

    pub fn finish(self) -> ReferenceGraph {
        self.graph
    }
}

/// Discover the corpus under `config.root` and build its graph.
///
/// Fails only when the corpus root cannot be listed.
pub fn build_graph(config: ScanConfig) -> Result<ReferenceGraph> {
    let mut builder = GraphBuilder::new(&config);
    let corpus = Corpus::open(config)?;
    builder.scan_corpus(&corpus);
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn corpus(files: &[(&str, &[u8])]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (name, content) in files {
            let path = temp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        temp
    }

    fn strs(ids: Vec<&DocumentId>) -> Vec<&str> {
        ids.into_iter().map(DocumentId::as_str).collect()
    }

    #[test]
    fn test_mutual_links_and_orphan() {
        let temp = corpus(&[
            ("A.md", b"[b](./B.md)"),
            ("B.md", b"[a](./A.md)"),
            ("C.md", b"no links"),
        ]);
        let graph = build_graph(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();

        let edges: Vec<_> = graph
            .unique_edges()
            .into_iter()
            .map(|(s, t)| (s.as_str(), t.as_str()))
            .collect();
        assert_eq!(edges, vec![("A.md", "B.md"), ("B.md", "A.md")]);
        assert_eq!(strs(graph.linked_nodes()), vec!["A.md", "B.md"]);
        assert_eq!(strs(graph.orphans()), vec!["C.md"]);
        assert!(graph.broken_links().is_empty());
    }

    #[test]
    fn test_missing_target_is_broken() {
        let temp = corpus(&[("A.md", b"See [gone](./missing.md).")]);
        let graph = build_graph(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();

        assert_eq!(
            graph.broken_links(),
            &[BrokenLink {
                source: DocumentId::new("A.md"),
                target: "./missing.md".to_string(),
                line: 1,
            }]
        );
        assert_eq!(strs(graph.nodes()), vec!["A.md"]);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains(&DocumentId::new("missing.md")));
    }

    #[test]
    fn test_unusual_link_shapes_are_reported_broken() {
        let climbing = format!("{}nowhere.md", "../".repeat(64));
        let content = format!("[x]({climbing})\n[y](./my notes.md)\n[z](./b.md 'title')\n");
        let temp = corpus(&[("A.md", content.as_bytes())]);
        let graph = build_graph(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();

        let broken: Vec<_> = graph
            .broken_links()
            .iter()
            .map(|b| (b.target.as_str(), b.line))
            .collect();
        assert_eq!(
            broken,
            vec![
                (climbing.as_str(), 1),
                ("./my notes.md", 2),
                ("./b.md", 3),
            ]
        );
        assert!(
            graph
                .references()
                .iter()
                .all(|r| r.status == ReferenceStatus::Broken)
        );
    }

    #[test]
    fn test_remote_file_host_follows_policy() {
        let temp = corpus(&[("A.md", b"[r](file://fileserver/A.md)")]);

        let lenient = build_graph(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();
        assert!(lenient.broken_links().is_empty());
        assert_eq!(lenient.references()[0].status, ReferenceStatus::Unverified);
        assert_eq!(lenient.edge_count(), 0);

        let strict = build_graph(
            ScanConfig::builder(temp.path())
                .strict(true)
                .build()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(strict.broken_links()[0].target, "file://fileserver/A.md");
    }

    #[test]
    fn test_nested_targets_use_root_relative_identity() {
        let temp = corpus(&[
            ("README.md", b"[guide](./docs/guide.md#setup)"),
            ("docs/guide.md", b"[home](../README.md)\n[img](./img/flow.png)"),
            ("docs/img/flow.png", b""),
        ]);
        let graph = build_graph(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();

        assert_eq!(
            strs(graph.nodes()),
            vec!["README.md", "docs/guide.md", "docs/img/flow.png"]
        );
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.orphans().is_empty());
    }

    #[test]
    fn test_ignored_and_code_links_do_not_count() {
        let temp = corpus(&[(
            "A.md",
            b"[web](https://example.com) [top](#top) [p]([x])\n```\n[code](./nope.md)\n```\n`[inline](./nope.md)`",
        )]);
        let graph = build_graph(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();

        assert!(graph.broken_links().is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.references().len(), 3);
        assert!(
            graph
                .references()
                .iter()
                .all(|r| matches!(r.status, ReferenceStatus::Ignored(_)))
        );
    }

    #[test]
    fn test_unreadable_document_is_skipped() {
        let temp = corpus(&[("bad.md", &[0xff, 0xfe, 0x00]), ("good.md", b"text")]);
        let graph = build_graph(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();

        assert_eq!(strs(graph.nodes()), vec!["good.md"]);
    }

    #[test]
    fn test_resolution_policy() {
        let temp = corpus(&[("A.md", b"[nul](./a\0b.md)")]);

        let lenient = build_graph(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();
        assert!(lenient.broken_links().is_empty());
        assert_eq!(lenient.references()[0].status, ReferenceStatus::Unverified);

        let strict = build_graph(
            ScanConfig::builder(temp.path())
                .strict(true)
                .build()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(strict.broken_links().len(), 1);
        assert_eq!(strict.references()[0].status, ReferenceStatus::Broken);
    }

    #[test]
    fn test_relative_only_mode() {
        let temp = corpus(&[("A.md", b"[b](B.md) [c](./C.md)"), ("B.md", b""), ("C.md", b"")]);
        let config = ScanConfig::builder(temp.path())
            .relative_only(true)
            .build()
            .unwrap();
        let graph = build_graph(config).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(strs(graph.orphans()), vec!["B.md"]);
    }

    #[test]
    fn test_repeated_target_probed_once() {
        let temp = corpus(&[
            ("a.md", b"[x](./shared.md) [x](./shared.md)"),
            ("b.md", b"[x](./shared.md)"),
        ]);
        let config = ScanConfig::builder(temp.path()).build().unwrap();
        let corpus = Corpus::open(config.clone()).unwrap();

        let mut builder = GraphBuilder::new(&config);
        builder.scan_corpus(&corpus);
        let stats = builder.probe().stats();
        assert_eq!(stats.lookups, 3);
        assert_eq!(stats.probes, 1);
        assert_eq!(builder.finish().broken_links().len(), 3);
    }

    #[test]
    fn test_fake_probe() {
        let config = ScanConfig::builder(TempDir::new().unwrap().path())
            .build()
            .unwrap();
        let mut builder = GraphBuilder::with_probe(&config, |_: &Path| true);
        builder.scan_document(&config.root.join("a.md"), "[b](./b.md)");
        let graph = builder.finish();

        assert_eq!(strs(graph.linked_nodes()), vec!["a.md", "b.md"]);
    }
}
