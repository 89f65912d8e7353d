//! Reference graph using petgraph

use linkgraph_core::prelude::*;
use petgraph::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A reference whose target does not exist (or, under the strict policy,
/// could not be resolved at all)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    /// Document containing the reference
    pub source: DocumentId,
    /// Target exactly as written
    pub target: String,
    /// 1-based line in the source document
    pub line: usize,
}

/// Directed graph of document identities built from one scan.
///
/// Nodes are every scanned document plus every existing resolved target.
/// Each distinct (source, target) pair is a single petgraph edge whose
/// weight counts how many times the reference occurred; the raw occurrence
/// list is kept separately in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    graph: DiGraph<DocumentId, usize>,
    index: HashMap<DocumentId, NodeIndex>,
    occurrences: Vec<(DocumentId, DocumentId)>,
    broken: Vec<BrokenLink>,
    references: Vec<Reference>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning the existing index if already present
    pub fn add_document(&mut self, id: DocumentId) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.index.insert(id, idx);
        idx
    }

    /// Record one occurrence of `source -> target`, creating both nodes
    pub fn add_reference_edge(&mut self, source: DocumentId, target: DocumentId) {
        let from = self.add_document(source.clone());
        let to = self.add_document(target.clone());

        match self.graph.find_edge(from, to) {
            Some(edge) => self.graph[edge] += 1,
            None => {
                self.graph.add_edge(from, to, 1);
            }
        }
        self.occurrences.push((source, target));
    }

    pub fn add_broken(&mut self, broken: BrokenLink) {
        self.broken.push(broken);
    }

    pub fn record(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct (source, target) pairs
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Every node, sorted by identity
    pub fn nodes(&self) -> Vec<&DocumentId> {
        let mut nodes: Vec<_> = self.graph.node_weights().collect();
        nodes.sort();
        nodes
    }

    /// Distinct edges in order of first occurrence.
    ///
    /// Edges are never removed, so petgraph's edge order is insertion order.
    pub fn unique_edges(&self) -> Vec<(&DocumentId, &DocumentId)> {
        self.graph
            .edge_references()
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
            .collect()
    }

    /// Every edge occurrence, duplicates included, in scan order
    pub fn occurrences(&self) -> &[(DocumentId, DocumentId)] {
        &self.occurrences
    }

    /// How many times `source -> target` was referenced
    pub fn multiplicity(&self, source: &DocumentId, target: &DocumentId) -> usize {
        self.edge_between(source, target)
            .map_or(0, |edge| self.graph[edge])
    }

    fn edge_between(&self, source: &DocumentId, target: &DocumentId) -> Option<EdgeIndex> {
        let from = *self.index.get(source)?;
        let to = *self.index.get(target)?;
        self.graph.find_edge(from, to)
    }

    fn is_linked(&self, idx: NodeIndex) -> bool {
        self.graph.neighbors_undirected(idx).next().is_some()
    }

    /// Nodes with at least one inbound or outbound edge, sorted
    pub fn linked_nodes(&self) -> Vec<&DocumentId> {
        let mut linked: Vec<_> = self
            .graph
            .node_indices()
            .filter(|&idx| self.is_linked(idx))
            .map(|idx| &self.graph[idx])
            .collect();
        linked.sort();
        linked
    }

    /// Nodes with no edges at all, sorted
    pub fn orphans(&self) -> Vec<&DocumentId> {
        let mut orphans: Vec<_> = self
            .graph
            .node_indices()
            .filter(|&idx| !self.is_linked(idx))
            .map(|idx| &self.graph[idx])
            .collect();
        orphans.sort();
        orphans
    }

    /// Broken links in the order they were found
    pub fn broken_links(&self) -> &[BrokenLink] {
        &self.broken
    }

    /// Every processed link with its final status
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Distinct inbound edges of `id`
    pub fn in_degree(&self, id: &DocumentId) -> usize {
        self.index
            .get(id)
            .map_or(0, |&idx| self.graph.edges_directed(idx, Incoming).count())
    }

    /// Distinct outbound edges of `id`
    pub fn out_degree(&self, id: &DocumentId) -> usize {
        self.index
            .get(id)
            .map_or(0, |&idx| self.graph.edges_directed(idx, Outgoing).count())
    }

    /// Underlying petgraph graph
    pub fn inner(&self) -> &DiGraph<DocumentId, usize> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> DocumentId {
        DocumentId::new(s)
    }

    #[test]
    fn test_add_document_is_idempotent() {
        let mut graph = ReferenceGraph::new();
        let a = graph.add_document(id("a.md"));
        let again = graph.add_document(id("a.md"));
        assert_eq!(a, again);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_duplicate_references_collapse() {
        let mut graph = ReferenceGraph::new();
        graph.add_reference_edge(id("a.md"), id("b.md"));
        graph.add_reference_edge(id("a.md"), id("b.md"));
        graph.add_reference_edge(id("b.md"), id("a.md"));

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.occurrences().len(), 3);
        assert_eq!(graph.multiplicity(&id("a.md"), &id("b.md")), 2);
        assert_eq!(graph.multiplicity(&id("b.md"), &id("a.md")), 1);
        assert_eq!(graph.multiplicity(&id("a.md"), &id("c.md")), 0);
    }

    #[test]
    fn test_unique_edges_keep_first_occurrence_order() {
        let mut graph = ReferenceGraph::new();
        graph.add_reference_edge(id("z.md"), id("a.md"));
        graph.add_reference_edge(id("a.md"), id("z.md"));
        graph.add_reference_edge(id("z.md"), id("a.md"));

        let edges: Vec<_> = graph
            .unique_edges()
            .into_iter()
            .map(|(s, t)| (s.as_str(), t.as_str()))
            .collect();
        assert_eq!(edges, vec![("z.md", "a.md"), ("a.md", "z.md")]);
    }

    #[test]
    fn test_orphans_partition_nodes() {
        let mut graph = ReferenceGraph::new();
        graph.add_document(id("lonely.md"));
        graph.add_reference_edge(id("a.md"), id("b.md"));
        graph.add_reference_edge(id("c.md"), id("c.md"));

        let linked = graph.linked_nodes();
        let orphans = graph.orphans();
        assert_eq!(orphans, vec![&id("lonely.md")]);
        assert_eq!(linked, vec![&id("a.md"), &id("b.md"), &id("c.md")]);

        let mut union: Vec<_> = linked.into_iter().chain(orphans).collect();
        union.sort();
        assert_eq!(union, graph.nodes());
    }

    #[test]
    fn test_degrees_count_distinct_edges() {
        let mut graph = ReferenceGraph::new();
        graph.add_reference_edge(id("a.md"), id("hub.md"));
        graph.add_reference_edge(id("a.md"), id("hub.md"));
        graph.add_reference_edge(id("b.md"), id("hub.md"));

        assert_eq!(graph.in_degree(&id("hub.md")), 2);
        assert_eq!(graph.out_degree(&id("a.md")), 1);
        assert_eq!(graph.in_degree(&id("missing.md")), 0);
    }
}
