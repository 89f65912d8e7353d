//! Degree statistics and hub rankings.
//!
//! All counts are taken over distinct (source, target) pairs, so a document
//! that links to the same target ten times contributes one to each degree.

use crate::graph::ReferenceGraph;
use linkgraph_core::DocumentId;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Length of the hub tables in the text report
pub const DEFAULT_HUB_LIMIT: usize = 10;

/// One entry of a hub ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hub<'a> {
    pub id: &'a DocumentId,
    pub degree: usize,
}

/// Summary counters for the report header and structured export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    /// Node count
    pub total_files: usize,
    /// Distinct edges
    pub total_links: usize,
    pub orphan_files: usize,
    pub broken_links: usize,
}

/// Read-only analytics over a finished graph
pub struct GraphAnalytics<'a> {
    graph: &'a ReferenceGraph,
}

impl<'a> GraphAnalytics<'a> {
    pub fn new(graph: &'a ReferenceGraph) -> Self {
        Self { graph }
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            total_files: self.graph.node_count(),
            total_links: self.graph.edge_count(),
            orphan_files: self.graph.orphans().len(),
            broken_links: self.graph.broken_links().len(),
        }
    }

    /// Nodes with non-zero degree in `direction`, unordered
    fn degrees(&self, direction: Direction) -> Vec<Hub<'a>> {
        let inner = self.graph.inner();
        inner
            .node_indices()
            .map(|idx| Hub {
                id: &inner[idx],
                degree: inner.edges_directed(idx, direction).count(),
            })
            .filter(|hub| hub.degree > 0)
            .collect()
    }

    /// Highest degree first, ties broken by identity ascending
    fn rank(mut hubs: Vec<Hub<'a>>, limit: usize) -> Vec<Hub<'a>> {
        hubs.sort_by_key(|hub| (Reverse(hub.degree), hub.id));
        hubs.truncate(limit);
        hubs
    }

    /// Most referenced documents
    pub fn top_inbound(&self, limit: usize) -> Vec<Hub<'a>> {
        Self::rank(self.degrees(Direction::Incoming), limit)
    }

    /// Documents with the most outbound references
    pub fn top_outbound(&self, limit: usize) -> Vec<Hub<'a>> {
        Self::rank(self.degrees(Direction::Outgoing), limit)
    }
}
