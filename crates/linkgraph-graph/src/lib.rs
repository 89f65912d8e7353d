//! # Reference Graph
//!
//! Directed graph of cross-document references, built with petgraph.
//!
//! Provides:
//! - Graph construction from a scanned corpus
//! - Broken link collection
//! - Orphan detection
//! - Degree statistics and hub rankings
//!
//! ## Quick Start
//!
//! ```no_run
//! use linkgraph_core::ScanConfig;
//! use linkgraph_graph::{GraphAnalytics, build_graph};
//!
//! let graph = build_graph(ScanConfig::builder("./docs").build()?)?;
//!
//! for broken in graph.broken_links() {
//!     println!("{}:{} -> {}", broken.source, broken.line, broken.target);
//! }
//!
//! let analytics = GraphAnalytics::new(&graph);
//! for hub in analytics.top_inbound(5) {
//!     println!("{:3} {}", hub.degree, hub.id);
//! }
//! # Ok::<(), linkgraph_core::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Nodes**: every scanned document plus every existing resolved target
//! - **Edges**: distinct (source, target) pairs; repeat references raise the
//!   edge weight instead of adding edges
//! - **Orphans**: nodes with no edge in either direction. Orphans and linked
//!   nodes always partition the node set
//! - **Broken links**: references whose resolved target does not exist;
//!   they never create nodes
//!
//! ## Modules
//!
//! - [`graph`] - The `ReferenceGraph` accumulator
//! - [`builder`] - Corpus scanning into a graph
//! - [`analytics`] - Degrees, hubs and summary counters

pub mod analytics;
pub mod builder;
pub mod graph;

pub use analytics::{DEFAULT_HUB_LIMIT, GraphAnalytics, GraphSummary, Hub};
pub use builder::{GraphBuilder, build_graph};
pub use graph::{BrokenLink, ReferenceGraph};

pub mod prelude {
    pub use crate::analytics::{GraphAnalytics, GraphSummary};
    pub use crate::builder::{GraphBuilder, build_graph};
    pub use crate::graph::{BrokenLink, ReferenceGraph};
    pub use linkgraph_core::prelude::*;
}
