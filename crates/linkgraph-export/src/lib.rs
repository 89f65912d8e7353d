//! # Export System
//!
//! Renders a finished [`ReferenceGraph`] in one of four formats. Every
//! exporter is a pure function of the graph: no I/O, no clocks, so two scans
//! of an unchanged corpus render byte-identical output.
//!
//! ## Quick Start
//!
//! ```no_run
//! use linkgraph_core::ScanConfig;
//! use linkgraph_export::{ExportFormat, export};
//! use linkgraph_graph::build_graph;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = build_graph(ScanConfig::builder(".").build()?)?;
//! let format: ExportFormat = "mermaid".parse()?;
//! println!("{}", export(&graph, format)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Export Formats
//!
//! ### Diagram (`diagram`, `mermaid`)
//! - Mermaid `graph LR` flowchart
//! - One `N{i}["base name"]` declaration per node, in identity order
//! - One `Na --> Nb` line per distinct edge
//!
//! ### Tabular (`tabular`, `csv`)
//! - `source,target` header
//! - One quoted row per distinct edge, first-occurrence order
//!
//! ### Structured (`structured`, `json`)
//! - Pretty-printed JSON object: `nodes`, `edges`, `orphans`,
//!   `broken_links`, `stats`
//!
//! ### Report (`report`, `summary`)
//! - Totals header, top-10 inbound and outbound hub tables, orphan and
//!   broken link listings. Empty sections are left out.

use linkgraph_core::prelude::*;
use linkgraph_core::{CSVBuilder, to_json_string};
use linkgraph_graph::{
    BrokenLink, DEFAULT_HUB_LIMIT, GraphAnalytics, GraphSummary, Hub, ReferenceGraph,
};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Export format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Human-readable text report
    #[default]
    Report,
    /// Mermaid flowchart
    Diagram,
    /// CSV edge list
    Tabular,
    /// JSON document
    Structured,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Report,
        ExportFormat::Diagram,
        ExportFormat::Tabular,
        ExportFormat::Structured,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Report => "report",
            ExportFormat::Diagram => "diagram",
            ExportFormat::Tabular => "tabular",
            ExportFormat::Structured => "structured",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "report" | "summary" => Ok(ExportFormat::Report),
            "diagram" | "mermaid" => Ok(ExportFormat::Diagram),
            "tabular" | "csv" => Ok(ExportFormat::Tabular),
            "structured" | "json" => Ok(ExportFormat::Structured),
            other => Err(Error::config_error(format!(
                "Unknown format '{}' (expected report, diagram, tabular or structured)",
                other
            ))),
        }
    }
}

/// Render `graph` in `format`
pub fn export(graph: &ReferenceGraph, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Report => Ok(ReportExporter::to_text(graph)),
        ExportFormat::Diagram => Ok(DiagramExporter::to_mermaid(graph)),
        ExportFormat::Tabular => Ok(TabularExporter::to_csv(graph)),
        ExportFormat::Structured => StructuredExporter::to_json(graph),
    }
}

/// Mermaid diagram exporter
pub struct DiagramExporter;

impl DiagramExporter {
    /// Quotes would end the label early
    fn label(id: &DocumentId) -> String {
        id.base_name().replace('"', "#quot;")
    }

    pub fn to_mermaid(graph: &ReferenceGraph) -> String {
        let mut lines = vec!["graph LR".to_string()];

        let mut node_ids: HashMap<&DocumentId, String> = HashMap::new();
        for (i, node) in graph.nodes().into_iter().enumerate() {
            let node_id = format!("N{}", i);
            lines.push(format!("    {}[\"{}\"]", node_id, Self::label(node)));
            node_ids.insert(node, node_id);
        }

        lines.push(String::new());

        for (source, target) in graph.unique_edges() {
            if let (Some(from), Some(to)) = (node_ids.get(source), node_ids.get(target)) {
                lines.push(format!("    {} --> {}", from, to));
            }
        }

        lines.join("\n")
    }
}

/// CSV edge list exporter
pub struct TabularExporter;

impl TabularExporter {
    pub fn to_csv(graph: &ReferenceGraph) -> String {
        graph
            .unique_edges()
            .into_iter()
            .fold(CSVBuilder::new(vec!["source", "target"]), |csv, (source, target)| {
                csv.add_quoted_row(&[source.as_str(), target.as_str()])
            })
            .build()
    }
}

#[derive(Debug, Serialize)]
struct EdgeRecord<'a> {
    source: &'a DocumentId,
    target: &'a DocumentId,
}

/// Shape of the structured export
#[derive(Debug, Serialize)]
pub struct GraphDocument<'a> {
    pub nodes: Vec<&'a DocumentId>,
    edges: Vec<EdgeRecord<'a>>,
    pub orphans: Vec<&'a DocumentId>,
    pub broken_links: &'a [BrokenLink],
    pub stats: GraphSummary,
}

impl<'a> GraphDocument<'a> {
    pub fn new(graph: &'a ReferenceGraph) -> Self {
        Self {
            nodes: graph.nodes(),
            edges: graph
                .unique_edges()
                .into_iter()
                .map(|(source, target)| EdgeRecord { source, target })
                .collect(),
            orphans: graph.orphans(),
            broken_links: graph.broken_links(),
            stats: GraphAnalytics::new(graph).summary(),
        }
    }
}

/// JSON exporter
pub struct StructuredExporter;

impl StructuredExporter {
    pub fn to_json(graph: &ReferenceGraph) -> Result<String> {
        to_json_string(&GraphDocument::new(graph), "reference graph")
    }
}

/// Text report exporter
pub struct ReportExporter;

impl ReportExporter {
    const RULE_WIDTH: usize = 60;

    fn hub_section(lines: &mut Vec<String>, title: &str, arrow: char, hubs: &[Hub<'_>]) {
        if hubs.is_empty() {
            return;
        }
        lines.push(format!("--- {} (Top {}) ---", title, DEFAULT_HUB_LIMIT));
        for hub in hubs {
            lines.push(format!("  {:3} {} {}", hub.degree, arrow, hub.id));
        }
        lines.push(String::new());
    }

    pub fn to_text(graph: &ReferenceGraph) -> String {
        let analytics = GraphAnalytics::new(graph);
        let summary = analytics.summary();
        let rule = "=".repeat(Self::RULE_WIDTH);

        let mut lines = vec![
            rule.clone(),
            "Document Reference Graph Report".to_string(),
            rule.clone(),
            format!("Total files scanned: {}", summary.total_files),
            format!("Total cross-references: {}", summary.total_links),
            format!("Orphan files (no links): {}", summary.orphan_files),
            format!("Broken links: {}", summary.broken_links),
            String::new(),
        ];

        Self::hub_section(
            &mut lines,
            "Most Referenced Files",
            '←',
            &analytics.top_inbound(DEFAULT_HUB_LIMIT),
        );
        Self::hub_section(
            &mut lines,
            "Files With Most Outbound Links",
            '→',
            &analytics.top_outbound(DEFAULT_HUB_LIMIT),
        );

        let orphans = graph.orphans();
        if !orphans.is_empty() {
            lines.push("--- Orphan Files (No References) ---".to_string());
            lines.extend(orphans.iter().map(|orphan| format!("  • {}", orphan)));
            lines.push(String::new());
        }

        if !graph.broken_links().is_empty() {
            lines.push("--- Broken Links ---".to_string());
            lines.extend(
                graph
                    .broken_links()
                    .iter()
                    .map(|b| format!("  {} → {} (NOT FOUND)", b.source, b.target)),
            );
            lines.push(String::new());
        }

        lines.push(rule);
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> DocumentId {
        DocumentId::new(s)
    }

    fn sample() -> ReferenceGraph {
        let mut graph = ReferenceGraph::new();
        graph.add_reference_edge(id("README.md"), id("docs/guide.md"));
        graph.add_reference_edge(id("README.md"), id("docs/guide.md"));
        graph.add_reference_edge(id("docs/guide.md"), id("README.md"));
        graph.add_document(id("docs/orphan.md"));
        graph.add_broken(BrokenLink {
            source: id("docs/guide.md"),
            target: "./missing.md".to_string(),
            line: 3,
        });
        graph
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("mermaid".parse::<ExportFormat>().unwrap(), ExportFormat::Diagram);
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Tabular);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Structured);
        assert_eq!("summary".parse::<ExportFormat>().unwrap(), ExportFormat::Report);
        assert!("yaml".parse::<ExportFormat>().is_err());

        for format in ExportFormat::ALL {
            assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_mermaid_export() {
        insta::assert_snapshot!(DiagramExporter::to_mermaid(&sample()), @r#"
        graph LR
            N0["README.md"]
            N1["guide.md"]
            N2["orphan.md"]

            N0 --> N1
            N1 --> N0
        "#);
    }

    #[test]
    fn test_mermaid_label_escaping() {
        let mut graph = ReferenceGraph::new();
        graph.add_document(id("say \"hi\".md"));
        let mermaid = DiagramExporter::to_mermaid(&graph);
        assert!(mermaid.contains("N0[\"say #quot;hi#quot;.md\"]"));
    }

    #[test]
    fn test_csv_export() {
        insta::assert_snapshot!(TabularExporter::to_csv(&sample()), @r#"
        source,target
        "README.md","docs/guide.md"
        "docs/guide.md","README.md"
        "#);
    }

    #[test]
    fn test_csv_quotes_embedded_quotes() {
        let mut graph = ReferenceGraph::new();
        graph.add_reference_edge(id("a\"b.md"), id("c.md"));
        assert_eq!(
            TabularExporter::to_csv(&graph),
            "source,target\n\"a\"\"b.md\",\"c.md\""
        );
    }

    #[test]
    fn test_json_export() {
        insta::assert_snapshot!(StructuredExporter::to_json(&sample()).unwrap(), @r#"
        {
          "nodes": [
            "README.md",
            "docs/guide.md",
            "docs/orphan.md"
          ],
          "edges": [
            {
              "source": "README.md",
              "target": "docs/guide.md"
            },
            {
              "source": "docs/guide.md",
              "target": "README.md"
            }
          ],
          "orphans": [
            "docs/orphan.md"
          ],
          "broken_links": [
            {
              "source": "docs/guide.md",
              "target": "./missing.md",
              "line": 3
            }
          ],
          "stats": {
            "total_files": 3,
            "total_links": 2,
            "orphan_files": 1,
            "broken_links": 1
          }
        }
        "#);
    }

    #[test]
    fn test_json_is_valid_and_stable() {
        let graph = sample();
        let first = StructuredExporter::to_json(&graph).unwrap();
        assert_eq!(first, StructuredExporter::to_json(&graph).unwrap());

        let value: serde_json::Value = serde_json::from_str(&first).unwrap();
        assert_eq!(value["stats"]["total_links"], 2);
    }

    #[test]
    fn test_text_report() {
        insta::assert_snapshot!(ReportExporter::to_text(&sample()), @r"
        ============================================================
        Document Reference Graph Report
        ============================================================
        Total files scanned: 3
        Total cross-references: 2
        Orphan files (no links): 1
        Broken links: 1

        --- Most Referenced Files (Top 10) ---
            1 ← README.md
            1 ← docs/guide.md

        --- Files With Most Outbound Links (Top 10) ---
            1 → README.md
            1 → docs/guide.md

        --- Orphan Files (No References) ---
          • docs/orphan.md

        --- Broken Links ---
          docs/guide.md → ./missing.md (NOT FOUND)

        ============================================================
        ");
    }

    #[test]
    fn test_empty_report_omits_sections() {
        let report = ReportExporter::to_text(&ReferenceGraph::new());
        assert!(report.contains("Total files scanned: 0"));
        assert!(!report.contains("---"));
    }
}
