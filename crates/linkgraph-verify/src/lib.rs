//! # Linkgraph Verify
//!
//! Pass/fail link integrity checking. Shares extraction and resolution with
//! the graph builder but accumulates an issue list instead of a graph.
//!
//! - Each distinct resolved path hits the filesystem once per run
//! - Targets outside the corpus root are never flagged
//! - Broken links are reported per occurrence
//! - Unreadable documents are their own issue kind
//!
//! ```no_run
//! use linkgraph_core::ScanConfig;
//! use linkgraph_verify::{ReportFormat, verify};
//!
//! let report = verify(ScanConfig::builder("./docs").build()?)?;
//! println!("{}", report.render(ReportFormat::Text)?);
//! std::process::exit(if report.passed() { 0 } else { 1 });
//! # Ok::<(), linkgraph_core::Error>(())
//! ```

pub mod report;
pub mod verifier;

pub use report::{Issue, ReportFormat, VerificationReport};
pub use verifier::{Verifier, verify};
