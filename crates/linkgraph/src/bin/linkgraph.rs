//! Reference graph reporter

use clap::Parser;
use linkgraph::{ScanArgs, fail, init_logging, print_output, run_report};
use linkgraph_export::ExportFormat;
use std::process::ExitCode;

/// Scan a document corpus and print its cross-reference graph
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    scan: ScanArgs,

    /// Output format: report, diagram, tabular, structured
    /// (aliases: summary, mermaid, csv, json)
    #[arg(short, long, default_value = "report")]
    format: ExportFormat,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.scan.log_level());

    match run_report(&cli.scan, cli.format).and_then(|output| print_output(&output)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}
