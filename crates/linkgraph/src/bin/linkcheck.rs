//! Link integrity checker

use clap::Parser;
use linkgraph::{EXIT_ISSUES, ScanArgs, fail, init_logging, print_output, run_verify};
use linkgraph_verify::ReportFormat;
use std::process::ExitCode;

/// Verify that every cross-document reference in a corpus resolves.
///
/// Exits 0 when no issues are found, 1 when there are issues, 2 when the
/// corpus cannot be scanned.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    scan: ScanArgs,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: ReportFormat,
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let report = run_verify(&cli.scan)?;
    print_output(&report.render(cli.format)?)?;
    Ok(report.passed())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.scan.log_level());

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_ISSUES),
        Err(e) => fail(&e),
    }
}
