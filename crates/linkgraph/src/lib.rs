//! # Linkgraph CLI
//!
//! Shared plumbing for the two binaries:
//!
//! - `linkgraph`: scans a corpus and prints the reference graph as a
//!   report, Mermaid diagram, CSV or JSON
//! - `linkcheck`: verifies every reference and exits non-zero on issues
//!
//! Both take the same scan flags ([`ScanArgs`]) and log to stderr, leaving
//! stdout to the rendered output.

use anyhow::Context;
use clap::{ArgAction, Args};
use linkgraph_core::ScanConfig;
use linkgraph_export::{ExportFormat, export};
use linkgraph_graph::build_graph;
use linkgraph_verify::{VerificationReport, verify};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Exit status for a failed run (bad root, bad flags, output failure)
pub const EXIT_FATAL: u8 = 2;

/// Exit status when verification found issues
pub const EXIT_ISSUES: u8 = 1;

/// Corpus selection and resolution flags shared by both tools
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Corpus root directory
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Report references that cannot be resolved instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Only follow `./` and `../` references
    #[arg(long)]
    pub relative_only: bool,

    /// Document extension to scan (repeatable; default: md, markdown)
    #[arg(long = "ext", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Extra directory or file name to skip (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Descend into hidden directories
    #[arg(long)]
    pub include_hidden: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Less log output on stderr (-q errors only, -qq silent)
    #[arg(short, long, action = ArgAction::Count, global = true, conflicts_with = "verbose")]
    pub quiet: u8,
}

impl ScanArgs {
    /// Build and validate the scan configuration
    pub fn to_config(&self) -> linkgraph_core::Result<ScanConfig> {
        let mut builder = ScanConfig::builder(&self.root)
            .strict(self.strict)
            .relative_only(self.relative_only)
            .include_hidden(self.include_hidden);

        if !self.extensions.is_empty() {
            builder = builder.extensions(&self.extensions);
        }
        for name in &self.exclude {
            builder = builder.exclude(name.clone());
        }

        builder.build()
    }

    /// Log level chosen by `-v`/`-q`, warn by default
    pub fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (0, 0) => LevelFilter::WARN,
            (0, 1) => LevelFilter::INFO,
            (0, 2) => LevelFilter::DEBUG,
            (0, _) => LevelFilter::TRACE,
            (1, _) => LevelFilter::ERROR,
            _ => LevelFilter::OFF,
        }
    }
}

/// Install the stderr subscriber. Library `log` records are bridged in.
pub fn init_logging(level: LevelFilter) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .parse_lossy(""),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();

    if let Err(e) = result {
        eprintln!("warning: logging unavailable: {}", e);
    }
}

/// Scan the corpus and render its graph
pub fn run_report(args: &ScanArgs, format: ExportFormat) -> anyhow::Result<String> {
    let config = args.to_config()?;
    log::info!("Scanning {} ({} output)", config.root.display(), format);

    let graph = build_graph(config)
        .with_context(|| format!("cannot scan {}", args.root.display()))?;
    let rendered = export(&graph, format).context("cannot render graph")?;
    Ok(rendered)
}

/// Scan the corpus and verify every reference
pub fn run_verify(args: &ScanArgs) -> anyhow::Result<VerificationReport> {
    let config = args.to_config()?;
    log::info!("Verifying {}", config.root.display());

    verify(config).with_context(|| format!("cannot scan {}", args.root.display()))
}

/// Write `output` and a trailing newline to stdout
pub fn print_output(output: &str) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output).context("cannot write to stdout")?;
    stdout.flush().context("cannot write to stdout")
}

/// Print a fatal error to stderr and return the fatal exit status
pub fn fail(error: &anyhow::Error) -> ExitCode {
    eprintln!("error: {:#}", error);
    ExitCode::from(EXIT_FATAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        scan: ScanArgs,
    }

    fn parse(args: &[&str]) -> ScanArgs {
        TestCli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .scan
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.root, PathBuf::from("."));
        assert!(!args.strict);
        assert!(args.extensions.is_empty());
        assert_eq!(args.log_level(), LevelFilter::WARN);
    }

    #[test]
    fn test_flags() {
        let args = parse(&[
            "docs", "--strict", "--ext", "md,txt", "--ext", "rst", "--exclude", "drafts", "-vv",
        ]);
        assert_eq!(args.root, PathBuf::from("docs"));
        assert!(args.strict);
        assert_eq!(args.extensions, vec!["md", "txt", "rst"]);
        assert_eq!(args.exclude, vec!["drafts"]);
        assert_eq!(args.log_level(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_quiet_levels() {
        assert_eq!(parse(&["-q"]).log_level(), LevelFilter::ERROR);
        assert_eq!(parse(&["-qq"]).log_level(), LevelFilter::OFF);
    }

    #[test]
    fn test_to_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let root = temp.path().to_str().unwrap();
        let config = parse(&[root, "--strict", "--ext", ".TXT", "--exclude", "drafts"])
            .to_config()
            .unwrap();

        assert_eq!(config.policy, linkgraph_core::ResolutionPolicy::Strict);
        assert!(config.extensions.contains("txt"));
        assert!(config.excluded_segments.contains("drafts"));
    }

    #[test]
    fn test_bad_root_is_fatal() {
        let err = parse(&["/definitely/not/here"]).to_config().unwrap_err();
        assert!(err.is_fatal());
    }
}
