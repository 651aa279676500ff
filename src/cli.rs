//! CLI definitions for DomTest.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// DomTest CLI.
#[derive(Parser)]
#[command(name = "domtest")]
#[command(about = "Run structured UI test cases against a live web page")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "domtest.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Execute test cases and write a JSON report
    Run(RunArgs),

    /// Validate the configuration file and print problems
    CheckConfig,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RunArgs {
    /// Test case file (JSON array, optionally in a Markdown code fence)
    #[arg(long)]
    pub cases: PathBuf,

    /// Target page URL (overrides target.url)
    #[arg(long)]
    pub url: Option<String>,

    /// Report output path (overrides report.output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Run Chrome without a window
    #[arg(long)]
    pub headless: bool,
}
