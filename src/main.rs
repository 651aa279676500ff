//! DomTest - DOM-driven functional test runner
//!
//! Main entry point for the DomTest CLI.

mod cli;
mod cmd_check;
mod cmd_run;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};

/// Get the DomTest home directory (~/.domtest).
fn domtest_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".domtest"))
        .unwrap_or_else(|| PathBuf::from(".domtest"))
}

/// Daily-rolling file writer under `log_dir`. Buffered lines reach the file
/// when the returned guard drops.
fn log_writer(log_dir: &Path) -> Result<(NonBlocking, WorkerGuard), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("domtest")
        .filename_suffix("log")
        .max_log_files(30)
        .build(log_dir)?;

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.domtest/logs/ with daily rotation. Keep the
/// returned guard alive until the process is about to exit.
fn init_tracing() -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let (non_blocking, guard) = log_writer(&domtest_dir().join("logs"))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let _log_guard = init_tracing()?;

    let cli = Cli::parse();

    let ok = match cli.command {
        Commands::Run(args) => cmd_run::run(&cli.config, args).await?,
        Commands::CheckConfig => cmd_check::check_config(&cli.config)?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
