//! `run` command: execute test cases and write the report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use domtest_browser::{BrowserManager, BrowserManagerConfig};
use domtest_config::{BrowserConfig, Config, ConfigLoader, ConfigValidator};
use domtest_engine::{load_test_cases, EngineConfig, TestExecutor};

use crate::cli::RunArgs;

/// Returns whether every case passed.
pub(crate) async fn run(config_path: &Path, args: RunArgs) -> Result<bool, Box<dyn std::error::Error>> {
    info!("Starting DomTest v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ConfigLoader::load_or_default(config_path)?;
    apply_overrides(&mut config, &args);

    let validation = ConfigValidator::validate(&config)?;
    for warning in &validation.warnings {
        warn!("Config {}", warning);
    }
    if !validation.is_valid() {
        for e in &validation.errors {
            error!("Config {}", e);
        }
        return Err(format!("invalid configuration ({} errors)", validation.errors.len()).into());
    }

    let cases = load_test_cases(&args.cases)?;
    info!("Loaded {} test cases from {}", cases.len(), args.cases.display());

    let engine_config = EngineConfig::from_config(&config)?;
    let manager = BrowserManager::new(browser_manager_config(&config.browser));

    let (mut engine, page) = match TestExecutor::launch(&manager, engine_config).await {
        Ok(launched) => launched,
        Err(e) => {
            shutdown_after_failure(&manager).await;
            return Err(e.into());
        }
    };

    let outcome = engine
        .run(&cases)
        .await
        .map(|store| store.report(Utc::now()));

    if let Err(e) = manager.close_page(&page).await {
        warn!("Failed to close test page: {}", e);
    }
    manager.shutdown().await?;

    let report = outcome?;
    report.write_to(&config.report.output)?;

    info!(
        "Total: {}, Passed: {}, Failed: {}, Execution time: {:.2}s",
        report.summary.total, report.summary.passed, report.summary.failed, report.duration_secs
    );
    Ok(report.summary.all_passed())
}

/// Best-effort shutdown while another error is already being reported.
async fn shutdown_after_failure(manager: &BrowserManager) {
    if let Err(e) = manager.shutdown().await {
        warn!("Failed to shut down browser: {}", e);
    }
}

fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(url) = &args.url {
        config.target.url = Some(url.clone());
    }
    if let Some(output) = &args.output {
        config.report.output = output.clone();
    }
    if args.headless {
        config.browser.headless = true;
    }
}

fn browser_manager_config(browser: &BrowserConfig) -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: browser.debug_port,
        viewport_width: browser.viewport_width,
        viewport_height: browser.viewport_height,
        profile_dir: browser.profile_dir.as_deref().map(PathBuf::from),
        headless: browser.headless,
        command_timeout: Duration::from_secs(browser.command_timeout_secs),
        launch_timeout: Duration::from_secs(browser.launch_timeout_secs),
    }
}
