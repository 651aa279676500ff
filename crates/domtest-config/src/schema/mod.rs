//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

mod schema_timing;
mod schema_validation;

pub use schema_timing::*;
pub use schema_validation::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Parse the configured target URL.
    ///
    /// Every test case in a run is executed against this one page.
    pub fn target_url(&self) -> Result<url::Url, ConfigError> {
        let raw = self
            .target
            .url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField("target.url".to_string()))?;

        url::Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
            field: "target.url".to_string(),
            message: e.to_string(),
        })
    }
}

/// The page under test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Browser launch and connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging port.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default)]
    pub headless: bool,

    /// Profile directory; `~` is expanded by the loader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<String>,

    /// Upper bound for a single CDP command round trip.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    /// How long to wait for a freshly launched Chrome to accept connections.
    #[serde(default = "default_launch_timeout")]
    pub launch_timeout_secs: u64,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: false,
            profile_dir: None,
            command_timeout_secs: default_command_timeout(),
            launch_timeout_secs: default_launch_timeout(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_command_timeout() -> u64 {
    30
}

fn default_launch_timeout() -> u64 {
    6
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Where the JSON run report is written.
    #[serde(default = "default_report_output")]
    pub output: PathBuf,

    /// Capture a PNG of the page when a case fails.
    #[serde(default)]
    pub screenshot_on_failure: bool,

    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_report_output(),
            screenshot_on_failure: false,
            screenshot_dir: default_screenshot_dir(),
        }
    }
}

fn default_report_output() -> PathBuf {
    PathBuf::from("domtest-report.json")
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from("domtest-screenshots")
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
