//! Engine settings derived from the run configuration.

use std::path::PathBuf;
use std::time::Duration;

use domtest_config::{Config, ConfigError, TimingConfig, ValidationConfig};

use crate::executor::Secret;

/// Everything the engine needs for one run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Page every test case starts from.
    pub target_url: String,
    pub element_wait: Duration,
    pub poll_interval: Duration,
    pub initial_settle: Duration,
    pub step_settle: Duration,
    /// Typed into password fields instead of the step value.
    pub secret: Option<Secret>,
    /// Environment variable the secret is read from, for error messages.
    pub secret_env: String,
    pub validation: ValidationConfig,
    /// Where failure screenshots go; `None` disables them.
    pub screenshot_dir: Option<PathBuf>,
}

impl EngineConfig {
    /// Defaults for everything but the target.
    pub fn new(target_url: impl Into<String>) -> Self {
        let timing = TimingConfig::default();
        Self {
            target_url: target_url.into(),
            element_wait: timing.element_wait(),
            poll_interval: timing.poll_interval(),
            initial_settle: timing.initial_settle(),
            step_settle: timing.step_settle(),
            secret: None,
            secret_env: domtest_config::CredentialsConfig::default().password_env,
            validation: ValidationConfig::default(),
            screenshot_dir: None,
        }
    }

    /// Build from a loaded configuration, reading the secret from the environment.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let target_url = config.target_url()?.to_string();
        let timing = &config.timing;
        let secret_env = config.credentials.password_env.clone();

        Ok(Self {
            target_url,
            element_wait: timing.element_wait(),
            poll_interval: timing.poll_interval(),
            initial_settle: timing.initial_settle(),
            step_settle: timing.step_settle(),
            secret: Secret::from_env(&secret_env),
            secret_env,
            validation: config.validation.clone(),
            screenshot_dir: config
                .report
                .screenshot_on_failure
                .then(|| config.report.screenshot_dir.clone()),
        })
    }

    pub fn with_secret(mut self, secret: Secret) -> Self {
        self.secret = Some(secret);
        self
    }

    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_element_wait(mut self, wait: Duration) -> Self {
        self.element_wait = wait;
        self
    }
}
