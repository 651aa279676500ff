//! Timing and credential configuration types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Waits and settle delays applied while executing test cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Bounded wait for an element to appear.
    #[serde(default = "default_element_wait")]
    pub element_wait_ms: u64,

    /// Re-check interval inside the bounded wait.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Pause after navigating to the target, before the first step.
    #[serde(default = "default_initial_settle")]
    pub initial_settle_ms: u64,

    /// Pause after every step.
    #[serde(default = "default_step_settle")]
    pub step_settle_ms: u64,
}

impl TimingConfig {
    pub fn element_wait(&self) -> Duration {
        Duration::from_millis(self.element_wait_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn initial_settle(&self) -> Duration {
        Duration::from_millis(self.initial_settle_ms)
    }

    pub fn step_settle(&self) -> Duration {
        Duration::from_millis(self.step_settle_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            element_wait_ms: default_element_wait(),
            poll_interval_ms: default_poll_interval(),
            initial_settle_ms: default_initial_settle(),
            step_settle_ms: default_step_settle(),
        }
    }
}

fn default_element_wait() -> u64 {
    10_000
}

fn default_poll_interval() -> u64 {
    250
}

fn default_initial_settle() -> u64 {
    1_000
}

fn default_step_settle() -> u64 {
    500
}

/// Where secrets substituted into sensitive fields come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Environment variable holding the value typed into password fields.
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            password_env: default_password_env(),
        }
    }
}

fn default_password_env() -> String {
    "TEST_PASSWORD".to_string()
}
