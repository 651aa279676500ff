//! Engine error types.

use std::time::Duration;

use domtest_browser::BrowserError;
use domtest_config::ConfigError;
use thiserror::Error;

/// Faults local to one test case. Each one ends the case as `Failed`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid selector type: {0}")]
    InvalidSelector(String),

    #[error("Element not found within {waited:?}: {selector_type}={value}")]
    ElementNotFound {
        selector_type: String,
        value: String,
        waited: Duration,
    },

    /// The resolved element offers no action a step can perform.
    #[error("Unsupported action: <{tag}> cannot be filled, clicked or selected")]
    UnsupportedAction { tag: String },

    #[error("Validation failed for expectation '{expectation}': {reason}")]
    ValidationFailed { expectation: String, reason: String },

    #[error("No matcher recognizes expectation '{0}'")]
    UnclassifiedExpectation(String),

    /// A password field was hit but no secret is configured.
    #[error("Password field requires a secret, but ${0} is not set")]
    MissingSecret(String),

    #[error(transparent)]
    Browser(#[from] BrowserError),
}

/// Faults that end the whole run without a result set.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Could not open browser session: {0}")]
    Browser(#[from] BrowserError),

    /// No case has reached the target yet, so nothing in this run can.
    #[error("Target {url} is unreachable: {source}")]
    Unreachable { url: String, source: BrowserError },

    #[error("Browser session lost: {0}")]
    SessionLost(BrowserError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Test case input errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid test case JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate test case id: {0}")]
    DuplicateId(String),
}
