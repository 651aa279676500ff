//! Expectation validation configuration types.

use serde::{Deserialize, Serialize};

/// What to do with an expectation no matcher recognizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnclassifiedPolicy {
    /// Fail the test case.
    #[default]
    Fail,
    /// Skip the expectation with a warning.
    Pass,
}

/// Operator-supplied matching logic for free-text expectations.
///
/// An expectation containing `keyword` (case-insensitive) passes when any of
/// `selectors` matches a visible element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    pub keyword: String,
    pub selectors: Vec<String>,
}

/// Validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub unclassified: UnclassifiedPolicy,

    /// Error indicators, probed in priority order.
    #[serde(default = "default_error_selectors")]
    pub error_selectors: Vec<String>,

    /// Success indicators, probed in priority order.
    #[serde(default = "default_success_selectors")]
    pub success_selectors: Vec<String>,

    #[serde(default)]
    pub matchers: Vec<MatcherConfig>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            unclassified: UnclassifiedPolicy::default(),
            error_selectors: default_error_selectors(),
            success_selectors: default_success_selectors(),
            matchers: Vec::new(),
        }
    }
}

pub fn default_error_selectors() -> Vec<String> {
    [
        ".error-message",
        ".alert-danger",
        "[role=\"alert\"]",
        "div.error",
        "p.error",
        "span.error",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn default_success_selectors() -> Vec<String> {
    [
        ".success-message",
        ".alert-success",
        "[role=\"status\"]",
        "div.success",
        "p.success",
        "span.success",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
