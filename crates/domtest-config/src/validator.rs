//! Semantic checks that TOML deserialization cannot express.

use std::fmt;

use crate::error::ConfigError;
use crate::schema::Config;

/// Everything wrong with a configuration, split by severity.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

/// One problem, addressed by its dotted TOML path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(Finding {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Finding {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Expectation keywords handled before operator matchers are consulted.
const BUILTIN_KEYWORDS: [&str; 2] = ["error message", "success"];

pub struct ConfigValidator;

impl ConfigValidator {
    /// Collect every finding instead of stopping at the first.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();
        Self::check_target(config, &mut result);
        Self::check_browser(config, &mut result);
        Self::check_timing(config, &mut result);
        Self::check_credentials(config, &mut result);
        Self::check_indicators(config, &mut result);
        Ok(result)
    }

    fn check_target(config: &Config, result: &mut ValidationResult) {
        match config.target_url() {
            Ok(url) if matches!(url.scheme(), "http" | "https" | "file") => {}
            Ok(url) => result.error(
                "target.url",
                format!("Unsupported URL scheme '{}'", url.scheme()),
            ),
            Err(ConfigError::MissingField(_)) => result.error(
                "target.url",
                "Target URL is required (set [target] url or pass --url)",
            ),
            Err(e) => result.error("target.url", e.to_string()),
        }
    }

    fn check_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.error("browser.debug_port", "Port cannot be 0");
        }
        if config.browser.command_timeout_secs == 0 {
            result.error(
                "browser.command_timeout_secs",
                "command_timeout_secs must be greater than 0",
            );
        }
    }

    fn check_timing(config: &Config, result: &mut ValidationResult) {
        let timing = &config.timing;
        if timing.element_wait_ms == 0 {
            result.warn(
                "timing.element_wait_ms",
                "element_wait_ms is 0, elements are probed exactly once",
            );
        }

        if timing.poll_interval_ms == 0 {
            result.error("timing.poll_interval_ms", "poll_interval_ms must be greater than 0");
        } else if timing.poll_interval_ms > timing.element_wait_ms {
            result.warn(
                "timing.poll_interval_ms",
                "poll_interval_ms exceeds element_wait_ms, elements get at most two probes",
            );
        }
    }

    fn check_credentials(config: &Config, result: &mut ValidationResult) {
        let var = &config.credentials.password_env;
        if var.trim().is_empty() {
            result.error("credentials.password_env", "password_env cannot be empty");
        } else if std::env::var_os(var).is_none() {
            result.warn(
                "credentials.password_env",
                format!("{} is not set, steps targeting password fields will fail", var),
            );
        }
    }

    fn check_indicators(config: &Config, result: &mut ValidationResult) {
        let validation = &config.validation;
        if validation.error_selectors.is_empty() {
            result.error(
                "validation.error_selectors",
                "At least one error indicator selector is required",
            );
        }
        if validation.success_selectors.is_empty() {
            result.error(
                "validation.success_selectors",
                "At least one success indicator selector is required",
            );
        }

        for (i, matcher) in validation.matchers.iter().enumerate() {
            let keyword_path = format!("validation.matchers[{}].keyword", i);
            let keyword = matcher.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                result.error(keyword_path, "Matcher keyword cannot be empty");
            } else if BUILTIN_KEYWORDS.iter().any(|b| keyword.contains(b)) {
                result.warn(
                    keyword_path,
                    format!(
                        "Keyword '{}' overlaps a built-in expectation kind and will never be reached",
                        matcher.keyword
                    ),
                );
            }

            if matcher.selectors.is_empty() {
                result.error(
                    format!("validation.matchers[{}].selectors", i),
                    "Matcher needs at least one selector",
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
