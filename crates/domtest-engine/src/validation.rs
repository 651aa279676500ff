//! Expectation validation.

use domtest_browser::{BrowserError, BrowserPage, Locator};
use domtest_config::{UnclassifiedPolicy, ValidationConfig};
use tracing::{debug, error, warn};

use crate::error::EngineError;

/// What kind of check an expectation text asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectationKind {
    /// Mentions "error message".
    ErrorMessage,
    /// Mentions "success".
    Success,
    /// Recognized by the operator matcher at this index.
    Custom(usize),
    Unclassified,
}

/// Checks free-text expectations against the top-level document.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, expectation: &str) -> ExpectationKind {
        let text = expectation.to_lowercase();

        if text.contains("error message") {
            return ExpectationKind::ErrorMessage;
        }
        if text.contains("success") {
            return ExpectationKind::Success;
        }

        self.config
            .matchers
            .iter()
            .position(|m| !m.keyword.is_empty() && text.contains(&m.keyword.to_lowercase()))
            .map(ExpectationKind::Custom)
            .unwrap_or(ExpectationKind::Unclassified)
    }

    /// Check expectations in order, stopping at the first one not met.
    pub async fn validate(
        &self,
        page: &dyn BrowserPage,
        expectations: &[String],
    ) -> Result<(), EngineError> {
        page.switch_to_default_content();

        for expectation in expectations {
            if let Err(e) = self.check(page, expectation).await {
                error!("Validation failed for expectation: {}. Error: {}", expectation, e);
                return Err(e);
            }
        }
        Ok(())
    }

    async fn check(&self, page: &dyn BrowserPage, expectation: &str) -> Result<(), EngineError> {
        let kind = self.classify(expectation);
        debug!(?kind, "Checking expectation: {}", expectation);

        let (selectors, reason) = match kind {
            ExpectationKind::ErrorMessage => (
                &self.config.error_selectors,
                "Expected error message not found",
            ),
            ExpectationKind::Success => (
                &self.config.success_selectors,
                "Expected success indicator not found",
            ),
            ExpectationKind::Custom(index) => (
                &self.config.matchers[index].selectors,
                "None of the matcher selectors is visible",
            ),
            ExpectationKind::Unclassified => {
                return match self.config.unclassified {
                    UnclassifiedPolicy::Fail => {
                        Err(EngineError::UnclassifiedExpectation(expectation.to_string()))
                    }
                    UnclassifiedPolicy::Pass => {
                        warn!("No matcher recognizes expectation, skipping: {}", expectation);
                        Ok(())
                    }
                };
            }
        };

        match first_visible(page, selectors).await? {
            Some(selector) => {
                debug!("Expectation met by {}", selector);
                Ok(())
            }
            None => Err(EngineError::ValidationFailed {
                expectation: expectation.to_string(),
                reason: reason.to_string(),
            }),
        }
    }
}

/// Probe each selector once, in order; the first match that is visible wins.
async fn first_visible<'s>(
    page: &dyn BrowserPage,
    selectors: &'s [String],
) -> Result<Option<&'s str>, EngineError> {
    for selector in selectors {
        let Some(element) = page.find_element(&Locator::Css(selector.clone())).await? else {
            continue;
        };

        match page.is_displayed(&element).await {
            Ok(true) => return Ok(Some(selector)),
            Ok(false) => {}
            // Removed between lookup and visibility check.
            Err(BrowserError::Detached(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
