//! Selector resolution with a bounded wait.

use std::time::Duration;

use domtest_browser::{BrowserPage, ElementHandle, Locator};
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::error::EngineError;
use crate::frame::FrameScope;
use crate::selector::SelectorType;

/// A live element plus where it was found. Valid for the current step only.
#[derive(Debug, Clone)]
pub struct ResolvedElement {
    handle: ElementHandle,
    locator: Locator,
    in_iframe: bool,
}

impl ResolvedElement {
    pub fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    pub fn tag_name(&self) -> &str {
        &self.handle.tag_name
    }

    pub fn input_type(&self) -> Option<&str> {
        self.handle.input_type.as_deref()
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn in_iframe(&self) -> bool {
        self.in_iframe
    }
}

/// Resolves step selectors, preferring a match inside the first iframe.
#[derive(Debug, Clone)]
pub struct SelectorResolver {
    wait: Duration,
    poll_interval: Duration,
}

impl SelectorResolver {
    pub fn new(wait: Duration, poll_interval: Duration) -> Self {
        Self {
            wait,
            poll_interval,
        }
    }

    /// Resolve `(selector_type, value)` to exactly one element.
    ///
    /// Probes at least once, then every poll interval until the wait
    /// expires. The page is back at the top-level document on return.
    pub async fn resolve(
        &self,
        page: &dyn BrowserPage,
        selector_type: &str,
        value: &str,
    ) -> Result<ResolvedElement, EngineError> {
        let kind: SelectorType = selector_type.parse()?;
        let locator = kind.to_locator(value);
        let deadline = Instant::now() + self.wait;
        let mut probes = 0usize;

        loop {
            probes += 1;
            if let Some(found) = self.probe(page, &locator).await? {
                debug!(
                    selector = %locator,
                    in_iframe = found.in_iframe,
                    probes,
                    "Resolved <{}>",
                    found.tag_name()
                );
                return Ok(found);
            }

            let now = Instant::now();
            if now >= deadline {
                break;
            }
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }

        error!(selector = %locator, probes, "Element not found within {:?}", self.wait);
        match page.page_source().await {
            Ok(source) => {
                error!("Page source captured ({} bytes)", source.len());
                debug!("Page source: {}", source);
            }
            Err(e) => warn!("Could not capture page source: {}", e),
        }

        Err(EngineError::ElementNotFound {
            selector_type: kind.to_string(),
            value: value.to_string(),
            waited: self.wait,
        })
    }

    /// One lookup pass: first iframe, then the top-level document.
    async fn probe(
        &self,
        page: &dyn BrowserPage,
        locator: &Locator,
    ) -> Result<Option<ResolvedElement>, EngineError> {
        let scope = FrameScope::enter_first_iframe(page).await?;
        let in_iframe = scope.in_iframe();

        if let Some(handle) = page.find_element(locator).await? {
            return Ok(Some(ResolvedElement {
                handle,
                locator: locator.clone(),
                in_iframe,
            }));
        }
        drop(scope);

        if in_iframe {
            if let Some(handle) = page.find_element(locator).await? {
                return Ok(Some(ResolvedElement {
                    handle,
                    locator: locator.clone(),
                    in_iframe: false,
                }));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
