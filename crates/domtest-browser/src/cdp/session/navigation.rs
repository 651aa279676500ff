use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const LOAD_LIMIT: Duration = Duration::from_secs(30);
const READY_POLL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Load `url` in the main frame and wait for the new document to become
    /// interactive. Network failures come back as `errorText`.
    pub async fn navigate(&self, url: &str) -> Result<(), CdpError> {
        let reply = self.call("Page.navigate", Some(json!({ "url": url }))).await?;
        if let Some(error) = reply["errorText"].as_str().filter(|e| !e.is_empty()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        self.wait_for_load().await?;
        debug!(url, "Page loaded");
        Ok(())
    }

    pub async fn wait_for_load(&self) -> Result<(), CdpError> {
        let deadline = Instant::now() + LOAD_LIMIT;
        loop {
            let state = self.evaluate("document.readyState").await?;
            if matches!(state.as_str(), Some("interactive" | "complete")) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(CdpError::Timeout(format!("{:?} waiting for page load", LOAD_LIMIT)));
            }
            tokio::time::sleep(READY_POLL).await;
        }
    }
}
