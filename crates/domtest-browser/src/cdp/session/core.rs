//! [`PageSession`] itself and the Page/Emulation commands.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::ScreenshotFormat;
use crate::cdp::transport::Transport;

/// Flattened session attached to one tab.
///
/// Shares the browser connection's transport; commands differ only in the
/// session id stamped on them.
pub struct PageSession {
    target_id: String,
    session_id: String,
    transport: Arc<Transport>,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, transport: Arc<Transport>) -> Self {
        Self {
            target_id,
            session_id,
            transport,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .send(method, params, Some(&self.session_id))
            .await
    }

    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        for domain in ["Page", "DOM", "Runtime"] {
            self.call(&format!("{}.enable", domain), None).await?;
        }
        debug!(session = %self.session_id, "Page, DOM and Runtime enabled");
        Ok(())
    }

    /// Pin the viewport so element geometry does not depend on the window.
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<(), CdpError> {
        let metrics = json!({
            "width": width,
            "height": height,
            "deviceScaleFactor": 1,
            "mobile": false,
        });
        self.call("Emulation.setDeviceMetricsOverride", Some(metrics))
            .await
            .map(drop)
    }

    /// Viewport capture as base64.
    pub async fn screenshot(&self, format: ScreenshotFormat) -> Result<String, CdpError> {
        let reply = self
            .call("Page.captureScreenshot", Some(json!({ "format": format })))
            .await?;
        match reply["data"].as_str() {
            Some(data) => Ok(data.to_string()),
            None => Err(CdpError::InvalidResponse("captureScreenshot without data".to_string())),
        }
    }
}
