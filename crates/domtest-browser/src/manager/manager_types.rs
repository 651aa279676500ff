//! Errors and settings shared by the manager and the page driver.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cdp::CdpError;

/// Browser-level errors as seen by page automation callers.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// The element was removed from the document after it was resolved.
    #[error("Element is no longer attached to the page: {0}")]
    Detached(String),

    #[error("Frame {0} is not accessible")]
    FrameUnavailable(usize),

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Screenshot failed: {0}")]
    ScreenshotFailed(String),

    #[error("Browser not connected")]
    NotConnected,

    #[error("Chrome not found. Please install Google Chrome.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),
}

impl BrowserError {
    /// Whether the browser session itself is gone, as opposed to a page-level fault.
    pub fn is_session_lost(&self) -> bool {
        matches!(
            self,
            BrowserError::NotConnected | BrowserError::ConnectionFailed(_)
        )
    }
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        if e.is_stale_object() {
            return BrowserError::Detached(e.to_string());
        }
        match e {
            CdpError::SessionClosed => BrowserError::NotConnected,
            CdpError::ConnectionFailed(msg)
            | CdpError::ChromeNotAvailable(msg)
            | CdpError::WebSocket(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::NavigationFailed(msg) => BrowserError::NavigationFailed(msg),
            CdpError::JavaScript(msg) => BrowserError::Script(msg),
            CdpError::Timeout(msg) => BrowserError::ActionFailed(format!("Timeout: {}", msg)),
            other => BrowserError::ActionFailed(other.to_string()),
        }
    }
}

/// How to reach (or start) Chrome.
#[derive(Debug, Clone)]
pub struct BrowserManagerConfig {
    pub debug_port: u16,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// `None` means `~/.domtest/browser-profile`.
    pub profile_dir: Option<PathBuf>,
    pub headless: bool,
    /// Upper bound for one CDP round trip.
    pub command_timeout: Duration,
    /// Time a freshly launched Chrome gets to open its debug port.
    pub launch_timeout: Duration,
}

impl Default for BrowserManagerConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            viewport_width: 1280,
            viewport_height: 720,
            profile_dir: None,
            headless: false,
            command_timeout: Duration::from_secs(30),
            launch_timeout: Duration::from_secs(6),
        }
    }
}

impl BrowserManagerConfig {
    pub fn resolved_profile_dir(&self) -> PathBuf {
        match &self.profile_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".domtest/browser-profile"),
        }
    }

    /// DevTools HTTP endpoint on the loopback interface.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}
