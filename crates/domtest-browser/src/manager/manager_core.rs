//! Connection lifecycle of the [`BrowserManager`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::Child;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};

use super::{manager_chrome, BrowserError, BrowserManagerConfig};
use crate::cdp::CdpClient;

const PORT_POLL: Duration = Duration::from_millis(200);

/// Reuses a Chrome already listening on the debug port, or launches one,
/// and holds the single CDP connection every page goes through.
pub struct BrowserManager {
    pub(super) config: BrowserManagerConfig,
    client: RwLock<Option<Arc<CdpClient>>>,
    /// Only set when this manager started Chrome itself.
    launched: Mutex<Option<Child>>,
}

impl BrowserManager {
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            launched: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    /// Path of the Chrome binary that [`connect`](Self::connect) would launch.
    pub fn find_chrome() -> Option<PathBuf> {
        manager_chrome::locate()
    }

    async fn port_open(&self) -> bool {
        let probe = format!("{}/json/version", self.config.endpoint());
        matches!(reqwest::get(&probe).await, Ok(r) if r.status().is_success())
    }

    async fn await_port(&self) -> Result<(), BrowserError> {
        let deadline = Instant::now() + self.config.launch_timeout;
        loop {
            if self.port_open().await {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::LaunchFailed(format!(
                    "debug port {} not open after {:?}",
                    self.config.debug_port, self.config.launch_timeout
                )));
            }
            tokio::time::sleep(PORT_POLL).await;
        }
    }

    /// Idempotent. Launches Chrome when nothing answers on the debug port.
    pub async fn connect(&self) -> Result<(), BrowserError> {
        let mut slot = self.client.write().await;
        if slot.is_some() {
            return Ok(());
        }

        if self.port_open().await {
            debug!(port = self.config.debug_port, "Reusing running Chrome");
        } else {
            let child = manager_chrome::spawn(&self.config)?;
            *self.launched.lock().await = Some(child);
            self.await_port().await?;
        }

        let client = CdpClient::connect(&self.config.endpoint(), self.config.command_timeout).await?;
        info!(endpoint = %self.config.endpoint(), "Connected to Chrome");
        *slot = Some(Arc::new(client));
        Ok(())
    }

    pub(super) async fn client(&self) -> Result<Arc<CdpClient>, BrowserError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotConnected)
    }

    /// Drop the connection, then stop Chrome if this manager launched it.
    pub async fn shutdown(&self) -> Result<(), BrowserError> {
        if self.client.write().await.take().is_some() {
            debug!("CDP connection dropped");
        }
        if let Some(mut child) = self.launched.lock().await.take() {
            info!("Stopping Chrome");
            child
                .kill()
                .await
                .map_err(|e| BrowserError::LaunchFailed(format!("kill: {}", e)))?;
        }
        Ok(())
    }
}
