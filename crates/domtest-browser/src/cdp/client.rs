//! Browser-level CDP connection.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::SplitStream;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{Incoming, TargetEntry, VersionInfo};
use super::session::PageSession;
use super::transport::{Transport, WsStream};

/// Connection to a Chrome instance's browser target.
///
/// Pages are attached as flattened sessions, so every tab shares this socket.
/// Dropping the client stops the reader task and fails pending commands.
pub struct CdpClient {
    http_base: String,
    browser_ws_url: String,
    transport: Arc<Transport>,
    reader: JoinHandle<()>,
}

impl CdpClient {
    /// Discover the browser socket through `<endpoint>/json/version` and open it.
    pub async fn connect(endpoint: &str, command_timeout: Duration) -> Result<Self, CdpError> {
        let http_base = url::Url::parse(endpoint)?
            .as_str()
            .trim_end_matches('/')
            .to_string();

        let version: VersionInfo = get_json(&format!("{}/json/version", http_base))
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?;
        debug!(
            browser = %version.browser,
            protocol = %version.protocol_version,
            "Found DevTools endpoint"
        );

        let browser_ws_url = version.web_socket_debugger_url;
        let (socket, _) = tokio_tungstenite::connect_async(&browser_ws_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;
        let (sink, source) = socket.split();

        let transport = Arc::new(Transport::new(sink, command_timeout));
        let reader = tokio::spawn(read_loop(source, transport.clone()));

        debug!("CDP client connected to {}", browser_ws_url);
        Ok(Self {
            http_base,
            browser_ws_url,
            transport,
            reader,
        })
    }

    pub fn browser_ws_url(&self) -> &str {
        &self.browser_ws_url
    }

    /// Browser-level command (no session id).
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.send(method, params, None).await
    }

    /// Open a tab (optionally at `url`) and attach a session to it.
    pub async fn new_page(&self, url: Option<&str>) -> Result<PageSession, CdpError> {
        let mut create = format!("{}/json/new", self.http_base);
        if let Some(url) = url {
            create.push('?');
            create.push_str(url);
        }

        // /json/new only accepts PUT on current Chrome.
        let target: TargetEntry = reqwest::Client::new()
            .put(&create)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(target = %target.id, url = %target.url, "Opened tab");

        self.attach_page(&target.id).await
    }

    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let attached = self
            .call(
                "Target.attachToTarget",
                Some(json!({ "targetId": target_id, "flatten": true })),
            )
            .await?;
        let session_id = attached["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?;

        let session = PageSession::new(
            target_id.to_string(),
            session_id.to_string(),
            self.transport.clone(),
        );
        session.enable_domains().await?;
        Ok(session)
    }

    pub async fn close_page(&self, target_id: &str) -> Result<(), CdpError> {
        self.call("Target.closeTarget", Some(json!({ "targetId": target_id })))
            .await
            .map(drop)
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, CdpError> {
    trace!("GET {}", url);
    Ok(reqwest::get(url).await?.error_for_status()?.json().await?)
}

/// Feed socket messages to the transport until the socket closes.
async fn read_loop(mut source: SplitStream<WsStream>, transport: Arc<Transport>) {
    while let Some(frame) = source.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                trace!("CDP recv: {}", text);
                match serde_json::from_str::<Incoming>(&text) {
                    Ok(message) => transport.dispatch(message),
                    Err(e) => warn!("Unparseable CDP message: {}", e),
                }
            }
            Ok(Message::Close(_)) => {
                debug!("Browser closed the DevTools socket");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                error!("DevTools socket error: {}", e);
                break;
            }
        }
    }
    transport.close();
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
