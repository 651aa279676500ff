//! Shared request/response plumbing over the CDP WebSocket.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::SplitSink;
use futures::SinkExt;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::trace;

use super::error::CdpError;
use super::protocol::{Command, Incoming};

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;

type Reply = oneshot::Sender<Result<Value, CdpError>>;

/// Owns the write half of the socket and the table of in-flight commands.
///
/// Request ids are unique across the browser connection, so the browser
/// session and every page session share one transport.
pub(crate) struct Transport {
    sink: tokio::sync::Mutex<WsSink>,
    next_id: AtomicU64,
    pending: Mutex<HashMap<u64, Reply>>,
    command_timeout: Duration,
}

impl Transport {
    pub(crate) fn new(sink: WsSink, command_timeout: Duration) -> Self {
        Self {
            sink: tokio::sync::Mutex::new(sink),
            next_id: AtomicU64::new(1),
            pending: Mutex::new(HashMap::new()),
            command_timeout,
        }
    }

    /// Send a command and wait for its reply.
    pub(crate) async fn send(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let json = serde_json::to_string(&Command {
            id,
            method,
            params,
            session_id,
        })?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        let sent = {
            let mut ws = self.sink.lock().await;
            ws.send(Message::Text(json.into())).await
        };
        if let Err(e) = sent {
            self.pending.lock().remove(&id);
            return Err(e.into());
        }

        match tokio::time::timeout(self.command_timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }

    /// Hand a decoded message to the command waiting for it. Events are
    /// only traced.
    pub(crate) fn dispatch(&self, message: Incoming) {
        let event = message.method.clone();
        let Some((id, outcome)) = message.into_reply() else {
            if let Some(method) = event {
                trace!("CDP event ignored: {}", method);
            }
            return;
        };

        match self.pending.lock().remove(&id) {
            Some(reply) => {
                let _ = reply.send(outcome);
            }
            None => trace!("CDP reply for unknown request {}", id),
        }
    }

    /// Fail every in-flight command; the socket is gone.
    pub(crate) fn close(&self) {
        for (_, reply) in self.pending.lock().drain() {
            let _ = reply.send(Err(CdpError::SessionClosed));
        }
    }

    #[cfg(test)]
    pub(crate) fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }
}
