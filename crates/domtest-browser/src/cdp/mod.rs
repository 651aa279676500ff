//! Chrome DevTools Protocol (CDP) client implementation.
//!
//! Connects to Chrome/Chromium via WebSocket and speaks the CDP JSON-RPC
//! protocol. A single [`Transport`](transport) carries every command; the
//! browser-level [`CdpClient`] and each attached [`PageSession`] only differ
//! in the session id they stamp on requests.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222", Duration::from_secs(30)).await?;
//! let page = client.new_page(Some("https://example.com")).await?;
//! page.navigate("https://example.com/login").await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;
mod transport;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
