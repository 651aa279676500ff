//! Browser driver for DomTest.
//!
//! Drives Chrome through the Chrome DevTools Protocol (CDP). Pure Rust, no
//! WebDriver binary or Node.js runtime required.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │ domtest-engine  │ ◄──────────────► │   Chrome/Edge    │
//! │  (BrowserPage)  │       CDP        │ (launched/reused)│
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! ## Setup
//!
//! [`BrowserManager`] launches Chrome with remote debugging when nothing is
//! listening on the configured port. An already running instance can be
//! reused by starting it yourself:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! ## Pages
//!
//! The engine never talks CDP directly. It sees a single page through the
//! [`BrowserPage`] trait, implemented here by [`CdpPage`]: element lookup by
//! native strategy, frame switching, clearing, typing, clicking and
//! visibility checks.

pub mod cdp;
pub mod manager;
mod page;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
pub use page::{BrowserPage, CdpPage, ElementHandle, Locator};
