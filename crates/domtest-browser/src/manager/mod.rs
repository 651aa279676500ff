//! Browser instance manager.
//!
//! Launches Chrome with remote debugging when nothing is listening on the
//! configured port, connects over CDP and opens pages for automation.

mod manager_chrome;
mod manager_core;
mod manager_pages;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{BrowserError, BrowserManagerConfig};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
