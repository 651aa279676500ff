//! # DomTest Config
//!
//! Configuration management for DomTest runs: target page, browser launch,
//! timing, credentials, validation indicators and report output.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, Finding, ValidationResult};
