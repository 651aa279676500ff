//! # DomTest Engine
//!
//! Executes structured test cases against a live page.
//!
//! ## Components
//!
//! - [`SelectorResolver`] - turns a `(type, value)` selector into a live element,
//!   looking inside the first iframe first, with a bounded wait
//! - [`StepExecutor`] - acts on a resolved element according to what it can do
//! - [`ValidationEngine`] - checks free-text expectations against the page
//! - [`TestExecutor`] - runs cases one after another and records outcomes
//! - [`ResultStore`] - the append-only result list of one run
//!
//! The browser is reached only through
//! [`BrowserPage`](domtest_browser::BrowserPage).

pub mod config;
pub mod error;
pub mod executor;
pub mod frame;
pub mod loader;
pub mod model;
pub mod report;
pub mod resolver;
pub mod runner;
pub mod selector;
pub mod store;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use config::EngineConfig;
pub use error::{EngineError, LoadError, RunError};
pub use executor::{ElementAction, Secret, StepExecutor};
pub use frame::FrameScope;
pub use loader::{load_test_cases, parse_test_cases};
pub use model::{ExecutionResult, Priority, Status, Step, TestCase};
pub use report::{RunReport, RunSummary};
pub use resolver::{ResolvedElement, SelectorResolver};
pub use runner::{CaseState, TestExecutor};
pub use selector::SelectorType;
pub use store::ResultStore;
pub use validation::{ExpectationKind, ValidationEngine};
