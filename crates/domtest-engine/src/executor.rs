//! Step execution.

use std::fmt;
use std::time::Duration;

use domtest_browser::{BrowserPage, ElementHandle};
use tracing::debug;

use crate::error::EngineError;
use crate::model::Step;
use crate::resolver::ResolvedElement;

/// `<input>` types that accept typed text.
const TEXT_ENTRY_TYPES: &[&str] = &[
    "text",
    "password",
    "email",
    "search",
    "tel",
    "url",
    "number",
    "date",
    "datetime-local",
    "month",
    "week",
    "time",
];

/// `<input>` types that act when clicked.
const ACTIVATE_INPUT_TYPES: &[&str] = &["submit", "button", "reset", "checkbox", "radio", "image"];

/// A sensitive value typed into masked fields. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read from an environment variable; unset or empty yields `None`.
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var)
            .ok()
            .filter(|v| !v.is_empty())
            .map(Self)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// What a step can do with an element, decided by what the element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementAction {
    /// Clear, then type. `masked` fields receive the configured secret.
    Fill { masked: bool },
    /// Click.
    Activate,
    /// Pick an `<option>` by value or label.
    Choose,
}

impl ElementAction {
    pub fn classify(element: &ElementHandle) -> Result<Self, EngineError> {
        if element.content_editable {
            return Ok(ElementAction::Fill { masked: false });
        }

        match element.tag_name.as_str() {
            "input" => {
                let input_type = element.input_type.as_deref().unwrap_or("text");
                if input_type == "password" {
                    Ok(ElementAction::Fill { masked: true })
                } else if TEXT_ENTRY_TYPES.contains(&input_type) {
                    Ok(ElementAction::Fill { masked: false })
                } else if ACTIVATE_INPUT_TYPES.contains(&input_type) {
                    Ok(ElementAction::Activate)
                } else {
                    Err(EngineError::UnsupportedAction {
                        tag: format!("input type=\"{}\"", input_type),
                    })
                }
            }
            "textarea" => Ok(ElementAction::Fill { masked: false }),
            "button" | "a" => Ok(ElementAction::Activate),
            "select" => Ok(ElementAction::Choose),
            other => Err(EngineError::UnsupportedAction {
                tag: other.to_string(),
            }),
        }
    }
}

/// Performs one step against a resolved element, then settles.
#[derive(Debug, Clone)]
pub struct StepExecutor {
    settle: Duration,
    secret: Option<Secret>,
    secret_env: String,
}

impl StepExecutor {
    pub fn new(settle: Duration, secret: Option<Secret>, secret_env: impl Into<String>) -> Self {
        Self {
            settle,
            secret,
            secret_env: secret_env.into(),
        }
    }

    pub async fn execute(
        &self,
        page: &dyn BrowserPage,
        element: &ResolvedElement,
        step: &Step,
    ) -> Result<ElementAction, EngineError> {
        let handle = element.handle();
        let action = ElementAction::classify(handle)?;
        debug!(selector = %element.locator(), ?action, "Acting on <{}>", handle.tag_name);

        match action {
            ElementAction::Fill { masked } => {
                let text = if masked {
                    self.secret
                        .as_ref()
                        .map(Secret::expose)
                        .ok_or_else(|| EngineError::MissingSecret(self.secret_env.clone()))?
                } else {
                    step.value_or_empty()
                };
                page.clear(handle).await?;
                page.send_keys(handle, text).await?;
            }
            ElementAction::Activate => page.click(handle).await?,
            ElementAction::Choose => page.select_option(handle, step.value_or_empty()).await?,
        }

        tokio::time::sleep(self.settle).await;
        Ok(action)
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
