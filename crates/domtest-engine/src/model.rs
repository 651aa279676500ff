//! Test case and result data model.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Test case priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(s)
    }
}

/// One UI action against one element.
///
/// `selector_type` is kept verbatim; unknown types are reported when the
/// step runs, not when the case is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub action: String,

    #[serde(alias = "selectorType")]
    pub selector_type: String,

    #[serde(alias = "selectorValue")]
    pub selector_value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Step {
    pub fn new(action: &str, selector_type: &str, selector_value: &str) -> Self {
        Self {
            action: action.to_string(),
            selector_type: selector_type.to_string(),
            selector_value: selector_value.to_string(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    /// The step's value, empty when absent.
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

/// A sequence of steps plus the outcomes expected afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub steps: Vec<Step>,

    #[serde(default, alias = "expectedResults")]
    pub expected_results: Vec<String>,
}

impl TestCase {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            priority: Priority::default(),
            steps: Vec::new(),
            expected_results: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn expect(mut self, expectation: &str) -> Self {
        self.expected_results.push(expectation.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Passed,
    Failed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Passed => f.write_str("Passed"),
            Status::Failed => f.write_str("Failed"),
        }
    }
}

/// Outcome of one test case: the case itself plus status and error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(flatten)]
    pub test_case: TestCase,

    pub status: Status,

    pub error: Option<String>,

    /// Page capture taken when the case failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
}

impl ExecutionResult {
    pub fn passed(test_case: TestCase) -> Self {
        Self {
            test_case,
            status: Status::Passed,
            error: None,
            screenshot: None,
        }
    }

    pub fn failed(test_case: TestCase, error: impl Into<String>) -> Self {
        Self {
            test_case,
            status: Status::Failed,
            error: Some(error.into()),
            screenshot: None,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == Status::Passed
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
