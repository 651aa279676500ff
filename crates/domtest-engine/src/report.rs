//! Run report handed to the external renderer.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RunError;
use crate::model::ExecutionResult;

/// Pass/fail counts for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of passed cases, 0 for an empty run.
    pub pass_rate: f64,
}

impl RunSummary {
    pub fn from_results(results: &[ExecutionResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.is_passed()).count();
        let pass_rate = if total == 0 {
            0.0
        } else {
            passed as f64 * 100.0 / total as f64
        };

        Self {
            total,
            passed,
            failed: total - passed,
            pass_rate,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Everything the report renderer needs about one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Execution time in seconds.
    pub duration_secs: f64,
    pub summary: RunSummary,
    pub results: Vec<ExecutionResult>,
}

impl RunReport {
    pub fn new(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        results: Vec<ExecutionResult>,
    ) -> Self {
        let duration_secs = (finished_at - started_at).num_milliseconds().max(0) as f64 / 1000.0;
        Self {
            started_at,
            finished_at,
            duration_secs,
            summary: RunSummary::from_results(&results),
            results,
        }
    }

    pub fn to_json(&self) -> Result<String, RunError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), RunError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        info!("Report written to {}", path.display());
        Ok(())
    }
}
