//! Append-only result collection for one run.

use chrono::{DateTime, Utc};

use crate::model::ExecutionResult;
use crate::report::{RunReport, RunSummary};

/// Results in the order their cases were processed, plus the run start time.
#[derive(Debug, Clone)]
pub struct ResultStore {
    results: Vec<ExecutionResult>,
    started_at: DateTime<Utc>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Append a result and return it.
    pub fn record(&mut self, result: ExecutionResult) -> &ExecutionResult {
        self.results.push(result);
        &self.results[self.results.len() - 1]
    }

    pub fn results(&self) -> &[ExecutionResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_results(&self.results)
    }

    /// Snapshot the run for the report renderer.
    pub fn report(&self, finished_at: DateTime<Utc>) -> RunReport {
        RunReport::new(self.started_at, finished_at, self.results.clone())
    }

    pub fn into_results(self) -> Vec<ExecutionResult> {
        self.results
    }

    /// Drop everything recorded so far; a run that aborts keeps no partial set.
    pub(crate) fn clear(&mut self) {
        self.results.clear();
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}
