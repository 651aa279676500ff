//! Test case orchestration.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use domtest_browser::{BrowserManager, BrowserPage, CdpPage};
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, RunError};
use crate::executor::StepExecutor;
use crate::model::{ExecutionResult, TestCase};
use crate::resolver::SelectorResolver;
use crate::store::ResultStore;
use crate::validation::ValidationEngine;

/// Where a test case is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseState {
    Pending,
    Navigating,
    /// 1-based step number.
    Executing { step: usize },
    Validating,
    Passed,
    Failed,
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseState::Pending => f.write_str("pending"),
            CaseState::Navigating => f.write_str("navigating"),
            CaseState::Executing { step } => write!(f, "executing step {}", step),
            CaseState::Validating => f.write_str("validating"),
            CaseState::Passed => f.write_str("passed"),
            CaseState::Failed => f.write_str("failed"),
        }
    }
}

/// Why a case stopped early.
enum Fault {
    /// Ends this case only.
    Case(EngineError),
    /// Ends the run.
    Run(RunError),
}

impl From<EngineError> for Fault {
    fn from(e: EngineError) -> Self {
        Fault::Case(e)
    }
}

/// Runs test cases one at a time against a single browser page.
pub struct TestExecutor {
    page: Arc<dyn BrowserPage>,
    config: EngineConfig,
    resolver: SelectorResolver,
    executor: StepExecutor,
    validator: ValidationEngine,
    store: ResultStore,
    /// Whether any case in this run has loaded the target.
    reached_target: bool,
}

impl TestExecutor {
    pub fn new(page: Arc<dyn BrowserPage>, config: EngineConfig) -> Self {
        let resolver = SelectorResolver::new(config.element_wait, config.poll_interval);
        let executor = StepExecutor::new(
            config.step_settle,
            config.secret.clone(),
            config.secret_env.clone(),
        );
        let validator = ValidationEngine::new(config.validation.clone());

        Self {
            page,
            config,
            resolver,
            executor,
            validator,
            store: ResultStore::new(),
            reached_target: false,
        }
    }

    /// Open the run's browser page and build an engine on it.
    ///
    /// The returned page is the caller's to close once the run is over.
    pub async fn launch(
        manager: &BrowserManager,
        config: EngineConfig,
    ) -> Result<(Self, Arc<CdpPage>), RunError> {
        let page = Arc::new(manager.open_page("about:blank").await?);
        let engine = Self::new(page.clone(), config);
        Ok((engine, page))
    }

    pub fn page(&self) -> Arc<dyn BrowserPage> {
        self.page.clone()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn results(&self) -> &ResultStore {
        &self.store
    }

    pub fn into_results(self) -> ResultStore {
        self.store
    }

    /// Run every case in order. Either all cases get a result or, on a
    /// run-level fault, none do.
    pub async fn run(&mut self, cases: &[TestCase]) -> Result<&ResultStore, RunError> {
        self.store = ResultStore::new();
        self.reached_target = false;
        info!("Running {} test cases against {}", cases.len(), self.config.target_url);

        for case in cases {
            let outcome = self.execute_test_case(case).await.map(|_| ());
            if let Err(e) = outcome {
                error!("Run aborted: {}", e);
                self.store.clear();
                return Err(e);
            }
        }

        let summary = self.store.summary();
        info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            "Run finished"
        );
        Ok(&self.store)
    }

    /// Execute one case and record its result.
    ///
    /// Faults inside the case become a `Failed` result; only run-level
    /// faults are returned as errors, with nothing recorded.
    pub async fn execute_test_case(
        &mut self,
        case: &TestCase,
    ) -> Result<&ExecutionResult, RunError> {
        info!(case_id = %case.id, "Executing {}: {}", case.id, case.title);
        let mut state = CaseState::Pending;

        let result = match self.drive(case, &mut state).await {
            Ok(()) => {
                transition(case, &mut state, CaseState::Passed);
                ExecutionResult::passed(case.clone())
            }
            Err(Fault::Case(e)) => {
                error!(case_id = %case.id, "Test execution failed during {}: {}", state, e);
                transition(case, &mut state, CaseState::Failed);
                let mut result = ExecutionResult::failed(case.clone(), e.to_string());
                result.screenshot = self.capture_failure(case).await;
                result
            }
            Err(Fault::Run(e)) => return Err(e),
        };

        Ok(self.store.record(result))
    }

    async fn drive(&mut self, case: &TestCase, state: &mut CaseState) -> Result<(), Fault> {
        transition(case, state, CaseState::Navigating);
        self.navigate().await?;
        tokio::time::sleep(self.config.initial_settle).await;

        let page = self.page.as_ref();
        for (index, step) in case.steps.iter().enumerate() {
            transition(case, state, CaseState::Executing { step: index + 1 });
            info!(case_id = %case.id, step = index + 1, "Executing step: {}", step.action);

            let element = self
                .resolver
                .resolve(page, &step.selector_type, &step.selector_value)
                .await?;
            self.executor.execute(page, &element, step).await?;
        }

        transition(case, state, CaseState::Validating);
        self.validator.validate(page, &case.expected_results).await?;
        Ok(())
    }

    async fn navigate(&mut self) -> Result<(), Fault> {
        let url = &self.config.target_url;
        match self.page.navigate(url).await {
            Ok(()) => {
                self.reached_target = true;
                Ok(())
            }
            Err(e) if e.is_session_lost() => Err(Fault::Run(RunError::SessionLost(e))),
            Err(e) if !self.reached_target => Err(Fault::Run(RunError::Unreachable {
                url: url.clone(),
                source: e,
            })),
            Err(e) => Err(Fault::Case(EngineError::Browser(e))),
        }
    }

    async fn capture_failure(&self, case: &TestCase) -> Option<PathBuf> {
        let dir = self.config.screenshot_dir.as_ref()?;

        let png = match self.page.screenshot_png().await {
            Ok(png) => png,
            Err(e) => {
                warn!(case_id = %case.id, "Failure screenshot skipped: {}", e);
                return None;
            }
        };

        let path = dir.join(format!("{}.png", file_stem(&case.id)));
        let written = async {
            tokio::fs::create_dir_all(dir).await?;
            tokio::fs::write(&path, png).await
        };
        match written.await {
            Ok(()) => {
                debug!(case_id = %case.id, "Failure screenshot saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!(case_id = %case.id, "Could not save failure screenshot: {}", e);
                None
            }
        }
    }
}

fn transition(case: &TestCase, state: &mut CaseState, next: CaseState) {
    debug!(case_id = %case.id, "{} -> {}", state, next);
    *state = next;
}

/// Case ids are free text; keep file names portable.
fn file_stem(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
