//! Test case and script lifecycle execution.
//!
//! [`TestCaseRunner`] runs one test case's operations in order and
//! classifies the outcome. [`ScriptRunner`] owns a script instance's
//! lifecycle: fixture resolution at construction, then
//! setup -> selected tests -> teardown per run.

use std::error::Error;

use tracing::{debug, info, warn};

use helios_testscript::{Phase, Script, TestCase, TestResult, TestStatus};

use crate::client::TestClient;
use crate::context::ExecutionContext;
use crate::error::{Fault, OperationError, ScriptError};
use crate::executor::OperationExecutor;
use crate::fixtures::{FixtureLoader, FixtureStore};

/// Runs one test case's ordered operation list.
pub struct TestCaseRunner<'a> {
    executor: &'a OperationExecutor<'a>,
}

impl<'a> TestCaseRunner<'a> {
    /// Creates a runner dispatching through the given executor.
    pub fn new(executor: &'a OperationExecutor<'a>) -> Self {
        TestCaseRunner { executor }
    }

    /// Executes the test case and classifies its outcome.
    ///
    /// Operations run strictly in order; the first assertion failure or
    /// fault aborts the rest of the test (no partial continuation).
    /// Assertion failures produce status `fail`, faults produce status
    /// `error` with a diagnostic trace. Metadata declared on the test is
    /// echoed onto the result when the corresponding list is non-empty.
    pub fn run(&self, test: &TestCase, ctx: &mut ExecutionContext) -> TestResult {
        let mut result = TestResult::new(&test.id, &test.name);
        debug!(test = %test.id, operations = test.operations.len(), "Running test case");

        for operation in &test.operations {
            match self.executor.execute(operation, ctx) {
                Ok(()) => {}
                Err(OperationError::AssertionFailed { message, data }) => {
                    result.update(TestStatus::Fail, message, data);
                    break;
                }
                Err(OperationError::Fault(fault)) => {
                    warn!(test = %test.id, fault = %fault, "Test case faulted");
                    result.update(
                        TestStatus::Error,
                        format!("Fatal Error: {}", fault),
                        diagnostic_trace(&fault),
                    );
                    break;
                }
            }
        }

        if let Some(metadata) = &test.metadata {
            if !metadata.requires.is_empty() {
                result.requires = Some(metadata.requires.clone());
            }
            if !metadata.validates.is_empty() {
                result.validates = Some(metadata.validates.clone());
            }
            if !metadata.links.is_empty() {
                result.links = Some(metadata.links.clone());
            }
        }

        info!(test = %test.id, status = %result.status, "Test case finished");
        result
    }
}

/// Renders a fault and its source chain as the result's diagnostic data.
fn diagnostic_trace(fault: &Fault) -> String {
    let mut trace = fault.to_string();
    let mut source = fault.source();
    while let Some(cause) = source {
        trace.push_str("\ncaused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }
    trace
}

/// One executable script instance.
///
/// Construction resolves every declared fixture; a load failure aborts
/// construction and no test runs. Each call to [`run`](Self::run) or
/// [`run_selected`](Self::run_selected) executes the full
/// setup -> tests -> teardown lifecycle over a fresh [`ExecutionContext`],
/// so created-resource identifiers never leak between runs.
pub struct ScriptRunner<'a> {
    script: &'a Script,
    fixtures: FixtureStore,
    client: Option<&'a dyn TestClient>,
}

impl std::fmt::Debug for ScriptRunner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRunner")
            .field("script", &self.script)
            .field("fixtures", &self.fixtures)
            .field("client", &self.client.map(|_| "<dyn TestClient>"))
            .finish()
    }
}

impl<'a> ScriptRunner<'a> {
    /// Builds a script instance, resolving every declared fixture through
    /// the loader. Pass `None` for the client to run in dry-run mode.
    pub fn new(
        script: &'a Script,
        loader: &dyn FixtureLoader,
        client: Option<&'a dyn TestClient>,
    ) -> Result<Self, ScriptError> {
        let fixtures = FixtureStore::resolve(&script.fixtures, loader)?;
        info!(
            script = %script.id,
            fixtures = fixtures.len(),
            tests = script.tests.len(),
            "Script instance ready"
        );
        Ok(ScriptRunner {
            script,
            fixtures,
            client,
        })
    }

    /// Script identifier.
    pub fn id(&self) -> &str {
        &self.script.id
    }

    /// Script title.
    pub fn title(&self) -> &str {
        &self.script.title
    }

    /// Script author attribution.
    pub fn author(&self) -> &str {
        &self.script.name
    }

    /// Script description.
    pub fn description(&self) -> &str {
        &self.script.description
    }

    /// The ordered (identifier, name) pairs of the script's test cases.
    pub fn tests(&self) -> Vec<(&str, &str)> {
        self.script
            .tests
            .iter()
            .map(|test| (test.id.as_str(), test.name.as_str()))
            .collect()
    }

    /// Runs setup, every test case in declaration order, then teardown.
    pub fn run(&self) -> Result<Vec<TestResult>, ScriptError> {
        self.run_where(|_| true)
    }

    /// Runs setup, the selected test cases in declaration order, then
    /// teardown. Tests not named are skipped entirely (no result).
    pub fn run_selected(&self, test_ids: &[&str]) -> Result<Vec<TestResult>, ScriptError> {
        self.run_where(|test| test_ids.contains(&test.id.as_str()))
    }

    fn run_where(
        &self,
        selected: impl Fn(&TestCase) -> bool,
    ) -> Result<Vec<TestResult>, ScriptError> {
        let executor = OperationExecutor::new(&self.fixtures, self.client);
        let runner = TestCaseRunner::new(&executor);
        let mut ctx = ExecutionContext::new();

        info!(script = %self.script.id, "Starting script run");
        run_phase(self.script.setup.as_ref(), &executor, &mut ctx).map_err(ScriptError::Setup)?;

        let mut results = Vec::new();
        for test in &self.script.tests {
            if selected(test) {
                results.push(runner.run(test, &mut ctx));
            }
        }

        run_phase(self.script.teardown.as_ref(), &executor, &mut ctx)
            .map_err(ScriptError::Teardown)?;

        info!(
            script = %self.script.id,
            passed = results.iter().filter(|r| r.is_pass()).count(),
            total = results.len(),
            "Script run finished"
        );
        Ok(results)
    }
}

/// Executes a setup or teardown phase.
///
/// Faults are not caught here: setup and teardown failures are
/// environment-level problems, not per-test outcomes, and abort the
/// remaining script lifecycle.
fn run_phase(
    phase: Option<&Phase>,
    executor: &OperationExecutor<'_>,
    ctx: &mut ExecutionContext,
) -> Result<(), OperationError> {
    let Some(phase) = phase else {
        return Ok(());
    };

    for operation in &phase.operations {
        executor.execute(operation, ctx)?;
    }
    Ok(())
}
