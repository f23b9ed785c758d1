//! Test result output types.
//!
//! A [`TestResult`] is the externally observable artifact of one test case
//! run. It is created in the passing state and receives at most one
//! status/message/data update, on the first assertion failure or fault.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::script::CapabilityRef;

/// Outcome classification for one executed test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Every operation completed and every assertion held.
    Pass,

    /// An assertion's expected condition did not hold.
    Fail,

    /// A systemic fault interrupted the test.
    Error,

    /// The test was selected out by a suite runner. The engine itself never
    /// produces this status.
    Skip,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TestStatus::Pass => "pass",
            TestStatus::Fail => "fail",
            TestStatus::Error => "error",
            TestStatus::Skip => "skip",
        };
        write!(f, "{}", label)
    }
}

/// The outcome of one test case run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TestResult {
    /// Test identifier.
    pub id: String,

    /// Test name.
    pub name: String,

    /// Outcome classification.
    pub status: TestStatus,

    /// Failure or fault message; empty on pass.
    pub message: String,

    /// Diagnostic data (expected vs. actual, fault trace); empty on pass.
    pub data: String,

    /// Capabilities the test requires, echoed from its metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<Vec<CapabilityRef>>,

    /// Capabilities the test validates, echoed from its metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validates: Option<Vec<CapabilityRef>>,

    /// Documentation links echoed from its metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
}

impl TestResult {
    /// Creates a result in the initial passing state.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        TestResult {
            id: id.into(),
            name: name.into(),
            status: TestStatus::Pass,
            message: String::new(),
            data: String::new(),
            requires: None,
            validates: None,
            links: None,
        }
    }

    /// Records a status change with its message and diagnostic data.
    ///
    /// The engine calls this at most once per run, on the first assertion
    /// failure or fault.
    pub fn update(
        &mut self,
        status: TestStatus,
        message: impl Into<String>,
        data: impl Into<String>,
    ) {
        self.status = status;
        self.message = message.into();
        self.data = data.into();
    }

    /// Returns true when the test passed.
    pub fn is_pass(&self) -> bool {
        self.status == TestStatus::Pass
    }
}
