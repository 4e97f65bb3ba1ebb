//! Run report data model.
//!
//! These types mirror the JSON documents emitted by the upstream test runner
//! and are consumed read-only by the renderer. Field names serialize in
//! camelCase so runner output deserializes directly. Absent collections and
//! counters deserialize to empty/zero values rather than erroring; the
//! renderer degrades gracefully instead of validating.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pass/fail/total counters for one iteration, as reported by the runner.
///
/// The renderer displays these numbers as given and never checks that
/// `passed + failed == total` holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Summary {
    pub total_requests: u64,
    pub passed_requests: u64,
    pub failed_requests: u64,
    pub total_assertions: u64,
    pub passed_assertions: u64,
    pub failed_assertions: u64,
    pub total_tests: u64,
    pub passed_tests: u64,
    pub failed_tests: u64,
}

impl Summary {
    /// An iteration passes when none of its failure counters are set.
    pub fn passed(&self) -> bool {
        self.failed_requests + self.failed_assertions + self.failed_tests == 0
    }
}

impl std::ops::AddAssign<&Summary> for Summary {
    fn add_assign(&mut self, other: &Summary) {
        self.total_requests += other.total_requests;
        self.passed_requests += other.passed_requests;
        self.failed_requests += other.failed_requests;
        self.total_assertions += other.total_assertions;
        self.passed_assertions += other.passed_assertions;
        self.failed_assertions += other.failed_assertions;
        self.total_tests += other.total_tests;
        self.passed_tests += other.passed_tests;
        self.failed_tests += other.failed_tests;
    }
}

/// Outcome of a single assertion or test, as the runner reports it: either a
/// plain boolean or a label such as `"pass"`/`"fail"`.
///
/// All status interpretation funnels through [`Status::passed`] and
/// [`Status::is_fail`]; no other code compares status values directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Status {
    Flag(bool),
    Label(String),
}

impl Status {
    /// True for `true` and the case-insensitive label `"pass"`.
    pub fn passed(&self) -> bool {
        match self {
            Status::Flag(flag) => *flag,
            Status::Label(label) => label.eq_ignore_ascii_case("pass"),
        }
    }

    /// True for `false` and the case-insensitive label `"fail"`. An unknown
    /// label is neither a pass nor a fail.
    pub fn is_fail(&self) -> bool {
        match self {
            Status::Flag(flag) => !flag,
            Status::Label(label) => label.eq_ignore_ascii_case("fail"),
        }
    }
}

impl Default for Status {
    fn default() -> Status {
        Status::Label(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssertionResult {
    pub uid: String,
    pub lhs_expr: String,
    pub rhs_expr: String,
    pub rhs_operand: String,
    pub operator: String,
    pub status: Status,
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestResult {
    pub uid: String,
    pub description: String,
    pub status: Status,
    pub error: Option<Value>,
    pub actual: Option<Value>,
    pub expected: Option<Value>,
}

/// The test file a request was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestFile {
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestInfo {
    pub method: String,
    pub url: String,
    pub headers: Option<IndexMap<String, String>>,
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseInfo {
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub headers: Option<IndexMap<String, String>>,
    pub data: Option<Value>,
    /// Round-trip time in milliseconds.
    pub response_time: Option<f64>,
}

/// Aggregate pass/fail counts across one result's test and assertion outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultStates {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// One executed request together with its captured outcomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestResult {
    pub test: TestFile,
    pub request: RequestInfo,
    pub response: ResponseInfo,
    pub error: Option<Value>,
    pub assertion_results: Vec<AssertionResult>,
    pub test_results: Vec<TestResult>,
    /// Wall-clock time the runner spent on this request, in seconds.
    pub runtime: f64,
    pub suitename: String,
}

impl RequestResult {
    /// Tally outcomes across `test_results` and `assertion_results`. Empty
    /// collections tally to all zeroes.
    pub fn count_states(&self) -> ResultStates {
        let total = self.test_results.len() + self.assertion_results.len();
        let failed = self
            .test_results
            .iter()
            .map(|test| &test.status)
            .chain(self.assertion_results.iter().map(|assertion| &assertion.status))
            .filter(|status| status.is_fail())
            .count();
        ResultStates {
            total,
            passed: total - failed,
            failed,
        }
    }

    /// A request passes when no test or assertion outcome failed.
    pub fn passed(&self) -> bool {
        self.count_states().failed == 0
    }
}

/// One iteration of a run: its summary counters plus every executed request,
/// in execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunReport {
    pub iteration_index: Option<u32>,
    pub summary: Summary,
    pub results: Vec<RequestResult>,
}

impl RunReport {
    /// Combined runtime of every result in this iteration, in seconds.
    pub fn runtime(&self) -> f64 {
        self.results.iter().map(|result| result.runtime).sum()
    }
}
