// crates/portfolio-eval-core/src/runtime/suite.rs
// ============================================================================
// Module: Evaluation Suite
// Description: Joins catalog queries to responses and accumulates results.
// Purpose: Evaluate every recognised query once without aborting the batch.
// Dependencies: crate::{core, interfaces, runtime::registry}, tracing
// ============================================================================

//! ## Overview
//! For each catalog query the suite looks up the response payload by
//! identifier (empty when missing), dispatches through [`evaluate`], and
//! appends one [`EvaluationResult`]. Queries with unrecognised test types are
//! skipped. An evaluator fault, including a response body that is not an
//! object, becomes a failed record; it never stops the batch. The build and
//! lint records are summarized as [`SystemCheck`] entries on the report.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use tracing::debug;
use tracing::warn;

use crate::core::query::Query;
use crate::core::query::TestType;
use crate::core::report::Report;
use crate::core::report::SystemCheck;
use crate::core::response::Payload;
use crate::core::response::ResponseIndex;
use crate::core::response::ResponseRecord;
use crate::core::result::EvaluationResult;
use crate::core::time::rfc3339_now;
use crate::interfaces::SuiteObserver;
use crate::runtime::payload::EvaluatorFault;
use crate::runtime::payload::EvaluatorInput;
use crate::runtime::registry::evaluate;

// ============================================================================
// SECTION: Suite
// ============================================================================

/// Accumulating evaluation suite.
///
/// # Invariants
/// - Results are append-only and kept in evaluation order.
pub struct EvaluationSuite<O: SuiteObserver> {
    /// Progress observer.
    observer: O,
    /// Accumulated results.
    results: Vec<EvaluationResult>,
    /// System checks from the latest run.
    system_checks: Vec<SystemCheck>,
}

impl<O: SuiteObserver> EvaluationSuite<O> {
    /// Creates an empty suite.
    #[must_use]
    pub const fn new(observer: O) -> Self {
        Self {
            observer,
            results: Vec::new(),
            system_checks: Vec::new(),
        }
    }

    /// Evaluates every query against the collected responses.
    ///
    /// Returns the results appended by this call. System checks are replaced
    /// by the ones found in `responses`.
    pub fn run(&mut self, queries: &[Query], responses: &[ResponseRecord]) -> &[EvaluationResult] {
        let start = self.results.len();
        let index = ResponseIndex::new(responses);
        self.system_checks = index.system_records().into_iter().map(SystemCheck::from_record).collect();
        for check in self.system_checks.iter().filter(|check| !check.passed) {
            warn!(query_id = %check.query_id, status = %check.status, "system check failed");
        }
        for query in queries {
            if let Some(result) = self.evaluate_response(query, index.response(&query.id)) {
                self.results.push(result);
            }
        }
        &self.results[start ..]
    }

    /// Evaluates one query, notifying the observer.
    ///
    /// Returns `None` when the test type has no evaluator.
    pub fn evaluate_query(&self, query: &Query, payload: &Payload) -> Option<EvaluationResult> {
        let test_type = self.recognise(query)?;
        let input = EvaluatorInput::new(&query.id, &query.scenario, payload);
        let verdict = evaluate(test_type, &input).and_then(|outcome| outcome.to_value());
        Some(self.record(query, test_type, verdict))
    }

    /// Evaluates a raw response body; a missing body scores as empty.
    fn evaluate_response(&self, query: &Query, response: Option<&Value>) -> Option<EvaluationResult> {
        match response {
            None => self.evaluate_query(query, &Payload::new()),
            Some(Value::Object(payload)) => self.evaluate_query(query, payload),
            Some(_) => {
                let test_type = self.recognise(query)?;
                let fault = EvaluatorFault::WrongType {
                    field: "response".to_string(),
                    expected: "an object",
                };
                Some(self.record(query, test_type, Err(fault)))
            }
        }
    }

    /// Returns the test type, notifying the observer when it is unrecognised.
    fn recognise(&self, query: &Query) -> Option<TestType> {
        let kind = query.kind();
        if kind.is_none() {
            debug!(query_id = %query.id, test_type = %query.test_type, "skipping unrecognised test type");
            self.observer.query_skipped(query);
        }
        kind
    }

    /// Builds the record for an encoded verdict or fault.
    fn record(
        &self,
        query: &Query,
        test_type: TestType,
        verdict: Result<Value, EvaluatorFault>,
    ) -> EvaluationResult {
        let metric_type = test_type.metric_type();
        let result = match verdict {
            Ok(value) => EvaluationResult::scored(&query.id, &query.scenario, metric_type, value),
            Err(fault) => {
                warn!(query_id = %query.id, error = %fault, "evaluator fault");
                EvaluationResult::faulted(&query.id, &query.scenario, metric_type, fault.to_string())
            }
        };
        self.observer.result_recorded(&result);
        result
    }

    /// Returns the accumulated results.
    #[must_use]
    pub fn results(&self) -> &[EvaluationResult] {
        &self.results
    }

    /// Returns the system checks from the latest run.
    #[must_use]
    pub fn system_checks(&self) -> &[SystemCheck] {
        &self.system_checks
    }

    /// Builds a report over the accumulated results and latest system checks.
    #[must_use]
    pub fn report(&self) -> Report {
        Report::from_results(&self.results, rfc3339_now())
            .with_system_checks(self.system_checks.clone())
    }
}
