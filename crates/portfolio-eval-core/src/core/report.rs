// crates/portfolio-eval-core/src/core/report.rs
// ============================================================================
// Module: Evaluation Report
// Description: Aggregated view over accumulated evaluation results.
// Purpose: Provide the authoritative, persisted summary used for gating.
// Dependencies: crate::core::{query, response, result}, serde
// ============================================================================

//! ## Overview
//! A [`Report`] is derived from the accumulated results on each request and
//! never maintained incrementally. Rendering is a separate concern (see
//! [`crate::runtime::render_report`]); the structured report is the contract.
//! Build and lint outcomes travel as [`SystemCheck`] entries beside the query
//! results and never count toward the test totals.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::query::MetricType;
use crate::core::response::ResponseRecord;
use crate::core::result::EvaluationResult;
use crate::core::result::RecordStatus;

// ============================================================================
// SECTION: System Checks
// ============================================================================

/// Build or lint outcome reported beside the query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemCheck {
    /// System record identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Recorded status, `error` when none was recorded.
    pub status: String,
    /// Status is `success` or `skipped`.
    pub passed: bool,
    /// Failure detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SystemCheck {
    /// Summarizes a system record.
    #[must_use]
    pub fn from_record(record: &ResponseRecord) -> Self {
        let status = if record.error.is_some() { "error" } else { record.status().unwrap_or("error") };
        let message = record.error.clone().or_else(|| {
            record.response.get("message").and_then(Value::as_str).map(str::to_string)
        });
        Self {
            query_id: record.query_id.clone(),
            scenario: record.scenario.clone(),
            status: status.to_string(),
            passed: matches!(status, "success" | "skipped"),
            message,
        }
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Aggregated evaluation report.
///
/// # Invariants
/// - `total_tests == passed + failed == all_results.len()`.
/// - `results_by_type` partitions `all_results`, preserving order within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Generation time (RFC 3339).
    pub generated_at: String,
    /// Number of evaluated queries.
    pub total_tests: usize,
    /// Records with [`RecordStatus::Success`].
    pub passed: usize,
    /// Records with [`RecordStatus::Error`].
    pub failed: usize,
    /// Records grouped by metric type.
    pub results_by_type: BTreeMap<MetricType, Vec<EvaluationResult>>,
    /// Every record in evaluation order.
    pub all_results: Vec<EvaluationResult>,
    /// Build and lint outcomes, build first.
    #[serde(default)]
    pub system_checks: Vec<SystemCheck>,
}

impl Report {
    /// Builds a report from accumulated results.
    #[must_use]
    pub fn from_results(results: &[EvaluationResult], generated_at: String) -> Self {
        let mut results_by_type: BTreeMap<MetricType, Vec<EvaluationResult>> = BTreeMap::new();
        for result in results {
            results_by_type.entry(result.metric_type).or_default().push(result.clone());
        }
        let passed = results.iter().filter(|r| r.status == RecordStatus::Success).count();
        let failed = results.iter().filter(|r| r.status == RecordStatus::Error).count();
        Self {
            generated_at,
            total_tests: results.len(),
            passed,
            failed,
            results_by_type,
            all_results: results.to_vec(),
            system_checks: Vec::new(),
        }
    }

    /// Attaches system check outcomes.
    #[must_use]
    pub fn with_system_checks(mut self, system_checks: Vec<SystemCheck>) -> Self {
        self.system_checks = system_checks;
        self
    }

    /// Returns true when no record failed and every system check passed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.system_checks.iter().all(|check| check.passed)
    }

    /// Returns the records for a metric type.
    #[must_use]
    pub fn results_for(&self, metric_type: MetricType) -> &[EvaluationResult] {
        self.results_by_type.get(&metric_type).map_or(&[], Vec::as_slice)
    }
}
