// crates/portfolio-eval-core/src/core/result.rs
// ============================================================================
// Module: Evaluation Results
// Description: Per-query evaluation records and evaluator verdict envelopes.
// Purpose: Record every evaluated query once, either scored or marked failed.
// Dependencies: crate::core::query, serde, serde_json
// ============================================================================

//! ## Overview
//! Evaluators return a [`Verdict`]: either a scored shape specific to the
//! metric type, or a [`Rejection`] when the payload lacks the keys the
//! evaluator expects. The suite wraps each verdict in an [`EvaluationResult`].
//! A rejection is still a successful evaluation at the record level; only an
//! evaluator fault marks the record with [`RecordStatus::Error`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::query::MetricType;

// ============================================================================
// SECTION: Verdicts
// ============================================================================

/// Status marker carried by error-shaped verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionStatus {
    /// The payload could not be scored.
    Error,
}

/// Error-shaped verdict for payloads an evaluator cannot score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label, when the evaluator reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// Always [`RejectionStatus::Error`].
    pub status: RejectionStatus,
    /// Human-readable reason.
    pub message: String,
}

impl Rejection {
    /// Creates a rejection without a scenario label.
    #[must_use]
    pub fn new(query_id: &str, message: &str) -> Self {
        Self {
            query_id: query_id.to_string(),
            scenario: None,
            status: RejectionStatus::Error,
            message: message.to_string(),
        }
    }

    /// Attaches the scenario label.
    #[must_use]
    pub fn with_scenario(mut self, scenario: &str) -> Self {
        self.scenario = Some(scenario.to_string());
        self
    }
}

/// Evaluator output: a scored shape or a rejection.
///
/// # Invariants
/// - Scored shapes never carry a `status` key, so the untagged encoding is
///   unambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Verdict<T> {
    /// Payload was not in a scoreable shape.
    Rejected(Rejection),
    /// Payload was scored.
    Scored(T),
}

impl<T> Verdict<T> {
    /// Returns the scored shape, if any.
    #[must_use]
    pub const fn scored(&self) -> Option<&T> {
        match self {
            Self::Scored(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    /// Returns true when the payload was rejected.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

// ============================================================================
// SECTION: Evaluation Result
// ============================================================================

/// Record-level status of an evaluated query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// The evaluator returned a verdict.
    Success,
    /// The evaluator faulted.
    Error,
}

/// Evaluation outcome for one query.
///
/// # Invariants
/// - `status == Success` implies `result.is_some()` and `error.is_none()`.
/// - `status == Error` implies `error.is_some()` and `result.is_none()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Report grouping.
    pub metric_type: MetricType,
    /// Encoded verdict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Fault text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Record status.
    pub status: RecordStatus,
}

impl EvaluationResult {
    /// Creates a successful record carrying an encoded verdict.
    #[must_use]
    pub fn scored(query_id: &str, scenario: &str, metric_type: MetricType, result: Value) -> Self {
        Self {
            query_id: query_id.to_string(),
            scenario: scenario.to_string(),
            metric_type,
            result: Some(result),
            error: None,
            status: RecordStatus::Success,
        }
    }

    /// Creates a failed record for an evaluator fault.
    #[must_use]
    pub fn faulted(query_id: &str, scenario: &str, metric_type: MetricType, error: String) -> Self {
        Self {
            query_id: query_id.to_string(),
            scenario: scenario.to_string(),
            metric_type,
            result: None,
            error: Some(error),
            status: RecordStatus::Error,
        }
    }

    /// Returns true when the evaluator produced a verdict.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, RecordStatus::Success)
    }

    /// Decodes the stored verdict into a typed shape.
    ///
    /// Returns `None` for failed records or when the stored value does not
    /// match `T`.
    #[must_use]
    pub fn verdict<T: serde::de::DeserializeOwned>(&self) -> Option<Verdict<T>> {
        self.result.as_ref().and_then(|value| Verdict::<T>::deserialize(value).ok())
    }
}
