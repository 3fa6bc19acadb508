// crates/portfolio-eval-core/src/runtime/registry.rs
// ============================================================================
// Module: Evaluator Registry
// Description: Closed dispatch from test type to evaluator.
// Purpose: Route each query to exactly one evaluator and encode its verdict.
// Dependencies: crate::core, crate::runtime::{performance, bundle, loading, ux}
// ============================================================================

//! ## Overview
//! Dispatch is an exhaustive `match` over [`TestType`]; adding a test type is
//! a compile-time change here rather than a lookup-table entry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::query::MetricType;
use crate::core::query::TestType;
use crate::core::result::Verdict;
use crate::runtime::bundle::BundleScore;
use crate::runtime::bundle::evaluate_bundle;
use crate::runtime::loading::LoadingScore;
use crate::runtime::loading::evaluate_loading;
use crate::runtime::payload::EvaluatorFault;
use crate::runtime::payload::EvaluatorInput;
use crate::runtime::performance::PerformanceScore;
use crate::runtime::performance::evaluate_performance;
use crate::runtime::ux::UxScore;
use crate::runtime::ux::evaluate_ux;

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Typed verdict tagged by the evaluator that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Performance evaluator verdict.
    Performance(Verdict<PerformanceScore>),
    /// Bundle evaluator verdict.
    Bundle(Verdict<BundleScore>),
    /// Loading evaluator verdict.
    Loading(Verdict<LoadingScore>),
    /// UX evaluator verdict.
    Ux(Verdict<UxScore>),
}

impl Outcome {
    /// Returns the report metric type.
    #[must_use]
    pub const fn metric_type(&self) -> MetricType {
        match self {
            Self::Performance(_) => MetricType::Performance,
            Self::Bundle(_) => MetricType::Bundle,
            Self::Loading(_) => MetricType::Loading,
            Self::Ux(_) => MetricType::Ux,
        }
    }

    /// Returns true when the evaluator rejected the payload shape.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        match self {
            Self::Performance(verdict) => verdict.is_rejected(),
            Self::Bundle(verdict) => verdict.is_rejected(),
            Self::Loading(verdict) => verdict.is_rejected(),
            Self::Ux(verdict) => verdict.is_rejected(),
        }
    }

    /// Encodes the verdict for storage in an evaluation record.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorFault::Encode`] when serialization fails.
    pub fn to_value(&self) -> Result<Value, EvaluatorFault> {
        let encoded = match self {
            Self::Performance(verdict) => serde_json::to_value(verdict),
            Self::Bundle(verdict) => serde_json::to_value(verdict),
            Self::Loading(verdict) => serde_json::to_value(verdict),
            Self::Ux(verdict) => serde_json::to_value(verdict),
        };
        encoded.map_err(|err| EvaluatorFault::Encode(err.to_string()))
    }
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Evaluates a payload with the evaluator registered for `test_type`.
///
/// # Errors
///
/// Returns [`EvaluatorFault`] when the evaluator meets a malformed value.
pub fn evaluate(test_type: TestType, input: &EvaluatorInput<'_>) -> Result<Outcome, EvaluatorFault> {
    match test_type {
        TestType::Performance => evaluate_performance(input).map(Outcome::Performance),
        TestType::BundleOptimization => evaluate_bundle(input).map(Outcome::Bundle),
        TestType::LoadingExperience => evaluate_loading(input).map(Outcome::Loading),
        TestType::UxInteraction => evaluate_ux(input).map(Outcome::Ux),
    }
}
