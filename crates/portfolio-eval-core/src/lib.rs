// crates/portfolio-eval-core/src/lib.rs
// ============================================================================
// Module: Portfolio Eval Core Library
// Description: Public API surface for the portfolio evaluation core.
// Purpose: Expose the query/response schema, evaluators, suite, and reports.
// Dependencies: crate::{core, interfaces, runtime, storage}
// ============================================================================

//! ## Overview
//! Portfolio Eval core scores collected site metrics against fixed thresholds.
//! Queries from a catalog are joined with collected responses by identifier,
//! dispatched to one evaluator per test type, and aggregated into a report.
//! The core depends only on the response schema; how a response was produced
//! (simulated or measured) is invisible to the evaluators.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;
pub mod storage;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::NoopObserver;
pub use interfaces::SuiteObserver;
pub use runtime::EvaluatorFault;
pub use runtime::EvaluatorInput;
pub use runtime::EvaluationSuite;
pub use runtime::Outcome;
pub use runtime::evaluate;
pub use runtime::render_report;
pub use storage::EvalError;
pub use storage::InputKind;
