// crates/portfolio-eval-core/src/interfaces/mod.rs
// ============================================================================
// Module: Portfolio Eval Interfaces
// Description: Observer hooks for evaluation progress.
// Purpose: Keep progress reporting out of the evaluation pipeline.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The suite reports progress through [`SuiteObserver`] instead of writing to
//! the console. Hosts plug in console output; tests use [`NoopObserver`] or a
//! recording observer. Observers never influence results.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::query::Query;
use crate::core::result::EvaluationResult;

// ============================================================================
// SECTION: Suite Observer
// ============================================================================

/// Receives evaluation progress events.
pub trait SuiteObserver {
    /// Called after a result is recorded.
    fn result_recorded(&self, result: &EvaluationResult);

    /// Called when a query is skipped for an unrecognised test type.
    fn query_skipped(&self, query: &Query);
}

impl<T: SuiteObserver + ?Sized> SuiteObserver for &T {
    fn result_recorded(&self, result: &EvaluationResult) {
        (**self).result_recorded(result);
    }

    fn query_skipped(&self, query: &Query) {
        (**self).query_skipped(query);
    }
}

/// Observer that discards every event.
///
/// # Invariants
/// - Events are intentionally discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SuiteObserver for NoopObserver {
    fn result_recorded(&self, _result: &EvaluationResult) {}

    fn query_skipped(&self, _query: &Query) {}
}
