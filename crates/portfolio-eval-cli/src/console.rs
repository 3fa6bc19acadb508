// crates/portfolio-eval-cli/src/console.rs
// ============================================================================
// Module: Console Observer
// Description: Glyph-marked progress lines for collection and evaluation.
// Purpose: Render observer events for people watching a run.
// Dependencies: portfolio-eval-core, portfolio-eval-collector
// ============================================================================

//! ## Overview
//! Console output is a side channel. Write failures are ignored so a closed
//! pipe never changes the outcome of a run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::io::Write;

use portfolio_eval_collector::CollectObserver;
use portfolio_eval_core::EvaluationResult;
use portfolio_eval_core::Query;
use portfolio_eval_core::ResponseRecord;
use portfolio_eval_core::SuiteObserver;
use portfolio_eval_core::runtime::progress_line;
use portfolio_eval_core::runtime::render::glyph;

// ============================================================================
// SECTION: Observer
// ============================================================================

/// Writes progress lines to a stream.
#[derive(Debug)]
pub struct ConsoleObserver<W: Write> {
    /// Destination stream.
    out: RefCell<W>,
}

impl<W: Write> ConsoleObserver<W> {
    /// Creates an observer writing to `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    /// Consumes the observer, returning the stream.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    /// Writes one line, ignoring stream errors.
    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.try_borrow_mut() {
            let _ = writeln!(out, "{text}");
        }
    }
}

impl<W: Write> SuiteObserver for ConsoleObserver<W> {
    fn result_recorded(&self, result: &EvaluationResult) {
        self.line(&progress_line(result));
    }

    fn query_skipped(&self, query: &Query) {
        self.line(&format!("- {}: unsupported test type '{}'", query.id, query.test_type));
    }
}

impl<W: Write> CollectObserver for ConsoleObserver<W> {
    fn system_collected(&self, record: &ResponseRecord) {
        let status = record.status().unwrap_or("error");
        let ok = record.error.is_none() && matches!(status, "success" | "skipped");
        self.line(&format!("{} {}: {status}", glyph(ok), record.scenario));
    }

    fn query_collected(&self, position: usize, total: usize, record: &ResponseRecord) {
        match &record.error {
            None => self.line(&format!("  {} [{position}/{total}] {}", glyph(true), record.scenario)),
            Some(error) => self.line(&format!(
                "  {} [{position}/{total}] {} - Error: {error}",
                glyph(false),
                record.scenario
            )),
        }
    }
}
