// crates/portfolio-eval-core/src/runtime/mod.rs
// ============================================================================
// Module: Portfolio Eval Runtime
// Description: Evaluators, dispatch, suite orchestration, and rendering.
// Purpose: Turn collected responses into scored, aggregated results.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Each evaluator is a pure function from a query identifier, scenario, and
//! payload to a verdict. The registry dispatches by test type, the suite
//! accumulates results, and rendering formats them for people.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod bundle;
pub mod loading;
pub mod payload;
pub mod performance;
pub mod registry;
pub mod render;
pub mod suite;
pub mod ux;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bundle::BundleScore;
pub use bundle::ChunkGroup;
pub use loading::LoadingScore;
pub use payload::EvaluatorFault;
pub use payload::EvaluatorInput;
pub use performance::PerformanceScore;
pub use performance::WebVital;
pub use registry::Outcome;
pub use registry::evaluate;
pub use render::progress_line;
pub use render::render_report;
pub use suite::EvaluationSuite;
pub use ux::UxScore;
