// crates/portfolio-eval-collector/src/lib.rs
// ============================================================================
// Module: Portfolio Eval Collector Library
// Description: Metrics collection for the portfolio evaluation harness.
// Purpose: Produce response records for the build, lint, and catalog queries.
// Dependencies: portfolio-eval-core
// ============================================================================

//! ## Overview
//! The collector gathers system metrics (build and lint runs, bundle
//! inventory) and produces one response per catalog query. Per-query
//! payloads come from simulators that emit the same response schema a real
//! browser instrumentation would, so evaluators never see how a response was
//! produced. External tools run as bounded subprocesses; failures become
//! structured statuses, never errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bundle;
pub mod collector;
pub mod error;
pub mod process;
pub mod simulate;
pub mod tools;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bundle::BundleMetrics;
pub use bundle::collect_bundle_metrics;
pub use collector::CollectObserver;
pub use collector::Collector;
pub use collector::CollectorSettings;
pub use collector::NoopCollectObserver;
pub use error::CollectError;
pub use process::ToolRun;
pub use process::ToolSpec;
pub use simulate::Simulator;
pub use tools::ToolStatus;
