// crates/portfolio-eval-core/src/core/mod.rs
// ============================================================================
// Module: Portfolio Eval Core Types
// Description: Canonical query, response, result, and report structures.
// Purpose: Provide stable, serializable types shared by collector and suite.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! These types are the persisted contract between the collector, the
//! evaluation suite, and downstream gating. Every field written to disk is
//! read back unchanged.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod query;
pub mod report;
pub mod response;
pub mod result;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use query::MetricType;
pub use query::Query;
pub use query::TestType;
pub use report::Report;
pub use report::SystemCheck;
pub use response::BUILD_VALIDATION_ID;
pub use response::LINT_CHECK_ID;
pub use response::Payload;
pub use response::ResponseIndex;
pub use response::ResponseRecord;
pub use result::EvaluationResult;
pub use result::RecordStatus;
pub use result::Rejection;
pub use result::RejectionStatus;
pub use result::Verdict;
pub use time::rfc3339_now;
pub use time::unix_seconds_now;
