// crates/portfolio-eval-core/src/core/time.rs
// ============================================================================
// Module: Portfolio Eval Time Helpers
// Description: Wall-clock helpers for response and report timestamps.
// Purpose: Keep timestamp encoding consistent between collector and reports.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Responses carry unix seconds as a JSON number. Reports carry an RFC 3339
//! string so persisted reports never depend on a numeric time encoding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Returns the current time as fractional unix seconds.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "Sub-microsecond precision is not required.")]
pub fn unix_seconds_now() -> f64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    nanos as f64 / 1_000_000_000.0
}

/// Returns the current UTC time formatted as RFC 3339.
///
/// Falls back to the unix timestamp when formatting fails.
#[must_use]
pub fn rfc3339_now() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339).unwrap_or_else(|_| now.unix_timestamp().to_string())
}
