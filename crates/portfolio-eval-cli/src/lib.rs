// crates/portfolio-eval-cli/src/lib.rs
// ============================================================================
// Module: Portfolio Eval CLI Library
// Description: Console reporting and pipeline steps behind the binary.
// Purpose: Keep command behavior testable without spawning the binary.
// Dependencies: portfolio-eval-{core, collector, config}
// ============================================================================

//! ## Overview
//! The binary parses arguments and installs logging; everything it runs is
//! here so integration tests can drive the same code paths.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod console;
pub mod pipeline;
