// crates/portfolio-eval-config/src/lib.rs
// ============================================================================
// Module: Portfolio Eval Config Library
// Description: Configuration model and validation for the evaluation harness.
// Purpose: Single source of truth for portfolio-eval.toml semantics.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! `portfolio-eval-config` defines where the harness reads and writes its
//! documents, which site it audits, and how the build and lint tools are
//! invoked. Every section is optional; validation fails closed on values
//! outside their limits.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
