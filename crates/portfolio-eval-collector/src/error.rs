// crates/portfolio-eval-collector/src/error.rs
// ============================================================================
// Module: Collector Errors
// Description: Error type for metrics collection.
// Purpose: Report I/O, spawn, and encoding failures during collection.
// Dependencies: thiserror, serde_json
// ============================================================================

//! ## Overview
//! Collection errors are per-query: the collector records them on the
//! affected response and keeps going. Build and lint outcomes are not
//! errors; they are statuses inside the system payloads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use portfolio_eval_core::Payload;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Metrics collection errors.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Filesystem failure while inspecting build output.
    #[error("io error: {0}")]
    Io(String),
    /// External tool could not be started.
    #[error("failed to spawn {program}: {message}")]
    Spawn {
        /// Program name.
        program: String,
        /// OS error text.
        message: String,
    },
    /// Payload could not be encoded as a JSON object.
    #[error("payload encoding failed: {0}")]
    Encode(String),
}

// ============================================================================
// SECTION: Payload Encoding
// ============================================================================

/// Encodes a serializable value as a response payload object.
pub(crate) fn encode_payload<T: Serialize>(value: &T) -> Result<Payload, CollectError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CollectError::Encode("payload is not a JSON object".to_string())),
        Err(err) => Err(CollectError::Encode(err.to_string())),
    }
}
