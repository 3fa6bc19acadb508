// crates/portfolio-eval-core/src/runtime/payload.rs
// ============================================================================
// Module: Evaluator Payload Access
// Description: Typed field access over raw response payloads.
// Purpose: Apply collector defaults for missing keys and fault on bad types.
// Dependencies: crate::core::response, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Missing or `null` fields take the evaluator's default (numbers `0`, flags
//! `false`). A field present with the wrong JSON type is an
//! [`EvaluatorFault`]: the suite records it as a failed query rather than
//! guessing a value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Number;
use serde_json::Value;
use thiserror::Error;

use crate::core::response::Payload;

// ============================================================================
// SECTION: Evaluator Input
// ============================================================================

/// Arguments shared by every evaluator.
#[derive(Debug, Clone, Copy)]
pub struct EvaluatorInput<'a> {
    /// Query identifier.
    pub query_id: &'a str,
    /// Scenario label.
    pub scenario: &'a str,
    /// Raw response payload; empty when no response was collected.
    pub payload: &'a Payload,
}

impl<'a> EvaluatorInput<'a> {
    /// Creates evaluator input.
    #[must_use]
    pub const fn new(query_id: &'a str, scenario: &'a str, payload: &'a Payload) -> Self {
        Self {
            query_id,
            scenario,
            payload,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fault raised while scoring a well-shaped payload with malformed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluatorFault {
    /// A field holds a value of the wrong JSON type.
    #[error("field `{field}` must be {expected}")]
    WrongType {
        /// Offending field name.
        field: String,
        /// Expected JSON type.
        expected: &'static str,
    },
    /// A bundle chunk entry lacks a numeric size.
    #[error("chunk `{chunk}` has no numeric size_kb")]
    ChunkSize {
        /// Chunk file name.
        chunk: String,
    },
    /// The verdict could not be encoded for storage.
    #[error("verdict encoding failed: {0}")]
    Encode(String),
}

impl EvaluatorFault {
    /// Builds a wrong-type fault.
    fn wrong_type(field: &str, expected: &'static str) -> Self {
        Self::WrongType {
            field: field.to_string(),
            expected,
        }
    }
}

// ============================================================================
// SECTION: Field Access
// ============================================================================

/// Returns true when the key is present, regardless of its value.
pub(crate) fn has(payload: &Payload, field: &str) -> bool {
    payload.contains_key(field)
}

/// Reads an optional number.
pub(crate) fn number(payload: &Payload, field: &str) -> Result<Option<f64>, EvaluatorFault> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => {
            number.as_f64().map(Some).ok_or_else(|| EvaluatorFault::wrong_type(field, "a number"))
        }
        Some(_) => Err(EvaluatorFault::wrong_type(field, "a number")),
    }
}

/// Reads a sample, keeping its integer or float form for the verdict.
///
/// Returns the sample alongside its value for threshold checks.
pub(crate) fn sample_or(
    payload: &Payload,
    field: &str,
    default: u32,
) -> Result<(Number, f64), EvaluatorFault> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok((Number::from(default), f64::from(default))),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(|value| (number.clone(), value))
            .ok_or_else(|| EvaluatorFault::wrong_type(field, "a number")),
        Some(_) => Err(EvaluatorFault::wrong_type(field, "a number")),
    }
}

/// Reads a boolean flag, defaulting when absent.
pub(crate) fn flag_or(payload: &Payload, field: &str, default: bool) -> Result<bool, EvaluatorFault> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(EvaluatorFault::wrong_type(field, "a boolean")),
    }
}

/// Reads a nested object.
pub(crate) fn object<'a>(
    payload: &'a Payload,
    field: &str,
) -> Result<Option<&'a Payload>, EvaluatorFault> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(EvaluatorFault::wrong_type(field, "an object")),
    }
}

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => Payload::new(),
        }
    }

    #[test]
    fn absent_and_null_fields_take_defaults() {
        let data = payload(json!({"nothing": null}));
        assert_eq!(number(&data, "nothing"), Ok(None));
        assert_eq!(sample_or(&data, "missing", 7).map(|(_, value)| value), Ok(7.0));
        assert_eq!(flag_or(&data, "missing", false), Ok(false));
    }

    #[test]
    fn wrong_types_fault() {
        let data = payload(json!({"value_ms": "fast", "ready": 1}));
        assert!(matches!(number(&data, "value_ms"), Err(EvaluatorFault::WrongType { .. })));
        assert!(matches!(flag_or(&data, "ready", false), Err(EvaluatorFault::WrongType { .. })));
    }

    #[test]
    fn samples_keep_their_json_form() {
        let data = payload(json!({"count": 6, "ratio": 0.5, "label": "six"}));
        assert_eq!(sample_or(&data, "count", 0), Ok((Number::from(6), 6.0)));
        assert_eq!(json!(sample_or(&data, "count", 0).map(|(raw, _)| raw).ok()), json!(6));
        assert_eq!(sample_or(&data, "ratio", 0).map(|(_, value)| value), Ok(0.5));
        assert_eq!(sample_or(&data, "missing", 1), Ok((Number::from(1), 1.0)));
        assert!(matches!(sample_or(&data, "label", 0), Err(EvaluatorFault::WrongType { .. })));
    }

    #[test]
    fn rounding_keeps_two_places() {
        assert!((round2(123.456) - 123.46).abs() < 1e-9);
        assert!((round2(0.004) - 0.0).abs() < 1e-9);
    }
}
