// crates/portfolio-eval-core/src/core/response.rs
// ============================================================================
// Module: Collected Responses
// Description: Response records produced by the collector and their lookup index.
// Purpose: Join collected payloads to catalog queries by identifier.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ResponseRecord`] carries the raw payload measured (or simulated) for one
//! query. Two system-level records, [`BUILD_VALIDATION_ID`] and
//! [`LINT_CHECK_ID`], have no catalog query and are reported separately.
//! Records are consumed by identifier through [`ResponseIndex`], never by
//! position. The `response` body is kept as raw JSON so one malformed record
//! is scored as a fault instead of failing the whole file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Identifier of the build validation system record.
pub const BUILD_VALIDATION_ID: &str = "system-001";
/// Identifier of the lint check system record.
pub const LINT_CHECK_ID: &str = "system-002";

/// Raw response payload keyed by field name.
pub type Payload = Map<String, Value>;

// ============================================================================
// SECTION: Response Record
// ============================================================================

/// One collected response.
///
/// # Invariants
/// - `error` is set only when collection for the query failed; `response` is
///   then an empty object.
/// - A missing `response` reads as an empty object; any other non-object value
///   is kept as written.
/// - Optional fields are omitted on write and restored as `None` on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Identifier of the query this response answers.
    pub query_id: String,
    /// Scenario label copied from the query.
    pub scenario: String,
    /// Raw test-type tag for query responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    /// Collected payload, normally an object.
    #[serde(default = "empty_response", skip_serializing_if = "is_empty_response")]
    pub response: Value,
    /// Collection time in unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    /// Collection failure text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseRecord {
    /// Creates a system-level record with no test type or timestamp.
    #[must_use]
    pub fn system(query_id: &str, scenario: &str, response: Payload) -> Self {
        Self {
            query_id: query_id.to_string(),
            scenario: scenario.to_string(),
            test_type: None,
            response: Value::Object(response),
            timestamp: None,
            error: None,
        }
    }

    /// Returns the payload when the response is an object.
    #[must_use]
    pub fn payload(&self) -> Option<&Payload> {
        self.response.as_object()
    }

    /// Returns true for the build and lint system records.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.query_id == BUILD_VALIDATION_ID || self.query_id == LINT_CHECK_ID
    }

    /// Returns the `status` field of the payload when it is a string.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.response.get("status").and_then(Value::as_str)
    }
}

/// Returns the body used when a record has no `response`.
fn empty_response() -> Value {
    Value::Object(Map::new())
}

/// Returns true for an empty object body.
fn is_empty_response(response: &Value) -> bool {
    response.as_object().is_some_and(Map::is_empty)
}

// ============================================================================
// SECTION: Response Index
// ============================================================================

/// Lookup of responses by query identifier.
///
/// # Invariants
/// - When identifiers repeat, the record appearing last wins.
#[derive(Debug, Default)]
pub struct ResponseIndex<'a> {
    /// Records keyed by query identifier.
    by_id: BTreeMap<&'a str, &'a ResponseRecord>,
}

impl<'a> ResponseIndex<'a> {
    /// Builds the index from an ordered response sequence.
    #[must_use]
    pub fn new(records: &'a [ResponseRecord]) -> Self {
        let mut by_id = BTreeMap::new();
        for record in records {
            by_id.insert(record.query_id.as_str(), record);
        }
        Self {
            by_id,
        }
    }

    /// Returns the record for a query identifier.
    #[must_use]
    pub fn get(&self, query_id: &str) -> Option<&'a ResponseRecord> {
        self.by_id.get(query_id).copied()
    }

    /// Returns the raw response body for a query identifier.
    #[must_use]
    pub fn response(&self, query_id: &str) -> Option<&'a Value> {
        self.get(query_id).map(|record| &record.response)
    }

    /// Returns the system-level records present in the index, build first.
    #[must_use]
    pub fn system_records(&self) -> Vec<&'a ResponseRecord> {
        self.by_id.values().copied().filter(|record| record.is_system()).collect()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(query_id: &str, marker: i64) -> ResponseRecord {
        let mut response = Payload::new();
        response.insert("marker".to_string(), json!(marker));
        ResponseRecord {
            query_id: query_id.to_string(),
            scenario: "scenario".to_string(),
            test_type: Some("performance".to_string()),
            response: Value::Object(response),
            timestamp: Some(1.5),
            error: None,
        }
    }

    #[test]
    fn duplicate_identifiers_resolve_to_last_record() {
        let records = vec![record("perf-001", 1), record("perf-002", 2), record("perf-001", 3)];
        let index = ResponseIndex::new(&records);
        let response = index.response("perf-001");
        assert_eq!(response.and_then(|body| body.get("marker")), Some(&json!(3)));
    }

    #[test]
    fn system_records_are_found_by_identifier() {
        let records = vec![
            record("perf-001", 1),
            ResponseRecord::system(LINT_CHECK_ID, "lint", Payload::new()),
            ResponseRecord::system(BUILD_VALIDATION_ID, "build", Payload::new()),
        ];
        let index = ResponseIndex::new(&records);
        let ids: Vec<&str> =
            index.system_records().iter().map(|record| record.query_id.as_str()).collect();
        assert_eq!(ids, vec![BUILD_VALIDATION_ID, LINT_CHECK_ID]);
        assert!(records[1].is_system());
        assert!(!records[0].is_system());
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let system = ResponseRecord::system(BUILD_VALIDATION_ID, "build", Payload::new());
        let value = serde_json::to_value(&system).ok();
        assert_eq!(value, Some(json!({"query_id": "system-001", "scenario": "build"})));
    }

    #[test]
    fn non_object_bodies_are_kept_as_written() {
        let body = r#"[{"query_id": "ux-001", "scenario": "Cursor", "response": [1, 2]},
                       {"query_id": "ux-002", "scenario": "Fade"}]"#;
        let records: Vec<ResponseRecord> = serde_json::from_str(body).unwrap_or_default();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].response, json!([1, 2]));
        assert!(records[0].payload().is_none());
        assert_eq!(records[1].payload(), Some(&Payload::new()));
    }
}
