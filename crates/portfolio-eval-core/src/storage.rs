// crates/portfolio-eval-core/src/storage.rs
// ============================================================================
// Module: Portfolio Eval Storage
// Description: JSON persistence for catalogs, responses, and reports.
// Purpose: Read and write the structured files exchanged between stages.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every file exchanged by the harness is a JSON document: the catalog is an
//! ordered array of queries, the responses file an ordered array of response
//! records, and the report a single object. Writes are pretty-printed with
//! stable field order and create missing parent directories. A missing
//! catalog or responses file is the only fatal input condition.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::query::Query;
use crate::core::report::Report;
use crate::core::response::ResponseRecord;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of any input document read from disk.
pub const MAX_INPUT_FILE_SIZE: u64 = 64 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Kind of input file a storage operation was reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Query catalog.
    Catalog,
    /// Collected responses.
    Responses,
    /// Persisted report.
    Report,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Catalog => "catalog",
            Self::Responses => "responses",
            Self::Report => "report",
        })
    }
}

/// Storage errors for harness documents.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A required input file does not exist.
    #[error("{kind} file not found: {}", path.display())]
    MissingInput {
        /// Which input was missing.
        kind: InputKind,
        /// Path that was checked.
        path: PathBuf,
    },
    /// I/O failure while reading or writing.
    #[error("io error: {0}")]
    Io(String),
    /// Document could not be decoded.
    #[error("parse error in {kind} file: {message}")]
    Parse {
        /// Which input failed to decode.
        kind: InputKind,
        /// Decoder message.
        message: String,
    },
    /// Document decoded but violates an input invariant.
    #[error("invalid {kind} file: {message}")]
    Invalid {
        /// Which input is invalid.
        kind: InputKind,
        /// Violation description.
        message: String,
    },
    /// Value could not be encoded.
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl EvalError {
    /// Returns true when the error aborts a run before any evaluation.
    #[must_use]
    pub const fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput { .. })
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Loads the ordered query catalog.
///
/// # Errors
///
/// Returns [`EvalError::MissingInput`] when the file is absent, and
/// [`EvalError::Invalid`] when two queries share an identifier.
pub fn load_catalog(path: &Path) -> Result<Vec<Query>, EvalError> {
    let queries: Vec<Query> = read_document(path, InputKind::Catalog)?;
    let mut seen = BTreeSet::new();
    for query in &queries {
        if !seen.insert(query.id.as_str()) {
            return Err(EvalError::Invalid {
                kind: InputKind::Catalog,
                message: format!("duplicate query id: {}", query.id),
            });
        }
    }
    Ok(queries)
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Reads collected responses in file order.
///
/// # Errors
///
/// Returns [`EvalError::MissingInput`] when the file is absent.
pub fn read_responses(path: &Path) -> Result<Vec<ResponseRecord>, EvalError> {
    read_document(path, InputKind::Responses)
}

/// Writes collected responses as pretty JSON.
///
/// # Errors
///
/// Returns [`EvalError`] when encoding or writing fails.
pub fn write_responses(path: &Path, responses: &[ResponseRecord]) -> Result<(), EvalError> {
    write_document(path, responses)
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Writes a report as pretty JSON.
///
/// # Errors
///
/// Returns [`EvalError`] when encoding or writing fails.
pub fn write_report(path: &Path, report: &Report) -> Result<(), EvalError> {
    write_document(path, report)
}

/// Reads a persisted report.
///
/// # Errors
///
/// Returns [`EvalError`] when the file is missing or malformed.
pub fn read_report(path: &Path) -> Result<Report, EvalError> {
    read_document(path, InputKind::Report)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads and decodes a bounded JSON document.
fn read_document<T: DeserializeOwned>(path: &Path, kind: InputKind) -> Result<T, EvalError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(EvalError::MissingInput {
                kind,
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(EvalError::Io(err.to_string())),
    };
    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(EvalError::Invalid {
            kind,
            message: "file exceeds size limit".to_string(),
        });
    }
    let bytes = fs::read(path).map_err(|err| EvalError::Io(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| EvalError::Parse {
        kind,
        message: err.to_string(),
    })
}

/// Encodes a value as pretty JSON and writes it, creating parent directories.
fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), EvalError> {
    let mut text =
        serde_json::to_string_pretty(value).map_err(|err| EvalError::Serialize(err.to_string()))?;
    text.push('\n');
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| EvalError::Io(err.to_string()))?;
    }
    fs::write(path, text).map_err(|err| EvalError::Io(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
