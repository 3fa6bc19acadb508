// crates/portfolio-eval-core/src/core/query.rs
// ============================================================================
// Module: Query Catalog Types
// Description: Evaluation queries and the closed set of test types.
// Purpose: Model catalog entries and map test types to report metric types.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Query`] names one scenario to evaluate. Its `test_type` tag is kept as
//! the raw catalog string so unrecognised tags survive loading; dispatch goes
//! through [`Query::kind`], which yields the closed [`TestType`] enumeration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Scenario label used when a catalog entry omits one.
pub const UNKNOWN_SCENARIO: &str = "Unknown Scenario";

/// Returns the default scenario label for serde.
fn default_scenario() -> String {
    UNKNOWN_SCENARIO.to_string()
}

// ============================================================================
// SECTION: Query
// ============================================================================

/// Evaluation query loaded from the catalog.
///
/// # Invariants
/// - `id` is unique within a catalog (enforced by [`crate::storage::load_catalog`]).
/// - Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Unique query identifier.
    pub id: String,
    /// Human-readable scenario name.
    #[serde(default = "default_scenario")]
    pub scenario: String,
    /// Raw test-type tag as written in the catalog.
    #[serde(default)]
    pub test_type: String,
    /// Free-form simulator parameters.
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl Query {
    /// Creates a query with empty parameters.
    #[must_use]
    pub fn new(id: impl Into<String>, scenario: impl Into<String>, test_type: TestType) -> Self {
        Self {
            id: id.into(),
            scenario: scenario.into(),
            test_type: test_type.as_str().to_string(),
            params: Map::new(),
        }
    }

    /// Adds a parameter, returning the updated query.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Returns the recognised test type, or `None` for unknown tags.
    #[must_use]
    pub fn kind(&self) -> Option<TestType> {
        TestType::from_tag(&self.test_type)
    }

    /// Returns a string parameter when present.
    #[must_use]
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}

// ============================================================================
// SECTION: Test Types
// ============================================================================

/// Closed set of test types with a registered evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    /// Lighthouse audits and Core Web Vitals.
    Performance,
    /// Bundle chunking and size budgets.
    BundleOptimization,
    /// Loader, asset progress, and smooth-scroll initialization.
    LoadingExperience,
    /// Cursor, title, and navigation interactions.
    UxInteraction,
}

impl TestType {
    /// All test types in catalog order.
    pub const ALL: [Self; 4] =
        [Self::Performance, Self::BundleOptimization, Self::LoadingExperience, Self::UxInteraction];

    /// Parses a catalog tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Returns the catalog tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::BundleOptimization => "bundle_optimization",
            Self::LoadingExperience => "loading_experience",
            Self::UxInteraction => "ux_interaction",
        }
    }

    /// Returns the report metric type for this test type.
    #[must_use]
    pub const fn metric_type(self) -> MetricType {
        match self {
            Self::Performance => MetricType::Performance,
            Self::BundleOptimization => MetricType::Bundle,
            Self::LoadingExperience => MetricType::Loading,
            Self::UxInteraction => MetricType::Ux,
        }
    }
}

/// Report grouping label for evaluation results.
///
/// # Invariants
/// - Ordering follows declaration order and fixes report section order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricType {
    /// Performance metrics.
    Performance,
    /// Bundle optimization metrics.
    Bundle,
    /// Loading experience metrics.
    Loading,
    /// UX interaction metrics.
    #[serde(rename = "UX")]
    Ux,
}

impl MetricType {
    /// Returns the stable label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Bundle => "Bundle",
            Self::Loading => "Loading",
            Self::Ux => "UX",
        }
    }

    /// Returns the section heading used when rendering reports.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Performance => "PERFORMANCE METRICS",
            Self::Bundle => "BUNDLE OPTIMIZATION",
            Self::Loading => "LOADING EXPERIENCE",
            Self::Ux => "UX INTERACTION QUALITY",
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
