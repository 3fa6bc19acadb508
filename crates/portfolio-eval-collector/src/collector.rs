// crates/portfolio-eval-collector/src/collector.rs
// ============================================================================
// Module: Response Collector
// Description: Assembles the ordered response list for a catalog.
// Purpose: Run system checks, then collect one response per query.
// Dependencies: portfolio-eval-core, tracing, crate::{tools, simulate}
// ============================================================================

//! ## Overview
//! Collection emits the build check (`system-001`) and the lint check
//! (`system-002`) first, then one response per catalog query in catalog
//! order. A query whose collection fails is recorded with an `error` field
//! and collection continues; the output always has `queries.len() + 2`
//! records.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use portfolio_eval_core::BUILD_VALIDATION_ID;
use portfolio_eval_core::LINT_CHECK_ID;
use portfolio_eval_core::Payload;
use portfolio_eval_core::Query;
use portfolio_eval_core::ResponseRecord;
use portfolio_eval_core::unix_seconds_now;
use serde_json::Value;
use tracing::info;
use tracing::warn;

use crate::error::CollectError;
use crate::error::encode_payload;
use crate::process::ToolSpec;
use crate::simulate::Simulator;
use crate::tools::BuildMetrics;
use crate::tools::LintMetrics;
use crate::tools::build_metrics;
use crate::tools::lint_metrics;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Scenario label of the build check.
pub const BUILD_VALIDATION_SCENARIO: &str = "Build Process Validation";
/// Scenario label of the lint check.
pub const LINT_CHECK_SCENARIO: &str = "ESLint Strict Mode Check";
/// Default marker proving the bundler processed the module graph.
pub const DEFAULT_MODULES_MARKER: &str = "modules transformed";

// ============================================================================
// SECTION: Observer
// ============================================================================

/// Receives collection progress events.
pub trait CollectObserver {
    /// Called after a system check is recorded.
    fn system_collected(&self, record: &ResponseRecord);

    /// Called after a query response is recorded; `position` is 1-based.
    fn query_collected(&self, position: usize, total: usize, record: &ResponseRecord);
}

impl<T: CollectObserver + ?Sized> CollectObserver for &T {
    fn system_collected(&self, record: &ResponseRecord) {
        (**self).system_collected(record);
    }

    fn query_collected(&self, position: usize, total: usize, record: &ResponseRecord) {
        (**self).query_collected(position, total, record);
    }
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCollectObserver;

impl CollectObserver for NoopCollectObserver {
    fn system_collected(&self, _record: &ResponseRecord) {}

    fn query_collected(&self, _position: usize, _total: usize, _record: &ResponseRecord) {}
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Collector inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorSettings {
    /// Build output directory.
    pub build_dir: PathBuf,
    /// Site URL recorded on audits.
    pub base_url: String,
    /// Build tool.
    pub build: ToolSpec,
    /// Stdout marker for `modules_transformed`.
    pub modules_marker: String,
    /// Lint tool.
    pub lint: ToolSpec,
    /// Record build and lint as skipped instead of running them.
    pub skip_tools: bool,
}

impl CollectorSettings {
    /// Creates settings with the stock npm build and lint scripts.
    #[must_use]
    pub fn new(build_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            build_dir: build_dir.into(),
            base_url: base_url.into(),
            build: ToolSpec::new("npm", &["run", "build"], Duration::from_secs(60), 500),
            modules_marker: DEFAULT_MODULES_MARKER.to_string(),
            lint: ToolSpec::new("npm", &["run", "lint"], Duration::from_secs(30), 400),
            skip_tools: false,
        }
    }
}

// ============================================================================
// SECTION: Collector
// ============================================================================

/// Response collector.
pub struct Collector<O: CollectObserver> {
    /// Collection inputs.
    settings: CollectorSettings,
    /// Progress observer.
    observer: O,
}

impl<O: CollectObserver> Collector<O> {
    /// Creates a collector.
    #[must_use]
    pub const fn new(settings: CollectorSettings, observer: O) -> Self {
        Self {
            settings,
            observer,
        }
    }

    /// Collects the system checks followed by every query response.
    #[must_use]
    pub fn collect_all(&self, queries: &[Query]) -> Vec<ResponseRecord> {
        let mut records = self.collect_system();
        info!(queries = queries.len(), "collecting query responses");
        for (index, query) in queries.iter().enumerate() {
            let record = self.collect_query(query);
            self.observer.query_collected(index + 1, queries.len(), &record);
            records.push(record);
        }
        records
    }

    /// Runs the build and lint checks.
    #[must_use]
    pub fn collect_system(&self) -> Vec<ResponseRecord> {
        let (build, lint) = if self.settings.skip_tools {
            info!("skipping build and lint tools");
            (BuildMetrics::skipped(), LintMetrics::skipped())
        } else {
            info!(command = %self.settings.build.display(), "running build");
            let build = build_metrics(&self.settings.build, &self.settings.modules_marker);
            info!(command = %self.settings.lint.display(), "running lint");
            (build, lint_metrics(&self.settings.lint))
        };
        let records = [
            system_record(BUILD_VALIDATION_ID, BUILD_VALIDATION_SCENARIO, encode_payload(&build)),
            system_record(LINT_CHECK_ID, LINT_CHECK_SCENARIO, encode_payload(&lint)),
        ];
        for record in &records {
            self.observer.system_collected(record);
        }
        records.into()
    }

    /// Collects the response for one query.
    #[must_use]
    pub fn collect_query(&self, query: &Query) -> ResponseRecord {
        let simulator = Simulator::new(&self.settings.base_url, &self.settings.build_dir);
        match simulator.simulate(query) {
            Ok(response) => ResponseRecord {
                query_id: query.id.clone(),
                scenario: query.scenario.clone(),
                test_type: Some(query.test_type.clone()),
                response: Value::Object(response),
                timestamp: Some(unix_seconds_now()),
                error: None,
            },
            Err(err) => {
                warn!(query_id = %query.id, error = %err, "collection failed");
                failed_record(&query.id, &query.scenario, &err)
            }
        }
    }
}

/// Builds a system record, degrading encode failures to an error record.
fn system_record(
    query_id: &str,
    scenario: &str,
    payload: Result<Payload, CollectError>,
) -> ResponseRecord {
    match payload {
        Ok(payload) => ResponseRecord::system(query_id, scenario, payload),
        Err(err) => failed_record(query_id, scenario, &err),
    }
}

/// Record for a response that could not be collected.
fn failed_record(query_id: &str, scenario: &str, err: &CollectError) -> ResponseRecord {
    let mut record = ResponseRecord::system(query_id, scenario, Payload::new());
    record.error = Some(err.to_string());
    record
}
