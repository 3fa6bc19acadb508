// crates/portfolio-eval-cli/src/pipeline.rs
// ============================================================================
// Module: Pipeline Steps
// Description: Collect and evaluate steps shared by the CLI commands.
// Purpose: Wire configuration, storage, collector, and suite together.
// Dependencies: portfolio-eval-{core, collector, config}, tracing
// ============================================================================

//! ## Overview
//! `collect` reads the catalog and writes responses; `evaluate` reads both
//! and writes the report. A missing catalog or responses file aborts the
//! step before anything is written.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use portfolio_eval_collector::CollectObserver;
use portfolio_eval_collector::Collector;
use portfolio_eval_collector::CollectorSettings;
use portfolio_eval_collector::ToolSpec;
use portfolio_eval_config::PortfolioEvalConfig;
use portfolio_eval_core::EvalError;
use portfolio_eval_core::EvaluationSuite;
use portfolio_eval_core::Report;
use portfolio_eval_core::ResponseRecord;
use portfolio_eval_core::SuiteObserver;
use portfolio_eval_core::storage::load_catalog;
use portfolio_eval_core::storage::read_responses;
use portfolio_eval_core::storage::write_report;
use portfolio_eval_core::storage::write_responses;
use tracing::info;

// ============================================================================
// SECTION: Paths
// ============================================================================

/// Resolved document locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    /// Query catalog.
    pub catalog: PathBuf,
    /// Collected responses.
    pub responses: PathBuf,
    /// Report output.
    pub report: PathBuf,
    /// Build output directory.
    pub build_dir: PathBuf,
}

impl RunPaths {
    /// Takes every path from configuration.
    #[must_use]
    pub fn from_config(config: &PortfolioEvalConfig) -> Self {
        Self {
            catalog: config.paths.catalog.clone(),
            responses: config.paths.responses.clone(),
            report: config.paths.report.clone(),
            build_dir: config.paths.build_dir.clone(),
        }
    }

    /// Replaces configured paths with any provided overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: PathOverrides) -> Self {
        if let Some(catalog) = overrides.catalog {
            self.catalog = catalog;
        }
        if let Some(responses) = overrides.responses {
            self.responses = responses;
        }
        if let Some(report) = overrides.report {
            self.report = report;
        }
        if let Some(build_dir) = overrides.build_dir {
            self.build_dir = build_dir;
        }
        self
    }
}

/// Command-line path overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOverrides {
    /// Catalog override.
    pub catalog: Option<PathBuf>,
    /// Responses override.
    pub responses: Option<PathBuf>,
    /// Report override.
    pub report: Option<PathBuf>,
    /// Build directory override.
    pub build_dir: Option<PathBuf>,
}

// ============================================================================
// SECTION: Collector Settings
// ============================================================================

/// Builds collector settings from configuration.
#[must_use]
pub fn collector_settings(
    config: &PortfolioEvalConfig,
    build_dir: &Path,
    skip_tools: bool,
) -> CollectorSettings {
    CollectorSettings {
        build_dir: build_dir.to_path_buf(),
        base_url: config.site.base_url.clone(),
        build: ToolSpec {
            program: config.build.program.clone(),
            args: config.build.args.clone(),
            timeout: config.build.timeout(),
            output_tail_chars: config.build.output_tail_chars,
        },
        modules_marker: config.build.modules_marker.clone(),
        lint: ToolSpec {
            program: config.lint.program.clone(),
            args: config.lint.args.clone(),
            timeout: config.lint.timeout(),
            output_tail_chars: config.lint.output_tail_chars,
        },
        skip_tools,
    }
}

// ============================================================================
// SECTION: Steps
// ============================================================================

/// Collects responses for the catalog and writes them.
///
/// # Errors
///
/// Returns [`EvalError`] when the catalog is missing or invalid, or the
/// responses cannot be written.
pub fn collect<O: CollectObserver>(
    settings: CollectorSettings,
    paths: &RunPaths,
    observer: O,
) -> Result<Vec<ResponseRecord>, EvalError> {
    let queries = load_catalog(&paths.catalog)?;
    info!(catalog = %paths.catalog.display(), queries = queries.len(), "loaded catalog");
    let collector = Collector::new(settings, observer);
    let records = collector.collect_all(&queries);
    write_responses(&paths.responses, &records)?;
    info!(responses = %paths.responses.display(), records = records.len(), "wrote responses");
    Ok(records)
}

/// Evaluates collected responses and writes the report.
///
/// # Errors
///
/// Returns [`EvalError`] when an input is missing or invalid, or the report
/// cannot be written.
pub fn evaluate<O: SuiteObserver>(paths: &RunPaths, observer: O) -> Result<Report, EvalError> {
    let queries = load_catalog(&paths.catalog)?;
    let responses = read_responses(&paths.responses)?;
    info!(queries = queries.len(), responses = responses.len(), "evaluating");
    let mut suite = EvaluationSuite::new(observer);
    suite.run(&queries, &responses);
    let report = suite.report();
    write_report(&paths.report, &report)?;
    info!(report = %paths.report.display(), failed = report.failed, "wrote report");
    Ok(report)
}
