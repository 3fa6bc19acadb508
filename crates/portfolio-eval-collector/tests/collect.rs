//! Response collection tests for Portfolio Eval collector.
// crates/portfolio-eval-collector/tests/collect.rs
// ============================================================================
// Module: Collection Tests
// Description: Bundle inventory, response assembly, and evaluator hand-off.
// Purpose: Ensure collected responses match the schema evaluators consume.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use portfolio_eval_collector::BundleMetrics;
use portfolio_eval_collector::CollectObserver;
use portfolio_eval_collector::Collector;
use portfolio_eval_collector::CollectorSettings;
use portfolio_eval_collector::NoopCollectObserver;
use portfolio_eval_collector::collect_bundle_metrics;
use portfolio_eval_core::EvaluationSuite;
use portfolio_eval_core::NoopObserver;
use portfolio_eval_core::Query;
use portfolio_eval_core::ResponseRecord;
use portfolio_eval_core::TestType;
use serde_json::json;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn write_chunk(dir: &Path, name: &str, bytes: usize) -> TestResult {
    fs::write(dir.join(name), vec![b'x'; bytes]).map_err(|err| err.to_string())
}

fn split_build(root: &Path) -> TestResult {
    let assets = root.join("assets");
    fs::create_dir_all(&assets).map_err(|err| err.to_string())?;
    write_chunk(&assets, "index-a1.js", 20 * 1024)?;
    write_chunk(&assets, "three-core-b2.js", 600 * 1024)?;
    write_chunk(&assets, "r3f-vendor-c3.js", 100 * 1024)?;
    write_chunk(&assets, "motion-vendor-d4.js", 50 * 1024)?;
    write_chunk(&assets, "scroll-vendor-e5.js", 10 * 1024)?;
    write_chunk(&assets, "index-a1.css", 4 * 1024)
}

fn catalog() -> Vec<Query> {
    vec![
        Query::new("perf-001", "Desktop audit", TestType::Performance),
        Query::new("perf-003", "Largest paint", TestType::Performance)
            .with_param("metric", json!("LCP")),
        Query::new("bundle-001", "Chunk split", TestType::BundleOptimization),
        Query::new("bundle-002", "Lazy components", TestType::BundleOptimization)
            .with_param("lazy_components", json!(["ProjectsScene"])),
        Query::new("load-003", "Lenis init", TestType::LoadingExperience)
            .with_param("probe", json!("lenis")),
        Query::new("ux-002", "Boundary fade", TestType::UxInteraction)
            .with_param("probe", json!("fade")),
    ]
}

fn skipping(build_dir: &Path) -> CollectorSettings {
    let mut settings = CollectorSettings::new(build_dir, "http://localhost:5173/");
    settings.skip_tools = true;
    settings
}

#[derive(Default)]
struct CountingObserver {
    system: RefCell<Vec<String>>,
    queries: RefCell<Vec<(usize, usize)>>,
}

impl CollectObserver for CountingObserver {
    fn system_collected(&self, record: &ResponseRecord) {
        self.system.borrow_mut().push(record.query_id.clone());
    }

    fn query_collected(&self, position: usize, total: usize, _record: &ResponseRecord) {
        self.queries.borrow_mut().push((position, total));
    }
}

// ============================================================================
// SECTION: Bundle Inventory
// ============================================================================

#[test]
fn inventory_counts_only_script_chunks() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    split_build(dir.path())?;
    let metrics = collect_bundle_metrics(dir.path()).map_err(|err| err.to_string())?;
    let inventory = metrics.inventory().ok_or("expected inventory")?;
    assert_eq!(inventory.total_chunks, 5);
    assert!((inventory.total_size_kb - 780.0).abs() < 1e-9);
    assert_eq!(inventory.chunks["index-a1.js"].size_bytes, 20 * 1024);
    assert!(inventory.optimization_status.properly_split);
    Ok(())
}

#[test]
fn missing_assets_directory_yields_empty_inventory() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let metrics = collect_bundle_metrics(dir.path()).map_err(|err| err.to_string())?;
    let inventory = metrics.inventory().ok_or("expected inventory")?;
    assert_eq!(inventory.total_chunks, 0);
    assert!(!metrics.properly_split());
    Ok(())
}

#[test]
fn missing_build_directory_is_an_error_status() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let metrics = collect_bundle_metrics(&dir.path().join("dist")).map_err(|err| err.to_string())?;
    assert!(matches!(metrics, BundleMetrics::Error { .. }));
    let encoded = serde_json::to_value(&metrics).map_err(|err| err.to_string())?;
    assert_eq!(encoded["status"], json!("error"));
    Ok(())
}

// ============================================================================
// SECTION: Response Assembly
// ============================================================================

#[test]
fn system_records_precede_queries_in_catalog_order() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let observer = CountingObserver::default();
    let collector = Collector::new(skipping(dir.path()), &observer);
    let queries = catalog();
    let records = collector.collect_all(&queries);

    assert_eq!(records.len(), queries.len() + 2);
    assert_eq!(records[0].query_id, "system-001");
    assert_eq!(records[0].scenario, "Build Process Validation");
    assert_eq!(records[0].status(), Some("skipped"));
    assert_eq!(records[1].query_id, "system-002");
    assert!(records[0].timestamp.is_none());
    for (record, query) in records[2 ..].iter().zip(&queries) {
        assert_eq!(record.query_id, query.id);
        assert_eq!(record.test_type.as_deref(), Some(query.test_type.as_str()));
        assert!(record.timestamp.is_some());
        assert!(record.error.is_none());
    }
    assert_eq!(*observer.system.borrow(), vec!["system-001", "system-002"]);
    assert_eq!(observer.queries.borrow().last(), Some(&(6, 6)));
    Ok(())
}

#[test]
fn bundle_queries_read_the_build_output() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    split_build(dir.path())?;
    let collector = Collector::new(skipping(dir.path()), NoopCollectObserver);
    let queries = catalog();

    let split = collector.collect_query(&queries[2]);
    assert_eq!(split.response["chunks_verified"], json!(true));
    assert_eq!(split.response["bundle_metrics"]["status"], json!("success"));
    assert!(split.response["chunk_details"].get("three-core-b2.js").is_some());

    let lazy = collector.collect_query(&queries[3]);
    assert_eq!(lazy.response["lazy_components"], json!(["ProjectsScene"]));
    assert!(lazy.response.get("chunks_verified").is_none());
    Ok(())
}

#[test]
fn collected_responses_score_cleanly() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    split_build(dir.path())?;
    let collector = Collector::new(skipping(dir.path()), NoopCollectObserver);
    let queries = catalog();
    let records = collector.collect_all(&queries);

    let mut suite = EvaluationSuite::new(NoopObserver);
    let results = suite.run(&queries, &records);
    assert_eq!(results.len(), queries.len());
    let report = suite.report();
    assert_eq!(report.failed, 0);

    let lcp = report.all_results[1].result.as_ref().ok_or("missing lcp")?;
    assert_eq!(lcp["passed"], json!(true));
    let bundle = report.all_results[2].result.as_ref().ok_or("missing bundle")?;
    assert_eq!(bundle["optimization_quality"], json!("excellent"));
    assert_eq!(bundle["main_chunk_size_kb"], json!(20.0));
    let fade = report.all_results[5].result.as_ref().ok_or("missing fade")?;
    assert_eq!(fade["boundary_ux"], json!("polished"));
    Ok(())
}
