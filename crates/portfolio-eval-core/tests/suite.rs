//! Evaluation suite tests for Portfolio Eval core.
// crates/portfolio-eval-core/tests/suite.rs
// ============================================================================
// Module: Evaluation Suite Tests
// Description: Join, skip, fault, and aggregation behavior of the suite.
// Purpose: Ensure every recognised query yields exactly one result.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::cell::RefCell;

use portfolio_eval_core::BUILD_VALIDATION_ID;
use portfolio_eval_core::EvaluationResult;
use portfolio_eval_core::EvaluationSuite;
use portfolio_eval_core::LINT_CHECK_ID;
use portfolio_eval_core::MetricType;
use portfolio_eval_core::NoopObserver;
use portfolio_eval_core::Payload;
use portfolio_eval_core::Query;
use portfolio_eval_core::RecordStatus;
use portfolio_eval_core::ResponseRecord;
use portfolio_eval_core::SuiteObserver;
use portfolio_eval_core::TestType;
use portfolio_eval_core::render_report;
use portfolio_eval_core::runtime::progress_line;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

#[derive(Default)]
struct RecordingObserver {
    recorded: RefCell<Vec<String>>,
    skipped: RefCell<Vec<String>>,
}

impl SuiteObserver for RecordingObserver {
    fn result_recorded(&self, result: &EvaluationResult) {
        self.recorded.borrow_mut().push(result.query_id.clone());
    }

    fn query_skipped(&self, query: &Query) {
        self.skipped.borrow_mut().push(query.id.clone());
    }
}

fn response(query_id: &str, body: Value) -> ResponseRecord {
    ResponseRecord {
        query_id: query_id.to_string(),
        scenario: String::new(),
        test_type: None,
        response: body,
        timestamp: Some(1.0),
        error: None,
    }
}

fn catalog() -> Vec<Query> {
    vec![
        Query::new("perf-001", "Largest paint", TestType::Performance),
        Query::new("bundle-001", "Chunk split", TestType::BundleOptimization),
        Query::new("load-001", "Loader", TestType::LoadingExperience),
        Query::new("ux-001", "SEO titles", TestType::UxInteraction),
    ]
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn one_result_per_recognised_query_in_catalog_order() {
    let mut queries = catalog();
    let mut odd = Query::new("misc-001", "Unknown", TestType::Performance);
    odd.test_type = "accessibility".to_string();
    queries.insert(1, odd);

    let responses = vec![
        response("perf-001", json!({"metric": "LCP", "value_ms": 1850})),
        response("load-001", json!({"content_visible": true, "visibility_time_ms": 3100})),
    ];
    let observer = RecordingObserver::default();
    let mut suite = EvaluationSuite::new(&observer);
    let ids: Vec<String> =
        suite.run(&queries, &responses).iter().map(|r| r.query_id.clone()).collect();

    assert_eq!(ids, vec!["perf-001", "bundle-001", "load-001", "ux-001"]);
    assert_eq!(*observer.recorded.borrow(), ids);
    assert_eq!(*observer.skipped.borrow(), vec!["misc-001".to_string()]);
}

#[test]
fn missing_response_is_scored_as_rejection_not_failure() {
    let queries = vec![Query::new("ux-001", "SEO titles", TestType::UxInteraction)];
    let mut suite = EvaluationSuite::new(NoopObserver);
    let results = suite.run(&queries, &[]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, RecordStatus::Success);
    let result = results[0].result.as_ref().unwrap();
    assert_eq!(result["status"], json!("error"));
    assert_eq!(result["message"], json!("Unknown UX response format"));
}

#[test]
fn last_response_wins_for_duplicate_ids() {
    let queries = vec![Query::new("perf-001", "Paint", TestType::Performance)];
    let responses = vec![
        response("perf-001", json!({"metric": "LCP", "value_ms": 9000})),
        response("perf-001", json!({"metric": "LCP", "value_ms": 1000})),
    ];
    let mut suite = EvaluationSuite::new(NoopObserver);
    let results = suite.run(&queries, &responses);
    assert_eq!(results[0].result.as_ref().unwrap()["passed"], json!(true));
}

#[test]
fn evaluator_fault_is_recorded_and_batch_continues() {
    let queries = catalog();
    let responses = vec![response("perf-001", json!({"metric": "LCP", "value_ms": "slow"}))];
    let mut suite = EvaluationSuite::new(NoopObserver);
    suite.run(&queries, &responses);
    let report = suite.report();

    assert_eq!(report.total_tests, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(report.passed, 3);
    assert!(!report.is_clean());
    let faulted = &report.all_results[0];
    assert_eq!(faulted.status, RecordStatus::Error);
    assert!(faulted.result.is_none());
    assert!(faulted.error.as_deref().is_some_and(|e| e.contains("value_ms")));
}

#[test]
fn non_object_response_is_a_fault_and_batch_continues() {
    let responses = vec![
        response("perf-001", json!({"metric": "LCP", "value_ms": 1850})),
        response("bundle-001", json!([1, 2])),
        response("load-001", Value::Null),
        response("ux-001", json!({"section_tracking_works": true})),
    ];
    let observer = RecordingObserver::default();
    let mut suite = EvaluationSuite::new(&observer);
    suite.run(&catalog(), &responses);
    let report = suite.report();

    assert_eq!(report.total_tests, 4);
    assert_eq!(report.failed, 2);
    assert_eq!(observer.recorded.borrow().len(), 4);
    for faulted in &report.all_results[1 ..= 2] {
        assert_eq!(faulted.status, RecordStatus::Error);
        assert_eq!(faulted.error.as_deref(), Some("field `response` must be an object"));
    }
    assert_eq!(report.all_results[0].result.as_ref().unwrap()["passed"], json!(true));
    assert_eq!(report.all_results[3].status, RecordStatus::Success);
}

#[test]
fn system_records_are_reported_beside_the_results() {
    let mut build = ResponseRecord::system(
        BUILD_VALIDATION_ID,
        "Build Process Validation",
        Payload::new(),
    );
    build.response = json!({"status": "timeout", "message": "Build process exceeded 60 seconds"});
    let mut lint = ResponseRecord::system(LINT_CHECK_ID, "ESLint Strict Mode Check", Payload::new());
    lint.response = json!({"status": "success", "has_errors": false});
    let responses = vec![lint, build, response("perf-001", json!({"metric": "FID", "value_ms": 65}))];

    let mut suite = EvaluationSuite::new(NoopObserver);
    suite.run(&catalog(), &responses);
    let report = suite.report();

    assert_eq!(report.total_tests, 4);
    assert_eq!(report.failed, 0);
    let ids: Vec<&str> = report.system_checks.iter().map(|c| c.query_id.as_str()).collect();
    assert_eq!(ids, vec![BUILD_VALIDATION_ID, LINT_CHECK_ID]);
    assert_eq!(suite.system_checks(), report.system_checks.as_slice());
    assert!(!report.system_checks[0].passed);
    assert_eq!(report.system_checks[0].status, "timeout");
    assert!(report.system_checks[1].passed);
    assert!(!report.is_clean());

    let text = render_report(&report);
    assert!(text.contains("SYSTEM CHECKS"));
    assert!(text.contains(
        "  ✗ Build Process Validation: timeout - Build process exceeded 60 seconds"
    ));
    assert!(text.contains("  ✓ ESLint Strict Mode Check: success\n"));
    assert!(text.contains("Total: 4 | Passed: 4 | Failed: 0"));
}

#[test]
fn record_without_status_is_a_failed_system_check() {
    let mut build = ResponseRecord::system(BUILD_VALIDATION_ID, "Build", Payload::new());
    build.error = Some("payload encoding failed".to_string());
    let mut suite = EvaluationSuite::new(NoopObserver);
    suite.run(&[], &[build]);
    let checks = suite.system_checks();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].status, "error");
    assert_eq!(checks[0].message.as_deref(), Some("payload encoding failed"));
    assert!(!checks[0].passed);
}

#[test]
fn report_groups_by_metric_type_in_fixed_order() {
    let mut suite = EvaluationSuite::new(NoopObserver);
    let mut queries = catalog();
    queries.reverse();
    suite.run(&queries, &[]);
    let report = suite.report();
    let order: Vec<MetricType> = report.results_by_type.keys().copied().collect();
    assert_eq!(
        order,
        vec![MetricType::Performance, MetricType::Bundle, MetricType::Loading, MetricType::Ux]
    );
    assert_eq!(report.results_for(MetricType::Ux).len(), 1);
}

#[test]
fn evaluate_query_is_independent_of_accumulated_results() {
    let suite = EvaluationSuite::new(NoopObserver);
    let query = Query::new("perf-001", "Paint", TestType::Performance);
    let result = suite.evaluate_query(&query, &Payload::new()).unwrap();
    assert_eq!(result.metric_type, MetricType::Performance);
    assert!(suite.results().is_empty());
}

#[test]
fn rendering_marks_each_line_with_a_glyph() {
    let responses = vec![
        response("perf-001", json!({"metric": "LCP", "value_ms": 1850})),
        response("ux-001", json!({
            "helmet_provider_active": true,
            "dynamic_titles_updated": true,
            "title_updates_detected": 6
        })),
    ];
    let mut suite = EvaluationSuite::new(NoopObserver);
    suite.run(&catalog(), &responses);
    let text = render_report(&suite.report());

    assert!(text.contains("PORTFOLIO EVALUATION REPORT"));
    assert!(text.contains("PERFORMANCE METRICS"));
    assert!(text.contains("✓ LCP: 1850ms (Target: 2500ms)"));
    assert!(text.contains("✗ Chunk split: Chunks not properly verified"));
    assert!(text.contains("Dynamic SEO Titles: complete (6 updates)"));
    assert!(text.contains("Total: 4 | Passed: 4 | Failed: 0"));

    let line = progress_line(&suite.results()[0]);
    assert!(line.starts_with("✓ Performance  | Largest paint"));
}
