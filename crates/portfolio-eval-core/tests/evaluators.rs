//! Evaluator scoring tests for Portfolio Eval core.
// crates/portfolio-eval-core/tests/evaluators.rs
// ============================================================================
// Module: Evaluator Scoring Tests
// Description: Threshold and shape-selection coverage for every evaluator.
// Purpose: Pin down the documented scoring rules with concrete payloads.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

use portfolio_eval_core::Payload;
use portfolio_eval_core::TestType;
use portfolio_eval_core::Verdict;
use portfolio_eval_core::runtime::BundleScore;
use portfolio_eval_core::runtime::EvaluatorFault;
use portfolio_eval_core::runtime::EvaluatorInput;
use portfolio_eval_core::runtime::LoadingScore;
use portfolio_eval_core::runtime::Outcome;
use portfolio_eval_core::runtime::PerformanceScore;
use portfolio_eval_core::runtime::UxScore;
use portfolio_eval_core::runtime::bundle::OptimizationQuality;
use portfolio_eval_core::runtime::bundle::evaluate_bundle;
use portfolio_eval_core::runtime::evaluate;
use portfolio_eval_core::runtime::loading::InitializationQuality;
use portfolio_eval_core::runtime::loading::LoaderQuality;
use portfolio_eval_core::runtime::loading::evaluate_loading;
use portfolio_eval_core::runtime::performance::evaluate_performance;
use portfolio_eval_core::runtime::ux::BoundaryUx;
use portfolio_eval_core::runtime::ux::evaluate_ux;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be an object: {other}"),
    }
}

fn approx(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

fn performance(body: Value) -> Verdict<PerformanceScore> {
    let body = payload(body);
    evaluate_performance(&EvaluatorInput::new("perf-001", "Hero render", &body)).unwrap()
}

fn bundle(body: Value) -> Verdict<BundleScore> {
    let body = payload(body);
    evaluate_bundle(&EvaluatorInput::new("bundle-001", "Chunk split", &body)).unwrap()
}

fn loading(body: Value) -> Verdict<LoadingScore> {
    let body = payload(body);
    evaluate_loading(&EvaluatorInput::new("load-001", "Loader", &body)).unwrap()
}

fn ux(body: Value) -> Verdict<UxScore> {
    let body = payload(body);
    evaluate_ux(&EvaluatorInput::new("ux-001", "Cursor", &body)).unwrap()
}

fn split_bundle(main_kb: f64, three_kb: f64) -> Value {
    json!({
        "chunks_verified": true,
        "chunk_details": {
            "index-abc123.js": {"size_kb": main_kb, "size_bytes": 1},
            "three-core-def456.js": {"size_kb": three_kb, "size_bytes": 1},
            "r3f-vendor-1.js": {"size_kb": 90.0, "size_bytes": 1},
        },
        "bundle_metrics": {
            "optimization_status": {
                "properly_split": true,
                "has_three_core_chunk": true,
                "has_r3f_vendor_chunk": true,
                "has_motion_vendor_chunk": true,
                "has_scroll_vendor_chunk": true,
            }
        }
    })
}

// ============================================================================
// SECTION: Performance
// ============================================================================

#[test]
fn lcp_within_target_scores_full() {
    let Verdict::Scored(PerformanceScore::Latency(score)) =
        performance(json!({"metric": "LCP", "value_ms": 1850}))
    else {
        panic!("expected latency score");
    };
    assert!(score.passed);
    approx(score.score, 1.0);
    assert_eq!(score.target_ms, 2500);
}

#[test]
fn integer_samples_stay_integers_in_verdicts() {
    let verdict = performance(json!({"metric": "LCP", "value_ms": 1850}));
    let encoded = serde_json::to_value(verdict.scored()).unwrap();
    assert_eq!(encoded["value_ms"], json!(1850));
    assert!(encoded["value_ms"].is_u64());
    assert!(encoded["target_ms"].is_u64());

    let Verdict::Scored(UxScore::SectionTracking(tracking)) = ux(json!({
        "section_tracking_works": true,
        "scroll_positions_tracked": 7,
        "active_section_updates": 6,
    })) else {
        panic!("expected tracking score");
    };
    let encoded = serde_json::to_value(&tracking).unwrap();
    assert_eq!(encoded["positions_tracked"], json!(7));
    assert!(encoded["section_updates"].is_u64());

    let Verdict::Scored(LoadingScore::Progress(partial)) =
        loading(json!({"progress_reached": 99.5}))
    else {
        panic!("expected progress score");
    };
    assert_eq!(serde_json::to_value(&partial).unwrap()["progress_reached"], json!(99.5));
}

#[test]
fn lcp_over_target_decays_linearly() {
    let Verdict::Scored(PerformanceScore::Latency(score)) =
        performance(json!({"metric": "LCP", "value_ms": 3000}))
    else {
        panic!("expected latency score");
    };
    assert!(!score.passed);
    approx(score.score, 0.9);
}

#[test]
fn fid_uses_its_own_target() {
    let Verdict::Scored(PerformanceScore::Latency(score)) =
        performance(json!({"metric": "FID", "value_ms": 150}))
    else {
        panic!("expected latency score");
    };
    assert!(!score.passed);
    approx(score.score, 0.75);
}

#[test]
fn cls_passes_and_bottoms_out_at_zero() {
    let Verdict::Scored(PerformanceScore::LayoutShift(ok)) =
        performance(json!({"metric": "CLS", "value": 0.08}))
    else {
        panic!("expected layout shift score");
    };
    assert!(ok.passed);

    let Verdict::Scored(PerformanceScore::LayoutShift(bad)) =
        performance(json!({"metric": "CLS", "value": 0.3}))
    else {
        panic!("expected layout shift score");
    };
    assert!(!bad.passed);
    approx(bad.score, 0.0);
}

#[test]
fn lighthouse_average_uses_unrounded_mean() {
    let verdict = performance(json!({
        "scores": {"performance": 94, "accessibility": 96, "best-practices": 95, "seo": 98}
    }));
    let Verdict::Scored(PerformanceScore::Lighthouse(audit)) = verdict else {
        panic!("expected lighthouse score");
    };
    assert!(audit.all_passed);
    approx(audit.average_score, 95.75);
    assert!(audit.meets_target_95);
}

#[test]
fn lighthouse_category_below_94_fails_all_passed() {
    let verdict = performance(json!({
        "scores": {"performance": 88, "accessibility": 96, "best-practices": 95, "seo": 98}
    }));
    let Verdict::Scored(PerformanceScore::Lighthouse(audit)) = verdict else {
        panic!("expected lighthouse score");
    };
    assert!(!audit.all_passed);
    assert!(!audit.meets_target_95);
}

#[test]
fn unknown_metric_label_falls_through_to_audit_branch() {
    let verdict = performance(json!({"metric": "TTFB", "value_ms": 10}));
    let Verdict::Rejected(rejection) = verdict else {
        panic!("expected rejection");
    };
    assert_eq!(rejection.message, "No metrics found in response");
}

#[test]
fn empty_scores_are_rejected() {
    let verdict = performance(json!({"scores": {}}));
    assert!(verdict.is_rejected());
    assert!(verdict.scored().is_none());
}

#[test]
fn non_numeric_sample_is_a_fault() {
    let body = payload(json!({"metric": "LCP", "value_ms": "fast"}));
    let result = evaluate_performance(&EvaluatorInput::new("perf-002", "Hero", &body));
    assert!(matches!(result, Err(EvaluatorFault::WrongType { .. })));
}

// ============================================================================
// SECTION: Bundle
// ============================================================================

#[test]
fn unverified_chunks_are_rejected_regardless_of_other_fields() {
    let mut body = split_bundle(10.0, 100.0);
    body["chunks_verified"] = json!(false);
    let Verdict::Rejected(rejection) = bundle(body) else {
        panic!("expected rejection");
    };
    assert_eq!(rejection.message, "Chunks not properly verified");
    assert_eq!(rejection.scenario.as_deref(), Some("Chunk split"));
}

#[test]
fn fully_split_bundle_within_limits_is_excellent() {
    let Verdict::Scored(score) = bundle(split_bundle(40.0, 650.0)) else {
        panic!("expected bundle score");
    };
    approx(score.overall_score, 1.0);
    assert_eq!(score.optimization_quality, OptimizationQuality::Excellent);
    approx(score.main_chunk_size_kb, 40.0);
    approx(score.three_core_size_kb, 650.0);
}

#[test]
fn oversized_main_chunk_lowers_score_but_not_label() {
    // The label only looks at chunk structure; sizes affect the score alone.
    let Verdict::Scored(score) = bundle(split_bundle(80.0, 650.0)) else {
        panic!("expected bundle score");
    };
    assert!(!score.main_size_ok);
    approx(score.overall_score, 0.5);
    assert_eq!(score.optimization_quality, OptimizationQuality::Excellent);
}

#[test]
fn missing_vendor_flag_needs_improvement() {
    let mut body = split_bundle(40.0, 650.0);
    body["bundle_metrics"]["optimization_status"]["has_scroll_vendor_chunk"] = json!(false);
    let Verdict::Scored(score) = bundle(body) else {
        panic!("expected bundle score");
    };
    assert!(!score.has_all_required_chunks);
    assert_eq!(score.optimization_quality, OptimizationQuality::NeedsImprovement);
}

#[test]
fn chunk_without_size_is_a_fault() {
    let body = payload(json!({
        "chunks_verified": true,
        "chunk_details": {"index-1.js": {"size_bytes": 10}}
    }));
    let result = evaluate_bundle(&EvaluatorInput::new("bundle-002", "Split", &body));
    assert!(matches!(result, Err(EvaluatorFault::ChunkSize { .. })));
}

// ============================================================================
// SECTION: Loading
// ============================================================================

#[test]
fn fast_loader_is_good() {
    let Verdict::Scored(LoadingScore::Loader(score)) =
        loading(json!({"neural_loader_displayed": true, "display_time_ms": 120}))
    else {
        panic!("expected loader score");
    };
    assert!(score.loader_working);
    assert_eq!(score.ux_quality, LoaderQuality::Good);
}

#[test]
fn progress_must_reach_exactly_one_hundred() {
    let Verdict::Scored(LoadingScore::Progress(done)) =
        loading(json!({"progress_reached": 100, "load_time_ms": 2800}))
    else {
        panic!("expected progress score");
    };
    assert!(done.progress_complete);
    assert!(done.use_progress_works);

    let Verdict::Scored(LoadingScore::Progress(partial)) =
        loading(json!({"progress_reached": 99.5}))
    else {
        panic!("expected progress score");
    };
    assert!(!partial.progress_complete);
}

#[test]
fn lenis_quality_requires_target_and_fouc_prevention() {
    let Verdict::Scored(LoadingScore::Lenis(fast)) =
        loading(json!({"lenis_ready_ms": 145, "fouc_prevented": true}))
    else {
        panic!("expected lenis score");
    };
    assert_eq!(fast.initialization_quality, InitializationQuality::Excellent);
    approx(fast.score, 1.0);
    assert_eq!(fast.target_ms, 200);

    let Verdict::Scored(LoadingScore::Lenis(slow)) =
        loading(json!({"lenis_ready_ms": 250, "fouc_prevented": true}))
    else {
        panic!("expected lenis score");
    };
    assert!(!slow.meets_target);
    approx(slow.score, 0.8);
}

#[test]
fn unknown_loading_shape_is_rejected() {
    let Verdict::Rejected(rejection) = loading(json!({"unrelated": 1})) else {
        panic!("expected rejection");
    };
    assert_eq!(rejection.message, "Unknown loading response format");
}

// ============================================================================
// SECTION: UX
// ============================================================================

fn seo_titles(count: u32) -> Value {
    json!({
        "helmet_provider_active": true,
        "dynamic_titles_updated": true,
        "title_updates_detected": count,
    })
}

#[test]
fn seo_titles_require_exact_update_count() {
    let Verdict::Scored(UxScore::SeoTitles(full)) = ux(seo_titles(6)) else {
        panic!("expected seo score");
    };
    approx(full.score, 1.0);

    let Verdict::Scored(UxScore::SeoTitles(short)) = ux(seo_titles(5)) else {
        panic!("expected seo score");
    };
    approx(short.score, 0.7);
}

#[test]
fn boundary_fade_defaults_opacity_to_one() {
    let Verdict::Scored(UxScore::BoundaryFade(score)) =
        ux(json!({"cursor_fade_on_leave": true, "fade_works_correctly": true}))
    else {
        panic!("expected fade score");
    };
    assert_eq!(score.final_opacity.as_f64(), Some(1.0));
    assert_eq!(score.boundary_ux, BoundaryUx::Basic);
}

#[test]
fn unknown_ux_shape_is_rejected() {
    let Verdict::Rejected(rejection) = ux(json!({})) else {
        panic!("expected rejection");
    };
    assert_eq!(rejection.message, "Unknown UX response format");
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

#[test]
fn registry_routes_each_test_type_to_its_metric_type() {
    let body = Payload::new();
    let input = EvaluatorInput::new("q", "s", &body);
    for test_type in TestType::ALL {
        let outcome = evaluate(test_type, &input).unwrap();
        assert_eq!(outcome.metric_type(), test_type.metric_type());
        assert!(outcome.is_rejected(), "{test_type:?} should reject an empty payload");
    }
}

#[test]
fn rejection_encodes_with_error_status() {
    let body = Payload::new();
    let outcome = evaluate(TestType::UxInteraction, &EvaluatorInput::new("ux-9", "s", &body)).unwrap();
    assert!(matches!(outcome, Outcome::Ux(_)));
    let value = outcome.to_value().unwrap();
    assert_eq!(value["status"], json!("error"));
    assert_eq!(value["query_id"], json!("ux-9"));
}
