//! Property tests for Portfolio Eval evaluators.
// crates/portfolio-eval-core/tests/proptest_evaluators.rs
// ============================================================================
// Module: Evaluator Property Tests
// Description: Randomized coverage for scoring bounds and payload robustness.
// Purpose: Ensure evaluators never panic and scores stay bounded.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

use portfolio_eval_core::Payload;
use portfolio_eval_core::TestType;
use portfolio_eval_core::runtime::EvaluatorInput;
use portfolio_eval_core::runtime::evaluate;
use portfolio_eval_core::runtime::performance::decayed_score;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        (-1.0e6f64 .. 1.0e6).prop_map(|n| json!(n)),
        "[a-z_]{0,12}".prop_map(Value::String),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    json_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0 .. 4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn known_key() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "metric",
        "value_ms",
        "value",
        "scores",
        "chunks_verified",
        "chunk_details",
        "bundle_metrics",
        "neural_loader_displayed",
        "progress_reached",
        "lenis_ready_ms",
        "content_visible",
        "cursor_stickiness_active",
        "cursor_fade_on_leave",
        "helmet_provider_active",
        "title_updates_detected",
        "section_tracking_works",
    ])
    .prop_map(str::to_string)
}

fn payload() -> impl Strategy<Value = Payload> {
    prop::collection::vec((known_key(), json_value()), 0 .. 6)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn decayed_score_stays_in_unit_interval(
        value in -1.0e7f64 .. 1.0e7,
        target in 0.0f64 .. 1.0e4,
        decay in 0.001f64 .. 1.0e4,
    ) {
        let score = decayed_score(value, target, decay);
        prop_assert!((0.0 ..= 1.0).contains(&score));
    }

    #[test]
    fn arbitrary_payloads_never_panic(body in payload(), index in 0usize .. 4) {
        let test_type = TestType::ALL[index];
        let input = EvaluatorInput::new("prop", "Property", &body);
        if let Ok(outcome) = evaluate(test_type, &input) {
            prop_assert_eq!(outcome.metric_type(), test_type.metric_type());
            prop_assert!(outcome.to_value().is_ok());
        }
    }

    #[test]
    fn vital_scores_are_bounded(metric in prop::sample::select(vec!["LCP", "FID", "CLS"]),
                                sample in 0.0f64 .. 1.0e5) {
        let body: Payload = [
            ("metric".to_string(), json!(metric)),
            ("value_ms".to_string(), json!(sample)),
            ("value".to_string(), json!(sample)),
        ]
        .into_iter()
        .collect();
        let outcome = evaluate(TestType::Performance, &EvaluatorInput::new("p", "s", &body)).unwrap();
        let value = outcome.to_value().unwrap();
        let score = value["score"].as_f64().unwrap();
        prop_assert!((0.0 ..= 1.0).contains(&score));
    }
}
