// crates/portfolio-eval-core/src/runtime/performance.rs
// ============================================================================
// Module: Performance Evaluator
// Description: Scores Core Web Vitals samples and Lighthouse audits.
// Purpose: Compare performance measurements against fixed targets.
// Dependencies: crate::core::result, crate::runtime::payload, serde
// ============================================================================

//! ## Overview
//! A payload with a recognised `metric` (`LCP`, `FID`, `CLS`) is scored as a
//! web-vital sample; anything else with a non-empty `scores` mapping is scored
//! as a Lighthouse audit. Failed vitals earn a linearly decaying score clipped
//! to `[0, 1]`: `max(0, 1 - (value - target) / decay)`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Number;
use serde_json::Value;

use crate::core::result::Rejection;
use crate::core::result::Verdict;
use crate::runtime::payload::EvaluatorFault;
use crate::runtime::payload::EvaluatorInput;
use crate::runtime::payload::object;
use crate::runtime::payload::round2;
use crate::runtime::payload::sample_or;

// ============================================================================
// SECTION: Targets
// ============================================================================

/// Minimum score every Lighthouse category must reach.
pub const LIGHTHOUSE_CATEGORY_TARGET: f64 = 94.0;
/// Minimum mean Lighthouse score for `meets_target_95`.
pub const LIGHTHOUSE_AVERAGE_TARGET: f64 = 95.0;
/// Upper bound for a passing CLS sample.
const CLS_TARGET: f64 = 0.1;

/// Core Web Vitals with a fixed target and decay denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebVital {
    /// Largest Contentful Paint, milliseconds.
    Lcp,
    /// First Input Delay, milliseconds.
    Fid,
    /// Cumulative Layout Shift, unitless.
    Cls,
}

impl WebVital {
    /// Parses a metric label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "LCP" => Some(Self::Lcp),
            "FID" => Some(Self::Fid),
            "CLS" => Some(Self::Cls),
            _ => None,
        }
    }

    /// Returns the metric label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lcp => "LCP",
            Self::Fid => "FID",
            Self::Cls => "CLS",
        }
    }

    /// Millisecond target for latency vitals; `None` for the unitless CLS.
    #[must_use]
    pub const fn target_ms(self) -> Option<u32> {
        match self {
            Self::Lcp => Some(2500),
            Self::Fid => Some(100),
            Self::Cls => None,
        }
    }

    /// Upper bound for a passing sample.
    #[must_use]
    pub fn target(self) -> f64 {
        self.target_ms().map_or(CLS_TARGET, f64::from)
    }

    /// Overshoot at which the score reaches zero.
    #[must_use]
    pub const fn decay(self) -> f64 {
        match self {
            Self::Lcp => 5000.0,
            Self::Fid => 200.0,
            Self::Cls => 0.2,
        }
    }

    /// Payload field carrying the sample.
    const fn value_field(self) -> &'static str {
        match self {
            Self::Lcp | Self::Fid => "value_ms",
            Self::Cls => "value",
        }
    }
}

/// Scores a sample against a target with linear decay past the target.
#[must_use]
pub fn decayed_score(value: f64, target: f64, decay: f64) -> f64 {
    if value <= target { 1.0 } else { (1.0 - (value - target) / decay).max(0.0) }
}

// ============================================================================
// SECTION: Verdict Shapes
// ============================================================================

/// Scored latency vital (LCP or FID).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyVitalScore {
    /// Query identifier.
    pub query_id: String,
    /// Vital measured.
    pub metric_name: WebVital,
    /// Sample in milliseconds, as collected.
    pub value_ms: Number,
    /// Target in milliseconds.
    pub target_ms: u32,
    /// Sample within target.
    pub passed: bool,
    /// Score in `[0, 1]`.
    pub score: f64,
}

/// Scored layout-shift vital (CLS).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutShiftScore {
    /// Query identifier.
    pub query_id: String,
    /// Vital measured.
    pub metric_name: WebVital,
    /// Sample value, as collected.
    pub value: Number,
    /// Target value.
    pub target: f64,
    /// Sample within target.
    pub passed: bool,
    /// Score in `[0, 1]`.
    pub score: f64,
}

/// Scored Lighthouse audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LighthouseScore {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Category scores as collected.
    pub scores: BTreeMap<String, Number>,
    /// Every category at or above [`LIGHTHOUSE_CATEGORY_TARGET`].
    pub all_passed: bool,
    /// Mean category score, two decimals.
    pub average_score: f64,
    /// Unrounded mean at or above [`LIGHTHOUSE_AVERAGE_TARGET`].
    pub meets_target_95: bool,
}

/// Scored performance shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerformanceScore {
    /// LCP or FID sample.
    Latency(LatencyVitalScore),
    /// CLS sample.
    LayoutShift(LayoutShiftScore),
    /// Lighthouse audit.
    Lighthouse(LighthouseScore),
}

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Scores a performance payload.
///
/// # Errors
///
/// Returns [`EvaluatorFault`] when a sample or category score is not numeric.
pub fn evaluate_performance(
    input: &EvaluatorInput<'_>,
) -> Result<Verdict<PerformanceScore>, EvaluatorFault> {
    let payload = input.payload;
    // Unrecognised metric labels fall through to the audit branch.
    if let Some(vital) = payload.get("metric").and_then(Value::as_str).and_then(WebVital::from_label)
    {
        return score_vital(input, vital).map(Verdict::Scored);
    }

    let scores = lighthouse_scores(input)?;
    if scores.is_empty() {
        return Ok(Verdict::Rejected(Rejection::new(input.query_id, "No metrics found in response")));
    }

    let values: Vec<f64> = scores.values().filter_map(Number::as_f64).collect();
    let all_passed = values.iter().all(|score| *score >= LIGHTHOUSE_CATEGORY_TARGET);
    #[allow(clippy::cast_precision_loss, reason = "Category counts are tiny.")]
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Ok(Verdict::Scored(PerformanceScore::Lighthouse(LighthouseScore {
        query_id: input.query_id.to_string(),
        scenario: input.scenario.to_string(),
        scores,
        all_passed,
        average_score: round2(mean),
        meets_target_95: mean >= LIGHTHOUSE_AVERAGE_TARGET,
    })))
}

/// Scores a single web-vital sample.
fn score_vital(input: &EvaluatorInput<'_>, vital: WebVital) -> Result<PerformanceScore, EvaluatorFault> {
    let (sample, value) = sample_or(input.payload, vital.value_field(), 0)?;
    let target = vital.target();
    let passed = value <= target;
    let score = decayed_score(value, target, vital.decay());
    let query_id = input.query_id.to_string();
    Ok(match vital.target_ms() {
        Some(target_ms) => PerformanceScore::Latency(LatencyVitalScore {
            query_id,
            metric_name: vital,
            value_ms: sample,
            target_ms,
            passed,
            score,
        }),
        None => PerformanceScore::LayoutShift(LayoutShiftScore {
            query_id,
            metric_name: vital,
            value: sample,
            target,
            passed,
            score,
        }),
    })
}

/// Reads the Lighthouse category scores; absent scores yield an empty map.
fn lighthouse_scores(
    input: &EvaluatorInput<'_>,
) -> Result<BTreeMap<String, Number>, EvaluatorFault> {
    let Some(scores) = object(input.payload, "scores")? else {
        return Ok(BTreeMap::new());
    };
    scores
        .iter()
        .map(|(category, value)| match value {
            Value::Number(score) if score.as_f64().is_some() => {
                Ok((category.clone(), score.clone()))
            }
            _ => Err(EvaluatorFault::WrongType {
                field: format!("scores.{category}"),
                expected: "a number",
            }),
        })
        .collect()
}
