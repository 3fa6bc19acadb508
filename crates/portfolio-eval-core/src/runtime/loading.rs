// crates/portfolio-eval-core/src/runtime/loading.rs
// ============================================================================
// Module: Loading Experience Evaluator
// Description: Scores loader display, asset progress, scroll init, and visibility.
// Purpose: Branch on the payload's key set and label the loading experience.
// Dependencies: crate::core::result, crate::runtime::payload, serde
// ============================================================================

//! ## Overview
//! Four key sets are mutually exclusive and checked in order:
//! `neural_loader_displayed`, `progress_reached`, `lenis_ready_ms`,
//! `content_visible`. Only the smooth-scroll (Lenis) branch carries a numeric
//! score.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Number;

use crate::core::result::Rejection;
use crate::core::result::Verdict;
use crate::runtime::payload::EvaluatorFault;
use crate::runtime::payload::EvaluatorInput;
use crate::runtime::payload::flag_or;
use crate::runtime::payload::has;
use crate::runtime::payload::sample_or;

// ============================================================================
// SECTION: Targets
// ============================================================================

/// Smooth-scroll initialization budget, milliseconds.
pub const LENIS_TARGET_MS: u32 = 200;
/// Loader display time below which the loader is rated good, milliseconds.
pub const LOADER_GOOD_MS: f64 = 200.0;
/// Progress value meaning every asset loaded.
pub const PROGRESS_COMPLETE: f64 = 100.0;

// ============================================================================
// SECTION: Verdict Shapes
// ============================================================================

/// Loader display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoaderQuality {
    /// Displayed quickly.
    Good,
    /// Slow or hidden.
    Acceptable,
}

/// Smooth-scroll initialization label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitializationQuality {
    /// Within budget with no flash of unstyled content.
    Excellent,
    /// Anything else.
    Good,
}

impl InitializationQuality {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
        }
    }
}

/// Loader display result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderScore {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Loader was shown.
    pub neural_loader_displayed: bool,
    /// Time until shown, milliseconds.
    pub display_time_ms: Number,
    /// Mirrors `neural_loader_displayed`.
    pub loader_working: bool,
    /// Display label.
    pub ux_quality: LoaderQuality,
}

/// Asset progress result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressScore {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Progress reached, percent.
    pub progress_reached: Number,
    /// Progress reached [`PROGRESS_COMPLETE`].
    pub progress_complete: bool,
    /// Time to reach the progress value, milliseconds.
    pub load_time_ms: Number,
    /// Progress hook reported completion.
    pub use_progress_works: bool,
}

/// Smooth-scroll initialization result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenisScore {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Initialization time, milliseconds.
    pub lenis_init_ms: Number,
    /// Budget, milliseconds.
    pub target_ms: u32,
    /// Initialized within budget.
    pub meets_target: bool,
    /// No flash of unstyled content.
    pub fouc_prevented: bool,
    /// Initialization label.
    pub initialization_quality: InitializationQuality,
    /// `1.0` when within budget and FOUC prevented, else `0.8`.
    pub score: f64,
}

/// Content visibility result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentScore {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Main content became visible.
    pub content_visible: bool,
    /// Time until visible, milliseconds.
    pub visibility_time_ms: Number,
    /// Mirrors `content_visible`.
    pub content_loading_works: bool,
}

/// Scored loading shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoadingScore {
    /// Loader display.
    Loader(LoaderScore),
    /// Asset progress.
    Progress(ProgressScore),
    /// Smooth-scroll initialization.
    Lenis(LenisScore),
    /// Content visibility.
    Content(ContentScore),
}

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Scores a loading experience payload.
///
/// # Errors
///
/// Returns [`EvaluatorFault`] when a measured field has the wrong type.
pub fn evaluate_loading(input: &EvaluatorInput<'_>) -> Result<Verdict<LoadingScore>, EvaluatorFault> {
    let payload = input.payload;
    let query_id = input.query_id.to_string();
    let scenario = input.scenario.to_string();

    if has(payload, "neural_loader_displayed") {
        let displayed = flag_or(payload, "neural_loader_displayed", false)?;
        let (display_time_ms, display_ms) = sample_or(payload, "display_time_ms", 0)?;
        let ux_quality = if displayed && display_ms < LOADER_GOOD_MS {
            LoaderQuality::Good
        } else {
            LoaderQuality::Acceptable
        };
        return Ok(Verdict::Scored(LoadingScore::Loader(LoaderScore {
            query_id,
            scenario,
            neural_loader_displayed: displayed,
            display_time_ms,
            loader_working: displayed,
            ux_quality,
        })));
    }

    if has(payload, "progress_reached") {
        let (progress_reached, progress) = sample_or(payload, "progress_reached", 0)?;
        #[allow(clippy::float_cmp, reason = "Progress is reported as an exact percentage.")]
        let complete = progress == PROGRESS_COMPLETE;
        return Ok(Verdict::Scored(LoadingScore::Progress(ProgressScore {
            query_id,
            scenario,
            progress_reached,
            progress_complete: complete,
            load_time_ms: sample_or(payload, "load_time_ms", 0)?.0,
            use_progress_works: complete,
        })));
    }

    if has(payload, "lenis_ready_ms") {
        let (lenis_init_ms, ready_ms) = sample_or(payload, "lenis_ready_ms", 0)?;
        let fouc_prevented = flag_or(payload, "fouc_prevented", false)?;
        let meets_target = ready_ms <= f64::from(LENIS_TARGET_MS);
        let excellent = meets_target && fouc_prevented;
        return Ok(Verdict::Scored(LoadingScore::Lenis(LenisScore {
            query_id,
            scenario,
            lenis_init_ms,
            target_ms: LENIS_TARGET_MS,
            meets_target,
            fouc_prevented,
            initialization_quality: if excellent {
                InitializationQuality::Excellent
            } else {
                InitializationQuality::Good
            },
            score: if excellent { 1.0 } else { 0.8 },
        })));
    }

    if has(payload, "content_visible") {
        let visible = flag_or(payload, "content_visible", false)?;
        return Ok(Verdict::Scored(LoadingScore::Content(ContentScore {
            query_id,
            scenario,
            content_visible: visible,
            visibility_time_ms: sample_or(payload, "visibility_time_ms", 0)?.0,
            content_loading_works: visible,
        })));
    }

    Ok(Verdict::Rejected(Rejection::new(input.query_id, "Unknown loading response format")))
}
