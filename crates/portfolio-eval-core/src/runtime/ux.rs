// crates/portfolio-eval-core/src/runtime/ux.rs
// ============================================================================
// Module: UX Interaction Evaluator
// Description: Scores cursor, title, and navigation interaction payloads.
// Purpose: Branch on the payload's key set and label interaction quality.
// Dependencies: crate::core::result, crate::runtime::payload, serde
// ============================================================================

//! ## Overview
//! Four key sets are mutually exclusive and checked in order:
//! `cursor_stickiness_active`, `cursor_fade_on_leave`,
//! `helmet_provider_active`, `section_tracking_works`. Only the SEO title
//! branch carries a numeric score, and it requires an exact update count.

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

/// Title updates expected across the tracked page sections.
pub const EXPECTED_TITLE_UPDATES: f64 = 6.0;

// ============================================================================
// SECTION: Labels
// ============================================================================

/// Magnetic cursor label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorQuality {
    /// Sticky and magnetic.
    Excellent,
    /// Anything else.
    NeedsWork,
}

/// Cursor boundary fade label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryUx {
    /// Fades fully out on leave.
    Polished,
    /// Anything else.
    Basic,
}

/// SEO title label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoImplementation {
    /// Provider active and titles updated.
    Complete,
    /// Anything else.
    Incomplete,
}

/// Section navigation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationUx {
    /// Active section follows scrolling.
    Responsive,
    /// Active section never updates.
    Static,
}

/// Implements `as_str` for a label enum.
macro_rules! label_str {
    ($kind:ty { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $kind {
            /// Returns the stable label.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

label_str!(CursorQuality { Excellent => "excellent", NeedsWork => "needs_work" });
label_str!(BoundaryUx { Polished => "polished", Basic => "basic" });
label_str!(SeoImplementation { Complete => "complete", Incomplete => "incomplete" });
label_str!(NavigationUx { Responsive => "responsive", Static => "static" });

// ============================================================================
// SECTION: Verdict Shapes
// ============================================================================

/// Magnetic cursor result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagneticCursorScore {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Cursor sticks to targets.
    pub stickiness_active: bool,
    /// Magnetic pull detected.
    pub magnetic_effect: bool,
    /// Both effects present.
    pub cursor_wow_factor: bool,
    /// Label.
    pub quality: CursorQuality,
}

/// Cursor boundary fade result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFadeScore {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Cursor fades when leaving the window.
    pub fade_on_leave_works: bool,
    /// Opacity after the fade.
    pub final_opacity: Number,
    /// Transition ran without glitches.
    pub fade_smooth: bool,
    /// Label.
    pub boundary_ux: BoundaryUx,
}

/// Dynamic SEO title result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoTitleScore {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Title provider mounted.
    pub helmet_active: bool,
    /// Titles changed while scrolling.
    pub dynamic_titles: bool,
    /// Number of title changes observed.
    pub title_updates_count: Number,
    /// Label.
    pub seo_implementation: SeoImplementation,
    /// `1.0` when both flags hold and exactly [`EXPECTED_TITLE_UPDATES`] updates
    /// were seen, else `0.7`.
    pub score: f64,
}

/// Section tracking result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTrackingScore {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Active section tracking works.
    pub tracking_works: bool,
    /// Scroll positions sampled.
    pub positions_tracked: Number,
    /// Active section changes observed.
    pub section_updates: Number,
    /// Label.
    pub navigation_ux: NavigationUx,
}

/// Scored UX shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UxScore {
    /// Magnetic cursor.
    MagneticCursor(MagneticCursorScore),
    /// Boundary fade.
    BoundaryFade(BoundaryFadeScore),
    /// SEO titles.
    SeoTitles(SeoTitleScore),
    /// Section tracking.
    SectionTracking(SectionTrackingScore),
}

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Scores a UX interaction payload.
///
/// # Errors
///
/// Returns [`EvaluatorFault`] when a flag or count has the wrong type.
#[allow(clippy::float_cmp, reason = "Opacity and update counts are reported exactly.")]
pub fn evaluate_ux(input: &EvaluatorInput<'_>) -> Result<Verdict<UxScore>, EvaluatorFault> {
    let payload = input.payload;
    let query_id = input.query_id.to_string();
    let scenario = input.scenario.to_string();

    if has(payload, "cursor_stickiness_active") {
        let stickiness = flag_or(payload, "cursor_stickiness_active", false)?;
        let magnetic = flag_or(payload, "magnetic_effect_detected", false)?;
        let wow = stickiness && magnetic;
        return Ok(Verdict::Scored(UxScore::MagneticCursor(MagneticCursorScore {
            query_id,
            scenario,
            stickiness_active: stickiness,
            magnetic_effect: magnetic,
            cursor_wow_factor: wow,
            quality: if wow { CursorQuality::Excellent } else { CursorQuality::NeedsWork },
        })));
    }

    if has(payload, "cursor_fade_on_leave") {
        let fade_works = flag_or(payload, "cursor_fade_on_leave", false)?;
        let (final_opacity, opacity) = sample_or(payload, "final_opacity", 1)?;
        return Ok(Verdict::Scored(UxScore::BoundaryFade(BoundaryFadeScore {
            query_id,
            scenario,
            fade_on_leave_works: fade_works,
            final_opacity,
            fade_smooth: flag_or(payload, "fade_works_correctly", false)?,
            boundary_ux: if fade_works && opacity == 0.0 {
                BoundaryUx::Polished
            } else {
                BoundaryUx::Basic
            },
        })));
    }

    if has(payload, "helmet_provider_active") {
        let helmet_active = flag_or(payload, "helmet_provider_active", false)?;
        let titles_updated = flag_or(payload, "dynamic_titles_updated", false)?;
        let (title_updates_count, title_count) = sample_or(payload, "title_updates_detected", 0)?;
        let complete = helmet_active && titles_updated;
        return Ok(Verdict::Scored(UxScore::SeoTitles(SeoTitleScore {
            query_id,
            scenario,
            helmet_active,
            dynamic_titles: titles_updated,
            title_updates_count,
            seo_implementation: if complete {
                SeoImplementation::Complete
            } else {
                SeoImplementation::Incomplete
            },
            score: if complete && title_count == EXPECTED_TITLE_UPDATES { 1.0 } else { 0.7 },
        })));
    }

    if has(payload, "section_tracking_works") {
        let tracking = flag_or(payload, "section_tracking_works", false)?;
        return Ok(Verdict::Scored(UxScore::SectionTracking(SectionTrackingScore {
            query_id,
            scenario,
            tracking_works: tracking,
            positions_tracked: sample_or(payload, "scroll_positions_tracked", 0)?.0,
            section_updates: sample_or(payload, "active_section_updates", 0)?.0,
            navigation_ux: if tracking { NavigationUx::Responsive } else { NavigationUx::Static },
        })));
    }

    Ok(Verdict::Rejected(Rejection::new(input.query_id, "Unknown UX response format")))
}
