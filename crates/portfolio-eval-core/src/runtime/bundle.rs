// crates/portfolio-eval-core/src/runtime/bundle.rs
// ============================================================================
// Module: Bundle Evaluator
// Description: Scores code-splitting and chunk-size budgets.
// Purpose: Check vendor chunk separation and main/three-core size limits.
// Dependencies: crate::core::result, crate::runtime::payload, serde
// ============================================================================

//! ## Overview
//! Chunk groups are classified by substring match on the chunk file name.
//! The collector writes one `has_*_chunk` flag per [`ChunkGroup`] under
//! `bundle_metrics.optimization_status`; this evaluator reads them back.
//!
//! The qualitative `optimization_quality` label depends only on the split and
//! chunk-presence flags, while `overall_score` also requires both size checks.
//! An over-budget bundle with a proper split is therefore labelled `excellent`
//! yet scores `0.5`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::response::Payload;
use crate::core::result::Rejection;
use crate::core::result::Verdict;
use crate::runtime::payload::EvaluatorFault;
use crate::runtime::payload::EvaluatorInput;
use crate::runtime::payload::flag_or;
use crate::runtime::payload::number;
use crate::runtime::payload::object;
use crate::runtime::payload::round2;

// ============================================================================
// SECTION: Budgets
// ============================================================================

/// Maximum combined size of the entry chunks, in KiB.
pub const MAX_MAIN_CHUNK_KB: f64 = 50.0;
/// Maximum combined size of the three-core chunks, in KiB.
pub const MAX_THREE_CORE_KB: f64 = 700.0;

/// Vendor/core chunk groups that must be split out of the entry bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkGroup {
    /// Three.js core.
    ThreeCore,
    /// React Three Fiber vendor code.
    R3fVendor,
    /// Animation vendor code.
    MotionVendor,
    /// Smooth-scroll vendor code.
    ScrollVendor,
}

impl ChunkGroup {
    /// All required groups.
    pub const ALL: [Self; 4] = [Self::ThreeCore, Self::R3fVendor, Self::MotionVendor, Self::ScrollVendor];

    /// File-name substring identifying the group.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::ThreeCore => "three-core",
            Self::R3fVendor => "r3f-vendor",
            Self::MotionVendor => "motion-vendor",
            Self::ScrollVendor => "scroll-vendor",
        }
    }

    /// Presence flag key under `optimization_status`.
    #[must_use]
    pub const fn flag_key(self) -> &'static str {
        match self {
            Self::ThreeCore => "has_three_core_chunk",
            Self::R3fVendor => "has_r3f_vendor_chunk",
            Self::MotionVendor => "has_motion_vendor_chunk",
            Self::ScrollVendor => "has_scroll_vendor_chunk",
        }
    }

    /// Returns true when the chunk name belongs to this group.
    #[must_use]
    pub fn matches(self, chunk_name: &str) -> bool {
        chunk_name.contains(self.marker())
    }
}

/// Returns true for entry chunks counted against [`MAX_MAIN_CHUNK_KB`].
#[must_use]
pub fn is_main_chunk(chunk_name: &str) -> bool {
    chunk_name.contains("index") && chunk_name.contains(".js")
}

// ============================================================================
// SECTION: Verdict Shapes
// ============================================================================

/// Qualitative bundle label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationQuality {
    /// Split and every required chunk present.
    Excellent,
    /// Anything else.
    NeedsImprovement,
}

impl OptimizationQuality {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::NeedsImprovement => "needs_improvement",
        }
    }
}

/// Scored bundle report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleScore {
    /// Query identifier.
    pub query_id: String,
    /// Scenario label.
    pub scenario: String,
    /// Collector's split flag.
    pub properly_split: bool,
    /// Every [`ChunkGroup`] flag set.
    pub has_all_required_chunks: bool,
    /// Combined entry chunk size, KiB.
    pub main_chunk_size_kb: f64,
    /// Entry size within budget.
    pub main_size_ok: bool,
    /// Combined three-core size, KiB.
    pub three_core_size_kb: f64,
    /// Three-core size within budget.
    pub three_size_ok: bool,
    /// `1.0` when every check holds, else `0.5`.
    pub overall_score: f64,
    /// Label ignoring the size checks.
    pub optimization_quality: OptimizationQuality,
}

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Scores a bundle verification payload.
///
/// # Errors
///
/// Returns [`EvaluatorFault`] when flags are not booleans or a counted chunk
/// lacks a numeric `size_kb`.
pub fn evaluate_bundle(input: &EvaluatorInput<'_>) -> Result<Verdict<BundleScore>, EvaluatorFault> {
    let payload = input.payload;
    if !flag_or(payload, "chunks_verified", false)? {
        return Ok(Verdict::Rejected(
            Rejection::new(input.query_id, "Chunks not properly verified").with_scenario(input.scenario),
        ));
    }

    let empty = Payload::new();
    let chunk_details = object(payload, "chunk_details")?.unwrap_or(&empty);
    let main_chunk_size = sum_chunk_sizes(chunk_details, is_main_chunk)?;
    let three_core_size = sum_chunk_sizes(chunk_details, |name| ChunkGroup::ThreeCore.matches(name))?;

    let status = match object(payload, "bundle_metrics")? {
        Some(metrics) => object(metrics, "optimization_status")?.unwrap_or(&empty),
        None => &empty,
    };
    let properly_split = flag_or(status, "properly_split", false)?;
    let mut has_all_chunks = true;
    for group in ChunkGroup::ALL {
        has_all_chunks &= flag_or(status, group.flag_key(), false)?;
    }

    let main_size_ok = main_chunk_size <= MAX_MAIN_CHUNK_KB;
    let three_size_ok = three_core_size <= MAX_THREE_CORE_KB;
    let structure_ok = properly_split && has_all_chunks;
    Ok(Verdict::Scored(BundleScore {
        query_id: input.query_id.to_string(),
        scenario: input.scenario.to_string(),
        properly_split,
        has_all_required_chunks: has_all_chunks,
        main_chunk_size_kb: round2(main_chunk_size),
        main_size_ok,
        three_core_size_kb: round2(three_core_size),
        three_size_ok,
        overall_score: if structure_ok && main_size_ok && three_size_ok { 1.0 } else { 0.5 },
        optimization_quality: if structure_ok {
            OptimizationQuality::Excellent
        } else {
            OptimizationQuality::NeedsImprovement
        },
    }))
}

/// Sums `size_kb` over the chunks selected by `include`.
fn sum_chunk_sizes(
    chunk_details: &Payload,
    include: impl Fn(&str) -> bool,
) -> Result<f64, EvaluatorFault> {
    let mut total = 0.0;
    for (name, chunk) in chunk_details.iter().filter(|(name, _)| include(name)) {
        let size = chunk
            .as_object()
            .map(|chunk| number(chunk, "size_kb"))
            .transpose()?
            .flatten()
            .ok_or_else(|| EvaluatorFault::ChunkSize {
                chunk: name.clone(),
            })?;
        total += size;
    }
    Ok(total)
}
