// crates/portfolio-eval-collector/src/bundle.rs
// ============================================================================
// Module: Bundle Inventory
// Description: Scans built script assets and classifies vendor chunks.
// Purpose: Provide chunk sizes and split flags for bundle evaluation.
// Dependencies: portfolio-eval-core, serde
// ============================================================================

//! ## Overview
//! The inventory is a one-shot scan of `<build_dir>/assets/*.js`. Chunks are
//! classified by file-name substring using the same [`ChunkGroup`] markers
//! the bundle evaluator reads. A missing build directory is reported inside
//! the payload rather than as an error so a bundle query still gets scored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use portfolio_eval_core::runtime::ChunkGroup;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::error::CollectError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Asset subdirectory scanned for chunks.
pub const ASSETS_DIR: &str = "assets";
/// Extension of script chunks.
const SCRIPT_EXTENSION: &str = "js";
/// Bytes per KiB.
const BYTES_PER_KB: f64 = 1024.0;

// ============================================================================
// SECTION: Inventory Shapes
// ============================================================================

/// Size of one script chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkInfo {
    /// Size in KiB, rounded to 2 decimals.
    pub size_kb: f64,
    /// Size in bytes.
    pub size_bytes: u64,
}

/// Presence of the required vendor/core chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools, reason = "Mirrors the persisted flag set.")]
pub struct OptimizationStatus {
    /// A `three-core` chunk exists.
    pub has_three_core_chunk: bool,
    /// An `r3f-vendor` chunk exists.
    pub has_r3f_vendor_chunk: bool,
    /// A `motion-vendor` chunk exists.
    pub has_motion_vendor_chunk: bool,
    /// A `scroll-vendor` chunk exists.
    pub has_scroll_vendor_chunk: bool,
    /// Every required chunk exists.
    pub properly_split: bool,
}

impl OptimizationStatus {
    /// Classifies a set of chunk file names.
    #[must_use]
    pub fn from_chunk_names<'a>(names: impl Iterator<Item = &'a str> + Clone) -> Self {
        let present = |group: ChunkGroup| names.clone().any(|name| group.matches(name));
        let has_three_core_chunk = present(ChunkGroup::ThreeCore);
        let has_r3f_vendor_chunk = present(ChunkGroup::R3fVendor);
        let has_motion_vendor_chunk = present(ChunkGroup::MotionVendor);
        let has_scroll_vendor_chunk = present(ChunkGroup::ScrollVendor);
        Self {
            has_three_core_chunk,
            has_r3f_vendor_chunk,
            has_motion_vendor_chunk,
            has_scroll_vendor_chunk,
            properly_split: has_three_core_chunk
                && has_r3f_vendor_chunk
                && has_motion_vendor_chunk
                && has_scroll_vendor_chunk,
        }
    }
}

/// Successful inventory of the build output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleInventory {
    /// Number of script chunks.
    pub total_chunks: usize,
    /// Combined size in KiB, rounded to 2 decimals.
    pub total_size_kb: f64,
    /// Chunks keyed by file name.
    pub chunks: BTreeMap<String, ChunkInfo>,
    /// Split flags.
    pub optimization_status: OptimizationStatus,
}

/// Bundle metrics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BundleMetrics {
    /// The build directory was scanned.
    Success(BundleInventory),
    /// The build directory does not exist.
    Error {
        /// Reason text.
        message: String,
    },
}

impl BundleMetrics {
    /// Returns the scanned inventory, if any.
    #[must_use]
    pub const fn inventory(&self) -> Option<&BundleInventory> {
        match self {
            Self::Success(inventory) => Some(inventory),
            Self::Error {
                ..
            } => None,
        }
    }

    /// Returns true when every required chunk exists.
    #[must_use]
    pub fn properly_split(&self) -> bool {
        self.inventory().is_some_and(|inventory| inventory.optimization_status.properly_split)
    }
}

// ============================================================================
// SECTION: Scan
// ============================================================================

/// Scans the build output directory.
///
/// # Errors
///
/// Returns [`CollectError::Io`] when an existing directory cannot be read.
pub fn collect_bundle_metrics(build_dir: &Path) -> Result<BundleMetrics, CollectError> {
    if !build_dir.is_dir() {
        warn!(build_dir = %build_dir.display(), "build directory not found");
        return Ok(BundleMetrics::Error {
            message: format!("{} folder not found. Run the build first.", build_dir.display()),
        });
    }

    let mut chunks = BTreeMap::new();
    let mut total_bytes: u64 = 0;
    let assets = build_dir.join(ASSETS_DIR);
    if assets.is_dir() {
        for entry in fs::read_dir(&assets).map_err(|err| CollectError::Io(err.to_string()))? {
            let entry = entry.map_err(|err| CollectError::Io(err.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SCRIPT_EXTENSION) {
                continue;
            }
            let metadata = entry.metadata().map_err(|err| CollectError::Io(err.to_string()))?;
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let size_bytes = metadata.len();
            total_bytes = total_bytes.saturating_add(size_bytes);
            chunks.insert(
                name,
                ChunkInfo {
                    size_kb: kib(size_bytes),
                    size_bytes,
                },
            );
        }
    } else {
        debug!(assets = %assets.display(), "no assets directory");
    }

    let optimization_status = OptimizationStatus::from_chunk_names(chunks.keys().map(String::as_str));
    Ok(BundleMetrics::Success(BundleInventory {
        total_chunks: chunks.len(),
        total_size_kb: kib(total_bytes),
        chunks,
        optimization_status,
    }))
}

/// Converts bytes to KiB rounded to 2 decimals.
#[allow(clippy::cast_precision_loss, reason = "Asset sizes are far below 2^52 bytes.")]
fn kib(bytes: u64) -> f64 {
    ((bytes as f64 / BYTES_PER_KB) * 100.0).round() / 100.0
}

// ============================================================================
// SECTION: Tests
// ============================================================================
