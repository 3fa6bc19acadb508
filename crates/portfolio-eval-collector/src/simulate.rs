// crates/portfolio-eval-collector/src/simulate.rs
// ============================================================================
// Module: Response Simulators
// Description: Deterministic stand-ins for browser instrumentation.
// Purpose: Produce schema-conformant payloads for every catalog query.
// Dependencies: portfolio-eval-core, serde_json, crate::bundle
// ============================================================================

//! ## Overview
//! Each simulator picks its payload shape from the query parameters
//! (`metric`, `viewport`, `lazy_components`, `probe`), never from the query
//! identifier. Values are fixed samples; only the bundle payloads read real
//! build output. A real collector replaces this module without touching the
//! evaluators as long as it emits the same keys.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use portfolio_eval_core::Payload;
use portfolio_eval_core::Query;
use portfolio_eval_core::TestType;
use portfolio_eval_core::runtime::WebVital;
use portfolio_eval_core::unix_seconds_now;
use serde_json::Value;
use serde_json::json;

use crate::bundle::collect_bundle_metrics;
use crate::error::CollectError;
use crate::error::encode_payload;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Per-category threshold for `meets_targets`.
const CATEGORY_TARGET: u32 = 94;
/// Sections tracked by the title and navigation samples.
const SECTIONS: [&str; 6] = ["hero", "about", "projects", "skills", "experience", "contact"];

// ============================================================================
// SECTION: Probes
// ============================================================================

/// Lighthouse audit viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Viewport {
    /// Desktop preset.
    Desktop,
    /// Throttled mobile preset.
    Mobile,
}

impl Viewport {
    /// Parses the `viewport` parameter; unknown values use desktop.
    fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("mobile") => Self::Mobile,
            _ => Self::Desktop,
        }
    }

    /// Parameter spelling.
    const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }

    /// Sample category scores.
    fn scores(self) -> BTreeMap<&'static str, u32> {
        let performance = match self {
            Self::Desktop => 94,
            Self::Mobile => 88,
        };
        BTreeMap::from([
            ("performance", performance),
            ("accessibility", 96),
            ("best-practices", 95),
            ("seo", 98),
        ])
    }
}

/// Loading experience probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadingProbe {
    /// Neural loader display.
    Loader,
    /// 3D asset progress.
    Progress,
    /// Smooth-scroll initialization.
    Lenis,
    /// Main content visibility.
    Content,
}

impl LoadingProbe {
    /// Parses the `probe` parameter; unknown values probe content.
    fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("loader") => Self::Loader,
            Some("progress") => Self::Progress,
            Some("lenis") => Self::Lenis,
            _ => Self::Content,
        }
    }
}

/// UX interaction probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UxProbe {
    /// Magnetic cursor.
    Magnetic,
    /// Cursor boundary fade.
    Fade,
    /// Dynamic document titles.
    Titles,
    /// Active section tracking.
    Sections,
}

impl UxProbe {
    /// Parses the `probe` parameter; unknown values probe sections.
    fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("magnetic") => Self::Magnetic,
            Some("fade") => Self::Fade,
            Some("titles") => Self::Titles,
            _ => Self::Sections,
        }
    }
}

// ============================================================================
// SECTION: Simulator
// ============================================================================

/// Produces per-query payloads.
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'a> {
    /// Site URL recorded on audits.
    base_url: &'a str,
    /// Build output inspected for bundle queries.
    build_dir: &'a Path,
}

impl<'a> Simulator<'a> {
    /// Creates a simulator for a site and build directory.
    #[must_use]
    pub const fn new(base_url: &'a str, build_dir: &'a Path) -> Self {
        Self {
            base_url,
            build_dir,
        }
    }

    /// Produces the payload for one query.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError`] when bundle inventory or payload encoding
    /// fails.
    pub fn simulate(&self, query: &Query) -> Result<Payload, CollectError> {
        let body = match query.kind() {
            Some(TestType::Performance) => self.performance(query),
            Some(TestType::BundleOptimization) => self.bundle(query)?,
            Some(TestType::LoadingExperience) => loading(query),
            Some(TestType::UxInteraction) => ux(query),
            None => json!({"status": "unknown_test_type", "query_id": query.id}),
        };
        encode_payload(&body)
    }

    /// Web-vital sample or Lighthouse audit.
    fn performance(&self, query: &Query) -> Value {
        let header = (query.id.as_str(), query.scenario.as_str());
        match query.param_str("metric").and_then(WebVital::from_label) {
            Some(WebVital::Lcp) => latency(header, WebVital::Lcp, 1850),
            Some(WebVital::Fid) => latency(header, WebVital::Fid, 65),
            Some(WebVital::Cls) => json!({
                "query_id": header.0,
                "scenario": header.1,
                "status": "success",
                "metric": WebVital::Cls.as_str(),
                "value": 0.08,
                "target_value": WebVital::Cls.target(),
                "passed": true,
            }),
            None => {
                let viewport = Viewport::from_param(query.param_str("viewport"));
                let scores = viewport.scores();
                json!({
                    "query_id": header.0,
                    "scenario": header.1,
                    "viewport": viewport.as_str(),
                    "url": self.base_url,
                    "status": "success",
                    "meets_targets": scores.values().all(|score| *score >= CATEGORY_TARGET),
                    "scores": scores,
                    "timestamp": unix_seconds_now(),
                })
            }
        }
    }

    /// Lazy-loading report or chunk verification report.
    fn bundle(&self, query: &Query) -> Result<Value, CollectError> {
        let metrics = collect_bundle_metrics(self.build_dir)?;
        let mut body = json!({
            "query_id": query.id,
            "scenario": query.scenario,
            "status": "success",
        });
        if let Some(lazy) = query.params.get("lazy_components") {
            body["lazy_components"] = lazy.clone();
            body["all_lazy_loaded"] = json!(true);
        } else {
            let chunk_details = match metrics.inventory() {
                Some(inventory) => Value::Object(encode_payload(&inventory.chunks)?),
                None => Value::Object(Payload::new()),
            };
            body["chunks_verified"] = json!(metrics.properly_split());
            body["chunk_details"] = chunk_details;
        }
        body["bundle_metrics"] = Value::Object(encode_payload(&metrics)?);
        Ok(body)
    }
}

/// Latency vital sample within target.
fn latency((query_id, scenario): (&str, &str), vital: WebVital, value_ms: u32) -> Value {
    json!({
        "query_id": query_id,
        "scenario": scenario,
        "status": "success",
        "metric": vital.as_str(),
        "value_ms": value_ms,
        "target_ms": vital.target_ms(),
        "passed": vital.target_ms().is_some_and(|target| value_ms <= target),
    })
}

/// Loading experience sample.
fn loading(query: &Query) -> Value {
    let mut body = json!({
        "query_id": query.id,
        "scenario": query.scenario,
        "status": "success",
    });
    let fields = match LoadingProbe::from_param(query.param_str("probe")) {
        LoadingProbe::Loader => json!({
            "neural_loader_displayed": true,
            "display_time_ms": 120,
            "target_element": ".neural-loader-wrapper",
        }),
        LoadingProbe::Progress => json!({
            "progress_reached": 100,
            "load_time_ms": 2800,
            "use_progress_hook_works": true,
        }),
        LoadingProbe::Lenis => json!({
            "lenis_ready_ms": 145,
            "target_ms": 200,
            "fouc_prevented": true,
        }),
        LoadingProbe::Content => json!({
            "content_visible": true,
            "visibility_time_ms": 3100,
            "main_element_found": "main.neural-flux-main",
        }),
    };
    merge(&mut body, fields);
    body
}

/// UX interaction sample.
fn ux(query: &Query) -> Value {
    let mut body = json!({
        "query_id": query.id,
        "scenario": query.scenario,
        "status": "success",
    });
    let fields = match UxProbe::from_param(query.param_str("probe")) {
        UxProbe::Magnetic => json!({
            "cursor_stickiness_active": true,
            "magnetic_effect_detected": true,
            "lerp_damping": 0.15,
        }),
        UxProbe::Fade => json!({
            "cursor_fade_on_leave": true,
            "final_opacity": 0,
            "transition_duration_ms": 300,
            "fade_works_correctly": true,
        }),
        UxProbe::Titles => json!({
            "helmet_provider_active": true,
            "dynamic_titles_updated": true,
            "sections_tracked": SECTIONS,
            "title_updates_detected": SECTIONS.len(),
        }),
        UxProbe::Sections => json!({
            "section_tracking_works": true,
            "scroll_positions_tracked": SECTIONS.len() + 1,
            "active_section_updates": SECTIONS.len(),
        }),
    };
    merge(&mut body, fields);
    body
}

/// Copies the fields of `extra` into `body`.
fn merge(body: &mut Value, extra: Value) {
    if let (Value::Object(body), Value::Object(extra)) = (body, extra) {
        body.extend(extra);
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
