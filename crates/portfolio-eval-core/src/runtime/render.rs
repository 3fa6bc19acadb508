// crates/portfolio-eval-core/src/runtime/render.rs
// ============================================================================
// Module: Report Rendering
// Description: Human-readable text for reports and suite progress.
// Purpose: Format results for console review without touching the report.
// Dependencies: crate::core, crate::runtime::{performance, bundle, loading, ux}
// ============================================================================

//! ## Overview
//! Rendering decodes stored verdicts by metric type and prints one line per
//! check with a pass/fail glyph. Output is a side channel: nothing here feeds
//! back into the structured [`Report`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use crate::core::query::MetricType;
use crate::core::report::Report;
use crate::core::report::SystemCheck;
use crate::core::result::EvaluationResult;
use crate::core::result::Verdict;
use crate::runtime::bundle::BundleScore;
use crate::runtime::loading::LoadingScore;
use crate::runtime::performance::PerformanceScore;
use crate::runtime::ux::UxScore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Glyph for a passing check.
pub const PASS_GLYPH: &str = "✓";
/// Glyph for a failing check.
pub const FAIL_GLYPH: &str = "✗";
/// Width of the report rules.
const RULE_WIDTH: usize = 80;
/// Width of the metric-type column in progress lines.
const METRIC_COLUMN: usize = 12;
/// Width of the scenario column in progress lines.
const SCENARIO_COLUMN: usize = 50;

/// Returns the glyph for a check outcome.
#[must_use]
pub const fn glyph(passed: bool) -> &'static str {
    if passed { PASS_GLYPH } else { FAIL_GLYPH }
}

// ============================================================================
// SECTION: Progress Lines
// ============================================================================

/// Formats a suite progress line for one record.
#[must_use]
pub fn progress_line(result: &EvaluationResult) -> String {
    let scenario: String = result.scenario.chars().take(SCENARIO_COLUMN).collect();
    let mut line = format!(
        "{} {:<METRIC_COLUMN$} | {:<SCENARIO_COLUMN$}",
        glyph(result.is_success()),
        result.metric_type.as_str(),
        scenario
    );
    if let Some(error) = &result.error {
        let _ = write!(line, " - Error: {error}");
    }
    line
}

// ============================================================================
// SECTION: Report Rendering
// ============================================================================

/// Renders a report as console text.
#[must_use]
pub fn render_report(report: &Report) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "PORTFOLIO EVALUATION REPORT");
    let _ = writeln!(out, "{rule}\n");
    if !report.system_checks.is_empty() {
        let _ = writeln!(out, "SYSTEM CHECKS");
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        for check in &report.system_checks {
            let _ = writeln!(out, "  {}", system_check_line(check));
        }
        out.push('\n');
    }
    for (metric_type, results) in &report.results_by_type {
        let _ = writeln!(out, "{}", metric_type.heading());
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        for result in results {
            for line in result_lines(*metric_type, result) {
                let _ = writeln!(out, "  {line}");
            }
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "Total: {} | Passed: {} | Failed: {}",
        report.total_tests, report.passed, report.failed
    );
    let _ = writeln!(out, "{rule}");
    out
}

/// Renders one build or lint outcome.
fn system_check_line(check: &SystemCheck) -> String {
    let mut line = format!("{} {}: {}", glyph(check.passed), check.scenario, check.status);
    if let Some(message) = check.message.as_deref().filter(|_| !check.passed) {
        let _ = write!(line, " - {message}");
    }
    line
}

/// Renders the lines for one record.
fn result_lines(metric_type: MetricType, result: &EvaluationResult) -> Vec<String> {
    if let Some(error) = &result.error {
        return vec![format!("{FAIL_GLYPH} {}: {error}", result.scenario)];
    }
    let lines = match metric_type {
        MetricType::Performance => result.verdict().map(|v| verdict_lines(&v, performance_lines)),
        MetricType::Bundle => result.verdict().map(|v| verdict_lines(&v, bundle_lines)),
        MetricType::Loading => result.verdict().map(|v| verdict_lines(&v, loading_lines)),
        MetricType::Ux => result.verdict().map(|v| verdict_lines(&v, ux_lines)),
    };
    lines.unwrap_or_else(|| vec![format!("? {}: unrecognised result", result.scenario)])
}

/// Renders a verdict, delegating scored shapes to `scored`.
fn verdict_lines<T>(verdict: &Verdict<T>, scored: fn(&T) -> Vec<String>) -> Vec<String> {
    match verdict {
        Verdict::Scored(score) => scored(score),
        Verdict::Rejected(rejection) => {
            let label = rejection.scenario.as_deref().unwrap_or(&rejection.query_id);
            vec![format!("{FAIL_GLYPH} {label}: {}", rejection.message)]
        }
    }
}

/// Lines for a performance verdict.
fn performance_lines(score: &PerformanceScore) -> Vec<String> {
    match score {
        PerformanceScore::Lighthouse(audit) => {
            let scores: Vec<String> =
                audit.scores.iter().map(|(name, value)| format!("{name}: {value}")).collect();
            vec![
                format!(
                    "{} Lighthouse Score: {}/100 (Target: 95+)",
                    glyph(audit.meets_target_95),
                    audit.average_score
                ),
                format!("   Scores: {}", scores.join(", ")),
            ]
        }
        PerformanceScore::Latency(vital) => vec![format!(
            "{} {}: {}ms (Target: {}ms)",
            glyph(vital.passed),
            vital.metric_name.as_str(),
            vital.value_ms,
            vital.target_ms
        )],
        PerformanceScore::LayoutShift(vital) => vec![format!(
            "{} {}: {} (Target: {})",
            glyph(vital.passed),
            vital.metric_name.as_str(),
            vital.value,
            vital.target
        )],
    }
}

/// Lines for a bundle verdict.
fn bundle_lines(score: &BundleScore) -> Vec<String> {
    vec![
        format!("Chunks Properly Split: {}", glyph(score.properly_split)),
        format!("Main Chunk Size: {} KB {}", score.main_chunk_size_kb, glyph(score.main_size_ok)),
        format!("Three Core Size: {} KB {}", score.three_core_size_kb, glyph(score.three_size_ok)),
        format!(
            "Quality: {} (score {})",
            score.optimization_quality.as_str(),
            score.overall_score
        ),
    ]
}

/// Lines for a loading verdict.
fn loading_lines(score: &LoadingScore) -> Vec<String> {
    let line = match score {
        LoadingScore::Loader(loader) => format!(
            "{} NeuralLoader: {}",
            glyph(loader.loader_working),
            if loader.neural_loader_displayed { "Displayed" } else { "Hidden" }
        ),
        LoadingScore::Progress(progress) => format!(
            "{} 3D Assets: {}% loaded",
            glyph(progress.progress_complete),
            progress.progress_reached
        ),
        LoadingScore::Lenis(lenis) => format!(
            "{} Lenis Init: {}ms (Target: {}ms, {})",
            glyph(lenis.meets_target),
            lenis.lenis_init_ms,
            lenis.target_ms,
            lenis.initialization_quality.as_str()
        ),
        LoadingScore::Content(content) => format!(
            "{} Content Visible: {}ms",
            glyph(content.content_loading_works),
            content.visibility_time_ms
        ),
    };
    vec![line]
}

/// Lines for a UX verdict.
fn ux_lines(score: &UxScore) -> Vec<String> {
    let line = match score {
        UxScore::MagneticCursor(cursor) => format!(
            "{} Magnetic Cursor: {}",
            glyph(cursor.cursor_wow_factor),
            cursor.quality.as_str()
        ),
        UxScore::BoundaryFade(fade) => format!(
            "{} Cursor Boundary Fade: {}",
            glyph(fade.fade_smooth),
            fade.boundary_ux.as_str()
        ),
        UxScore::SeoTitles(titles) => format!(
            "{} Dynamic SEO Titles: {} ({} updates)",
            glyph(titles.dynamic_titles),
            titles.seo_implementation.as_str(),
            titles.title_updates_count
        ),
        UxScore::SectionTracking(tracking) => format!(
            "{} Navigation Tracking: {}",
            glyph(tracking.tracking_works),
            tracking.navigation_ux.as_str()
        ),
    };
    vec![line]
}
