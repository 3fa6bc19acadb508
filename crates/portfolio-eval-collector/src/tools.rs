// crates/portfolio-eval-collector/src/tools.rs
// ============================================================================
// Module: Build and Lint Metrics
// Description: Interprets bounded build and lint runs as system payloads.
// Purpose: Record external tool outcomes as structured statuses.
// Dependencies: serde, crate::process
// ============================================================================

//! ## Overview
//! A build run succeeds when the tool exits zero and its stderr mentions no
//! error. A lint run succeeds when the tool exits zero and its combined
//! output reports no errors. Timeouts and spawn failures are statuses with a
//! message; nothing here returns an error to the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::process::ToolRun;
use crate::process::ToolSpec;
use crate::process::run_bounded;
use crate::process::tail;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Outcome status recorded for a system check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    /// The tool ran cleanly.
    Success,
    /// The tool failed, reported errors, or could not start.
    Error,
    /// The tool overran its bound.
    Timeout,
    /// The tool was not run.
    Skipped,
}

// ============================================================================
// SECTION: Build Metrics
// ============================================================================

/// Build check payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMetrics {
    /// Outcome status.
    pub status: ToolStatus,
    /// Trailing stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_time_output: Option<String>,
    /// Stdout contains the module-count marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules_transformed: Option<bool>,
    /// Stderr does not mention an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_build_errors: Option<bool>,
    /// Timeout or spawn failure text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BuildMetrics {
    /// Payload for a check that was not run.
    #[must_use]
    pub const fn skipped() -> Self {
        Self::bare(ToolStatus::Skipped, None)
    }

    /// Payload carrying only a status and message.
    const fn bare(status: ToolStatus, message: Option<String>) -> Self {
        Self {
            status,
            build_time_output: None,
            modules_transformed: None,
            no_build_errors: None,
            message,
        }
    }
}

/// Runs the build tool and interprets its outcome.
#[must_use]
pub fn build_metrics(spec: &ToolSpec, modules_marker: &str) -> BuildMetrics {
    match run_bounded(spec) {
        Ok(ToolRun::Completed {
            success,
            stdout,
            stderr,
        }) => {
            let no_build_errors = !stderr.to_lowercase().contains("error");
            BuildMetrics {
                status: if success && no_build_errors {
                    ToolStatus::Success
                } else {
                    ToolStatus::Error
                },
                build_time_output: Some(tail(&stdout, spec.output_tail_chars).to_string()),
                modules_transformed: Some(stdout.contains(modules_marker)),
                no_build_errors: Some(no_build_errors),
                message: None,
            }
        }
        Ok(ToolRun::TimedOut) => BuildMetrics::bare(
            ToolStatus::Timeout,
            Some(format!("Build process exceeded {} seconds", spec.timeout.as_secs())),
        ),
        Err(err) => BuildMetrics::bare(ToolStatus::Error, Some(err.to_string())),
    }
}

// ============================================================================
// SECTION: Lint Metrics
// ============================================================================

/// Lint check payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintMetrics {
    /// Outcome status.
    pub status: ToolStatus,
    /// Trailing combined output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint_output: Option<String>,
    /// Output reports errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_errors: Option<bool>,
    /// No errors were reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_mode_compliant: Option<bool>,
    /// Timeout or spawn failure text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LintMetrics {
    /// Payload for a check that was not run.
    #[must_use]
    pub const fn skipped() -> Self {
        Self::bare(ToolStatus::Skipped, None)
    }

    /// Payload carrying only a status and message.
    const fn bare(status: ToolStatus, message: Option<String>) -> Self {
        Self {
            status,
            lint_output: None,
            has_errors: None,
            strict_mode_compliant: None,
            message,
        }
    }
}

/// Returns true when lint output reports errors.
#[must_use]
pub fn reports_lint_errors(output: &str) -> bool {
    output.to_lowercase().contains("error") && !output.contains("0 errors")
}

/// Runs the lint tool and interprets its outcome.
#[must_use]
pub fn lint_metrics(spec: &ToolSpec) -> LintMetrics {
    match run_bounded(spec) {
        Ok(ToolRun::Completed {
            success,
            stdout,
            stderr,
        }) => {
            let output = stdout + &stderr;
            let has_errors = reports_lint_errors(&output);
            LintMetrics {
                status: if success && !has_errors { ToolStatus::Success } else { ToolStatus::Error },
                lint_output: Some(tail(&output, spec.output_tail_chars).to_string()),
                has_errors: Some(has_errors),
                strict_mode_compliant: Some(!has_errors),
                message: None,
            }
        }
        Ok(ToolRun::TimedOut) => LintMetrics::bare(
            ToolStatus::Timeout,
            Some(format!("Lint process exceeded {} seconds", spec.timeout.as_secs())),
        ),
        Err(err) => LintMetrics::bare(ToolStatus::Error, Some(err.to_string())),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::reports_lint_errors;

    #[test]
    fn zero_error_summary_is_clean() {
        assert!(!reports_lint_errors("✔ 0 errors, 2 warnings"));
        assert!(!reports_lint_errors("all files pass"));
    }

    #[test]
    fn error_text_is_detected_case_insensitively() {
        assert!(reports_lint_errors("src/App.jsx: ERROR no-unused-vars"));
        assert!(reports_lint_errors("3 errors found"));
    }
}
