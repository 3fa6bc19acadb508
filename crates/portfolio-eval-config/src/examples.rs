// crates/portfolio-eval-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and `config example`.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The example spells out every default so it doubles as documentation.

/// Returns a canonical example `portfolio-eval.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[paths]
catalog = "evaluation/queries.json"
responses = "evaluation/responses.json"
report = "evaluation/report.json"
build_dir = "dist"

[site]
base_url = "http://localhost:5173/design-portfolio/"

[build]
program = "npm"
args = ["run", "build"]
timeout_secs = 60
output_tail_chars = 500
modules_marker = "modules transformed"

[lint]
program = "npm"
args = ["run", "lint"]
timeout_secs = 30
output_tail_chars = 400
"#,
    )
}
