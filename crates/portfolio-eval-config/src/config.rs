// crates/portfolio-eval-config/src/config.rs
// ============================================================================
// Module: Portfolio Eval Configuration
// Description: Configuration loading and validation for the harness.
// Purpose: Provide strict config parsing with hard limits and defaults.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with size and path limits. The
//! path comes from the caller, then the `PORTFOLIO_EVAL_CONFIG` environment
//! variable, then `portfolio-eval.toml` in the working directory. A file
//! named explicitly must exist; the implicit default may be absent, in which
//! case every default applies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "portfolio-eval.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "PORTFOLIO_EVAL_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum tool timeout in seconds.
pub(crate) const MAX_TOOL_TIMEOUT_SECS: u64 = 3600;
/// Maximum retained tool output in characters.
pub(crate) const MAX_OUTPUT_TAIL_CHARS: usize = 65_536;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Portfolio Eval configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioEvalConfig {
    /// Document and build output locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Audited site settings.
    #[serde(default)]
    pub site: SiteConfig,
    /// Build tool invocation.
    #[serde(default)]
    pub build: BuildConfig,
    /// Lint tool invocation.
    #[serde(default)]
    pub lint: LintConfig,
    /// File the configuration was read from (not serialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl PortfolioEvalConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml(content)?;
        config.source = Some(resolved);
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.paths.validate()?;
        self.site.validate()?;
        self.build.validate()?;
        self.lint.validate()
    }
}

// ============================================================================
// SECTION: Paths
// ============================================================================

/// Document and build output locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Query catalog path.
    #[serde(default = "default_catalog_path")]
    pub catalog: PathBuf,
    /// Collected responses path.
    #[serde(default = "default_responses_path")]
    pub responses: PathBuf,
    /// Report output path.
    #[serde(default = "default_report_path")]
    pub report: PathBuf,
    /// Build output directory.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog_path(),
            responses: default_responses_path(),
            report: default_report_path(),
            build_dir: default_build_dir(),
        }
    }
}

impl PathsConfig {
    /// Validates every configured path.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("paths.catalog", &self.catalog.to_string_lossy())?;
        validate_path_string("paths.responses", &self.responses.to_string_lossy())?;
        validate_path_string("paths.report", &self.report.to_string_lossy())?;
        validate_path_string("paths.build_dir", &self.build_dir.to_string_lossy())
    }
}

// ============================================================================
// SECTION: Site
// ============================================================================

/// Audited site settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// URL recorded on audit payloads.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl SiteConfig {
    /// Validates the site settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("site.base_url must be non-empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid("site.base_url must be an http(s) url".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Tools
// ============================================================================

/// Build tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Program to execute.
    #[serde(default = "default_tool_program")]
    pub program: String,
    /// Program arguments.
    #[serde(default = "default_build_args")]
    pub args: Vec<String>,
    /// Wall-clock bound in seconds.
    #[serde(default = "default_build_timeout_secs")]
    pub timeout_secs: u64,
    /// Trailing stdout characters kept.
    #[serde(default = "default_build_tail_chars")]
    pub output_tail_chars: usize,
    /// Stdout marker proving the module graph was processed.
    #[serde(default = "default_modules_marker")]
    pub modules_marker: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            program: default_tool_program(),
            args: default_build_args(),
            timeout_secs: default_build_timeout_secs(),
            output_tail_chars: default_build_tail_chars(),
            modules_marker: default_modules_marker(),
        }
    }
}

impl BuildConfig {
    /// Returns the wall-clock bound.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates the build tool settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_tool("build", &self.program, self.timeout_secs, self.output_tail_chars)?;
        if self.modules_marker.trim().is_empty() {
            return Err(ConfigError::Invalid("build.modules_marker must be non-empty".to_string()));
        }
        Ok(())
    }
}

/// Lint tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintConfig {
    /// Program to execute.
    #[serde(default = "default_tool_program")]
    pub program: String,
    /// Program arguments.
    #[serde(default = "default_lint_args")]
    pub args: Vec<String>,
    /// Wall-clock bound in seconds.
    #[serde(default = "default_lint_timeout_secs")]
    pub timeout_secs: u64,
    /// Trailing combined output characters kept.
    #[serde(default = "default_lint_tail_chars")]
    pub output_tail_chars: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            program: default_tool_program(),
            args: default_lint_args(),
            timeout_secs: default_lint_timeout_secs(),
            output_tail_chars: default_lint_tail_chars(),
        }
    }
}

impl LintConfig {
    /// Returns the wall-clock bound.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates the lint tool settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_tool("lint", &self.program, self.timeout_secs, self.output_tail_chars)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path; the flag is true when the path was named.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates the settings shared by build and lint.
fn validate_tool(
    section: &str,
    program: &str,
    timeout_secs: u64,
    output_tail_chars: usize,
) -> Result<(), ConfigError> {
    if program.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{section}.program must be non-empty")));
    }
    if !(1 ..= MAX_TOOL_TIMEOUT_SECS).contains(&timeout_secs) {
        return Err(ConfigError::Invalid(format!(
            "{section}.timeout_secs must be between 1 and {MAX_TOOL_TIMEOUT_SECS}"
        )));
    }
    if !(1 ..= MAX_OUTPUT_TAIL_CHARS).contains(&output_tail_chars) {
        return Err(ConfigError::Invalid(format!(
            "{section}.output_tail_chars must be between 1 and {MAX_OUTPUT_TAIL_CHARS}"
        )));
    }
    Ok(())
}

/// Default catalog path.
fn default_catalog_path() -> PathBuf {
    PathBuf::from("evaluation/queries.json")
}

/// Default responses path.
fn default_responses_path() -> PathBuf {
    PathBuf::from("evaluation/responses.json")
}

/// Default report path.
fn default_report_path() -> PathBuf {
    PathBuf::from("evaluation/report.json")
}

/// Default build output directory.
fn default_build_dir() -> PathBuf {
    PathBuf::from("dist")
}

/// Default audited site.
fn default_base_url() -> String {
    "http://localhost:5173/design-portfolio/".to_string()
}

/// Default tool program.
fn default_tool_program() -> String {
    "npm".to_string()
}

/// Default build arguments.
fn default_build_args() -> Vec<String> {
    vec!["run".to_string(), "build".to_string()]
}

/// Default lint arguments.
fn default_lint_args() -> Vec<String> {
    vec!["run".to_string(), "lint".to_string()]
}

/// Default build bound in seconds.
const fn default_build_timeout_secs() -> u64 {
    60
}

/// Default lint bound in seconds.
const fn default_lint_timeout_secs() -> u64 {
    30
}

/// Default retained build output.
const fn default_build_tail_chars() -> usize {
    500
}

/// Default retained lint output.
const fn default_lint_tail_chars() -> usize {
    400
}

/// Default build stdout marker.
fn default_modules_marker() -> String {
    "modules transformed".to_string()
}
