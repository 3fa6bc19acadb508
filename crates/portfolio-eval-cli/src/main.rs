// crates/portfolio-eval-cli/src/main.rs
// ============================================================================
// Module: Portfolio Eval CLI Entry Point
// Description: Command dispatcher for collection, evaluation, and config.
// Purpose: Run the evaluation harness from the command line.
// Dependencies: clap, portfolio-eval-{core, collector, config}, thiserror,
// tracing-subscriber.
// ============================================================================

//! ## Overview
//! `portfolio-eval` collects responses for a query catalog, evaluates them,
//! and writes a report. Progress lines go to stdout; diagnostics go to stderr
//! through `tracing`, filtered by `RUST_LOG` (default `warn`) or raised to
//! `debug` with `--verbose`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use portfolio_eval_cli::console::ConsoleObserver;
use portfolio_eval_cli::pipeline::PathOverrides;
use portfolio_eval_cli::pipeline::RunPaths;
use portfolio_eval_cli::pipeline::collect;
use portfolio_eval_cli::pipeline::collector_settings;
use portfolio_eval_cli::pipeline::evaluate;
use portfolio_eval_config::PortfolioEvalConfig;
use portfolio_eval_config::config_toml_example;
use portfolio_eval_core::Report;
use portfolio_eval_core::render_report;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "portfolio-eval", version, about = "Evaluate a web portfolio against its targets")]
struct Cli {
    /// Config file path (defaults to portfolio-eval.toml or env override).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Emit debug diagnostics on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Selected command.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Collect responses for every catalog query.
    Collect(CollectCommand),
    /// Evaluate collected responses and write the report.
    Evaluate(EvaluateCommand),
    /// Collect, then evaluate.
    Run(RunCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate the configuration file.
    Validate,
    /// Print an example configuration with every default.
    Example,
}

/// Input document overrides.
#[derive(Args, Debug, Clone, Default)]
struct InputArgs {
    /// Query catalog path.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// Responses path.
    #[arg(long, value_name = "PATH")]
    responses: Option<PathBuf>,
}

/// Collection options.
#[derive(Args, Debug, Clone, Default)]
struct CollectArgs {
    /// Build output directory.
    #[arg(long, value_name = "PATH")]
    build_dir: Option<PathBuf>,
    /// Record build and lint as skipped instead of running them.
    #[arg(long)]
    skip_tools: bool,
}

/// Report options.
#[derive(Args, Debug, Clone, Default)]
struct ReportArgs {
    /// Report output path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// Exit non-zero when any evaluation or system check failed.
    #[arg(long)]
    fail_on_error: bool,
}

/// Arguments for `collect`.
#[derive(Args, Debug)]
struct CollectCommand {
    /// Input overrides.
    #[command(flatten)]
    inputs: InputArgs,
    /// Collection options.
    #[command(flatten)]
    collect: CollectArgs,
}

/// Arguments for `evaluate`.
#[derive(Args, Debug)]
struct EvaluateCommand {
    /// Input overrides.
    #[command(flatten)]
    inputs: InputArgs,
    /// Report options.
    #[command(flatten)]
    report: ReportArgs,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Input overrides.
    #[command(flatten)]
    inputs: InputArgs,
    /// Collection options.
    #[command(flatten)]
    collect: CollectArgs,
    /// Report options.
    #[command(flatten)]
    report: ReportArgs,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = || {
        PortfolioEvalConfig::load(cli.config.as_deref())
            .map_err(|err| CliError::new(format!("failed to load config: {err}")))
    };

    match cli.command {
        Commands::Collect(command) => command_collect(&config()?, command),
        Commands::Evaluate(command) => command_evaluate(&config()?, command),
        Commands::Run(command) => command_run(&config()?, command),
        Commands::Config {
            command: ConfigCommand::Validate,
        } => {
            let config = config()?;
            let source = config
                .source
                .as_ref()
                .map_or_else(|| "defaults".to_string(), |path| path.display().to_string());
            write_stdout_line(&format!("config ok ({source})"))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config {
            command: ConfigCommand::Example,
        } => {
            write_stdout(&config_toml_example())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Installs the stderr diagnostics subscriber.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes `collect`.
fn command_collect(config: &PortfolioEvalConfig, command: CollectCommand) -> CliResult<ExitCode> {
    let paths = resolve_paths(config, command.inputs, &command.collect, None);
    run_collect(config, &paths, command.collect.skip_tools)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `evaluate`.
fn command_evaluate(config: &PortfolioEvalConfig, command: EvaluateCommand) -> CliResult<ExitCode> {
    let paths =
        resolve_paths(config, command.inputs, &CollectArgs::default(), command.report.report.clone());
    let report = run_evaluate(&paths)?;
    Ok(exit_for(&report, command.report.fail_on_error))
}

/// Executes `run`.
fn command_run(config: &PortfolioEvalConfig, command: RunCommand) -> CliResult<ExitCode> {
    let paths = resolve_paths(config, command.inputs, &command.collect, command.report.report.clone());
    run_collect(config, &paths, command.collect.skip_tools)?;
    let report = run_evaluate(&paths)?;
    Ok(exit_for(&report, command.report.fail_on_error))
}

/// Resolves document paths from configuration and flags.
fn resolve_paths(
    config: &PortfolioEvalConfig,
    inputs: InputArgs,
    collect: &CollectArgs,
    report: Option<PathBuf>,
) -> RunPaths {
    RunPaths::from_config(config).with_overrides(PathOverrides {
        catalog: inputs.catalog,
        responses: inputs.responses,
        report,
        build_dir: collect.build_dir.clone(),
    })
}

/// Runs collection with console progress.
fn run_collect(config: &PortfolioEvalConfig, paths: &RunPaths, skip_tools: bool) -> CliResult<()> {
    write_stdout_line("Collecting portfolio evaluation responses...")
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    let settings = collector_settings(config, &paths.build_dir, skip_tools);
    let records = collect(settings, paths, ConsoleObserver::new(std::io::stdout()))
        .map_err(|err| CliError::new(format!("collection failed: {err}")))?;
    write_stdout_line(&format!(
        "Responses saved to: {} ({} records)",
        paths.responses.display(),
        records.len()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Runs evaluation with console progress and prints the report.
fn run_evaluate(paths: &RunPaths) -> CliResult<Report> {
    write_stdout_line("Evaluating collected responses...")
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    let report = evaluate(paths, ConsoleObserver::new(std::io::stdout()))
        .map_err(|err| CliError::new(format!("evaluation failed: {err}")))?;
    write_stdout(&render_report(&report))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&format!("Report saved to: {}", paths.report.display()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(report)
}

/// Maps a report to the process exit code.
fn exit_for(report: &Report, fail_on_error: bool) -> ExitCode {
    if fail_on_error && !report.is_clean() { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes text to stdout without adding a newline.
fn write_stdout(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(text.as_bytes())
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
