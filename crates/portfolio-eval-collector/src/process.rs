// crates/portfolio-eval-collector/src/process.rs
// ============================================================================
// Module: Bounded Subprocesses
// Description: Runs external tools with a wall-clock bound.
// Purpose: Convert indefinite blocking on build/lint tools into a timeout.
// Dependencies: tempfile, tracing
// ============================================================================

//! ## Overview
//! Tools run with stdin closed and stdout/stderr redirected into anonymous
//! temporary files, so a chatty child can never block on a full pipe while
//! the parent polls for exit. When the bound elapses the child is killed and
//! reaped, and the run reports [`ToolRun::TimedOut`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::process::Child;
use std::process::Command;
use std::process::Stdio;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::warn;

use crate::error::CollectError;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Interval between exit polls.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// SECTION: Tool Spec
// ============================================================================

/// External tool invocation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Program to execute.
    pub program: String,
    /// Program arguments.
    pub args: Vec<String>,
    /// Wall-clock bound.
    pub timeout: Duration,
    /// Number of trailing output characters kept in the payload.
    pub output_tail_chars: usize,
}

impl ToolSpec {
    /// Creates a spec for `program` with the given arguments.
    #[must_use]
    pub fn new(program: &str, args: &[&str], timeout: Duration, output_tail_chars: usize) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            timeout,
            output_tail_chars,
        }
    }

    /// Returns the command line for log messages.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ============================================================================
// SECTION: Tool Run
// ============================================================================

/// Outcome of a bounded tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRun {
    /// The tool exited before the bound.
    Completed {
        /// True when the exit status was zero.
        success: bool,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
    /// The bound elapsed and the tool was killed.
    TimedOut,
}

/// Runs a tool to completion or until its bound elapses.
///
/// # Errors
///
/// Returns [`CollectError::Spawn`] when the program cannot be started and
/// [`CollectError::Io`] when output capture fails.
pub fn run_bounded(spec: &ToolSpec) -> Result<ToolRun, CollectError> {
    let mut stdout = tempfile::tempfile().map_err(|err| CollectError::Io(err.to_string()))?;
    let mut stderr = tempfile::tempfile().map_err(|err| CollectError::Io(err.to_string()))?;
    let mut child = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(redirect(&stdout)?)
        .stderr(redirect(&stderr)?)
        .spawn()
        .map_err(|err| CollectError::Spawn {
            program: spec.program.clone(),
            message: err.to_string(),
        })?;
    debug!(command = %spec.display(), "spawned tool");

    let started = Instant::now();
    let success = loop {
        if let Some(status) = child.try_wait().map_err(|err| CollectError::Io(err.to_string()))? {
            break status.success();
        }
        if started.elapsed() >= spec.timeout {
            warn!(command = %spec.display(), timeout_secs = spec.timeout.as_secs(), "tool timed out");
            terminate(&mut child);
            return Ok(ToolRun::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(ToolRun::Completed {
        success,
        stdout: read_capture(&mut stdout)?,
        stderr: read_capture(&mut stderr)?,
    })
}

/// Kills and reaps a child that overran its bound.
fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Creates a child stdio handle writing into the capture file.
fn redirect(file: &File) -> Result<Stdio, CollectError> {
    file.try_clone().map(Stdio::from).map_err(|err| CollectError::Io(err.to_string()))
}

/// Reads a capture file from the start, replacing invalid UTF-8.
fn read_capture(file: &mut File) -> Result<String, CollectError> {
    let mut bytes = Vec::new();
    file.seek(SeekFrom::Start(0)).map_err(|err| CollectError::Io(err.to_string()))?;
    file.read_to_end(&mut bytes).map_err(|err| CollectError::Io(err.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Returns the last `max_chars` characters of `text`.
#[must_use]
pub fn tail(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    text.char_indices().nth(count - max_chars).map_or("", |(start, _)| &text[start ..])
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::tail;

    #[test]
    fn tail_keeps_short_text() {
        assert_eq!(tail("build ok", 500), "build ok");
    }

    #[test]
    fn tail_counts_characters_not_bytes() {
        assert_eq!(tail("✓✓✓ done", 6), "✓ done");
        assert_eq!(tail("abc", 0), "");
    }
}
