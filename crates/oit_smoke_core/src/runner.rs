//! Single-invocation runner for the sample executable.
//!
//! The sample executes the whole script internally and stops at the first
//! failing scenario, so one run is atomic: it either passes or it doesn't.
//! Every way of failing (missing program, non-zero exit, signal, timeout)
//! collapses into [`ExecutionOutcome::Failure`], which always maps to exit
//! status 1. Some CI systems mishandle negative or signal-derived codes, so
//! the raw code is never forwarded.
//!
//! # Example
//!
//! ```no_run
//! use oit_smoke_core::{HarnessRunner, MatrixTables, RunnerConfig, ScenarioMatrixBuilder, Script};
//!
//! let script = Script::render(&ScenarioMatrixBuilder::new(MatrixTables::default()).build());
//! let outcome = HarnessRunner::new(RunnerConfig::default()).execute(&script);
//! std::process::exit(outcome.exit_status().into());
//! ```

use crate::config::RunnerConfig;
use crate::error::{HarnessError, Result};
use crate::script::Script;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, ExitCode, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Flag carrying the whole script inline.
pub const SEQUENCE_STRING_FLAG: &str = "--sequencestring";

/// Flag carrying the window dimensions.
pub const WINDOW_SIZE_FLAG: &str = "--windowSize";

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How the script reaches the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptDelivery {
    /// As a single `--sequencestring` argument.
    Inline,
    /// Through a temporary file named by the sequence-file flag.
    File,
}

/// Result of one harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The sample ran every scenario and exited with status 0.
    Success,
    /// Anything else, with a diagnostic for the operator.
    Failure(String),
}

impl ExecutionOutcome {
    /// Join a run result into an outcome.
    pub fn from_result(result: Result<()>) -> Self {
        match result {
            Ok(()) => ExecutionOutcome::Success,
            Err(e) => ExecutionOutcome::Failure(e.diagnostic()),
        }
    }

    /// True for [`ExecutionOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success)
    }

    /// Diagnostic of a failed run.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            ExecutionOutcome::Success => None,
            ExecutionOutcome::Failure(msg) => Some(msg),
        }
    }

    /// Process exit status: 0 on success, 1 on any failure.
    pub fn exit_status(&self) -> u8 {
        match self {
            ExecutionOutcome::Success => 0,
            ExecutionOutcome::Failure(_) => 1,
        }
    }

    /// Exit status as an [`ExitCode`] for `main`.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// A fully prepared command line. Holds the sequence file, if any, so it
/// outlives the child process.
#[derive(Debug)]
pub struct Invocation {
    args: Vec<OsString>,
    delivery: ScriptDelivery,
    sequence_file: Option<NamedTempFile>,
}

impl Invocation {
    /// Arguments after the program name.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// How the script is delivered.
    pub fn delivery(&self) -> ScriptDelivery {
        self.delivery
    }

    /// Path of the sequence file when delivered by file.
    pub fn sequence_file_path(&self) -> Option<&Path> {
        self.sequence_file.as_ref().map(|f| f.path())
    }
}

/// Runs a script against the sample exactly once.
#[derive(Debug, Clone)]
pub struct HarnessRunner {
    config: RunnerConfig,
}

impl HarnessRunner {
    /// Create a runner.
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Runner configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Estimated length of the command line if `script` were passed inline,
    /// counting the quoting a Windows command line would need.
    pub fn inline_command_line_len(&self, script: &Script) -> usize {
        let mut args = self.leading_args();
        args.push(SEQUENCE_STRING_FLAG.into());
        args.push(script.as_str().into());

        quoted_len(self.config.program.as_os_str())
            + args.iter().map(|a| 1 + quoted_len(a)).sum::<usize>()
    }

    /// Decide how `script` is delivered.
    pub fn plan_delivery(&self, script: &Script) -> ScriptDelivery {
        let len = self.inline_command_line_len(script);
        if len > self.config.max_command_line {
            debug!(
                len,
                limit = self.config.max_command_line,
                "Command line too long, delivering script by file"
            );
            ScriptDelivery::File
        } else {
            ScriptDelivery::Inline
        }
    }

    /// Build the argument list, writing the sequence file if needed.
    pub fn prepare(&self, script: &Script) -> Result<Invocation> {
        let delivery = self.plan_delivery(script);
        let mut args = self.leading_args();

        let sequence_file = match delivery {
            ScriptDelivery::Inline => {
                args.push(SEQUENCE_STRING_FLAG.into());
                args.push(script.as_str().into());
                None
            }
            ScriptDelivery::File => {
                let mut file = tempfile::Builder::new()
                    .prefix("oit-smoke-")
                    .suffix(".txt")
                    .tempfile()?;
                file.write_all(script.as_str().as_bytes())?;
                file.flush()?;
                debug!(path = %file.path().display(), "Wrote sequence file");

                args.push(self.config.sequence_file_flag.as_str().into());
                args.push(file.path().as_os_str().to_owned());
                Some(file)
            }
        };

        Ok(Invocation {
            args,
            delivery,
            sequence_file,
        })
    }

    /// Run the sample once and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns error if the sample can't be launched, exits non-zero, is
    /// terminated by a signal, or exceeds the configured timeout.
    pub fn run(&self, script: &Script) -> Result<()> {
        let invocation = self.prepare(script)?;
        let program = &self.config.program;

        info!(
            program = %program.display(),
            delivery = ?invocation.delivery(),
            script_bytes = script.len(),
            "Launching sample"
        );

        let mut child = Command::new(program)
            .args(invocation.args())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HarnessError::ProgramNotFound {
                        program: program.clone(),
                    }
                } else {
                    HarnessError::LaunchFailed {
                        program: program.clone(),
                        source: e,
                    }
                }
            })?;

        let status = self.wait(&mut child)?;
        drop(invocation);
        self.check_status(status)
    }

    /// Run the sample and normalize the result. Never panics on failure.
    pub fn execute(&self, script: &Script) -> ExecutionOutcome {
        let outcome = ExecutionOutcome::from_result(self.run(script));
        match &outcome {
            ExecutionOutcome::Success => info!("All scenarios passed"),
            ExecutionOutcome::Failure(diagnostic) => debug!("Run failed: {}", diagnostic),
        }
        outcome
    }

    fn leading_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = self
            .config
            .program_args
            .iter()
            .map(OsString::from)
            .collect();
        args.push(WINDOW_SIZE_FLAG.into());
        args.push(self.config.window_width.to_string().into());
        args.push(self.config.window_height.to_string().into());
        args
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let wait_error = |source| HarnessError::Wait {
            program: self.config.program.clone(),
            source,
        };

        let timeout = match self.config.timeout() {
            Some(t) => t,
            None => return child.wait().map_err(wait_error),
        };

        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait().map_err(wait_error)? {
                return Ok(status);
            }
            if start.elapsed() >= timeout {
                warn!(timeout_secs = timeout.as_secs(), "Sample timed out, killing it");
                if let Err(e) = child.kill() {
                    warn!("Failed to kill timed-out sample: {}", e);
                }
                if let Err(e) = child.wait() {
                    warn!("Failed to reap timed-out sample: {}", e);
                }
                return Err(HarnessError::TimedOut {
                    program: self.config.program.clone(),
                    timeout_secs: timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn check_status(&self, status: ExitStatus) -> Result<()> {
        if status.success() {
            return Ok(());
        }
        let program = self.config.program.clone();
        match status.code() {
            Some(code) => Err(HarnessError::NonZeroExit { program, code }),
            None => Err(HarnessError::Terminated {
                program,
                signal: termination_signal(&status),
            }),
        }
    }
}

fn quoted_len(arg: &OsStr) -> usize {
    let text = arg.to_string_lossy();
    let escapes = text.chars().filter(|c| *c == '"').count();
    let needs_quotes = text.is_empty() || text.chars().any(char::is_whitespace);
    text.len() + escapes + if needs_quotes { 2 } else { 0 }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}
