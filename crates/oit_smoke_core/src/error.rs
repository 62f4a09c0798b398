//! Error types for oit_smoke_core operations.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for harness operations.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The sample executable does not exist or is not on PATH.
    #[error("program not found: {}", program.display())]
    ProgramNotFound {
        /// Program that was looked up
        program: PathBuf,
    },

    /// The sample executable exists but could not be spawned.
    #[error("failed to launch {}: {}", program.display(), source)]
    LaunchFailed {
        /// Program that failed to start
        program: PathBuf,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The sample ran and exited with a non-zero status.
    #[error("{} exited with status {code}", program.display())]
    NonZeroExit {
        /// Program that failed
        program: PathBuf,
        /// Raw exit code as reported by the OS
        code: i32,
    },

    /// The sample was terminated without an exit code (e.g. by a signal).
    #[error("{} was terminated{}", program.display(), signal_suffix(signal))]
    Terminated {
        /// Program that was terminated
        program: PathBuf,
        /// Signal number, when the platform reports one
        signal: Option<i32>,
    },

    /// The sample did not finish within the configured timeout and was killed.
    #[error("{} timed out after {timeout_secs}s", program.display())]
    TimedOut {
        /// Program that timed out
        program: PathBuf,
        /// Timeout in seconds
        timeout_secs: u64,
    },

    /// Waiting on the child process failed.
    #[error("failed to wait on {}: {}", program.display(), source)]
    Wait {
        /// Program being waited on
        program: PathBuf,
        /// Underlying wait error
        #[source]
        source: std::io::Error,
    },

    /// I/O error while preparing the sequence file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (loading, parsing, invalid values).
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl HarnessError {
    /// Returns a recovery suggestion for the operator, if one applies.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ProgramNotFound { .. } => Some(
                "Build and install the sample first, or point 'oit-smoke run --program' at the executable.",
            ),
            Self::NonZeroExit { .. } | Self::Terminated { .. } => {
                Some("The sample stops at the first failing scenario; check its output above for the scenario name.")
            }
            Self::TimedOut { .. } => {
                Some("Raise 'timeout_secs' in oit-smoke.toml or pass a larger --timeout.")
            }
            Self::ConfigError(_) => Some("Check oit-smoke.toml for typos or empty lists."),
            _ => None,
        }
    }

    /// Human-readable diagnostic including the recovery suggestion.
    pub fn diagnostic(&self) -> String {
        match self.recovery_suggestion() {
            Some(hint) => format!("{}\n  hint: {}", self, hint),
            None => self.to_string(),
        }
    }
}

fn signal_suffix(signal: &Option<i32>) -> String {
    match signal {
        Some(s) => format!(" by signal {}", s),
        None => String::new(),
    }
}

/// Convenience Result type for oit_smoke_core operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
