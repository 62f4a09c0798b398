//! Configuration types for the smoke-test harness.

use crate::error::{HarnessError, Result};
use crate::scenario::MatrixTables;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "oit-smoke.toml";

/// Command-line length limit of the most restrictive supported platform
/// (the Windows command interpreter).
pub const DEFAULT_MAX_COMMAND_LINE: usize = 8191;

/// Complete harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HarnessConfig {
    /// How the sample is launched.
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Dimensions of the scenario matrix.
    #[serde(default)]
    pub matrix: MatrixTables,
}

impl HarnessConfig {
    /// Load configuration from `path`, or from `oit-smoke.toml` in the current
    /// directory when `path` is `None`. A missing default file yields defaults;
    /// a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE_NAME), false),
        };
        if !path.exists() {
            if required {
                return Err(HarnessError::ConfigError(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Ok(HarnessConfig::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| HarnessError::ConfigError(format!("failed to read config: {}", e)))?;
        let config: HarnessConfig = toml::from_str(&content)
            .map_err(|e| HarnessError::ConfigError(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HarnessError::ConfigError(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| HarnessError::ConfigError(format!("failed to write config: {}", e)))?;
        Ok(())
    }

    /// Check values that can't be expressed in the types.
    pub fn validate(&self) -> Result<()> {
        self.matrix.validate()?;
        self.runner.validate()
    }
}

/// Settings for launching the sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    /// Path to the sample executable.
    pub program: PathBuf,

    /// Arguments placed before the harness's own (wrappers, test stubs).
    pub program_args: Vec<String>,

    /// Width of the sample's window (default: 800).
    pub window_width: u32,

    /// Height of the sample's window (default: 512).
    pub window_height: u32,

    /// Longest command line delivered inline; longer scripts go through a
    /// temporary file (default: 8191).
    pub max_command_line: usize,

    /// Flag that hands the sample a script file (default: `--sequencefile`).
    pub sequence_file_flag: String,

    /// Kill the sample after this many seconds. Unset means wait forever.
    pub timeout_secs: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            program_args: Vec::new(),
            window_width: 800,
            window_height: 512,
            max_command_line: DEFAULT_MAX_COMMAND_LINE,
            sequence_file_flag: "--sequencefile".to_string(),
            timeout_secs: None,
        }
    }
}

impl RunnerConfig {
    /// Returns the timeout as a Duration, if set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.program.as_os_str().is_empty() {
            return Err(HarnessError::ConfigError("runner.program is empty".into()));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(HarnessError::ConfigError(format!(
                "window size {}x{} has a zero dimension",
                self.window_width, self.window_height
            )));
        }
        if !self.sequence_file_flag.starts_with('-') {
            return Err(HarnessError::ConfigError(format!(
                "sequence_file_flag '{}' is not a flag",
                self.sequence_file_flag
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(HarnessError::ConfigError(
                "timeout_secs must be positive; remove it to wait forever".into(),
            ));
        }
        Ok(())
    }
}

fn default_program() -> PathBuf {
    let name = if cfg!(windows) {
        "vk_order_independent_transparency.exe"
    } else {
        "vk_order_independent_transparency"
    };
    Path::new("_install").join(name)
}
