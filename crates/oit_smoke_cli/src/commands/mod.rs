//! CLI commands.

pub mod list;
pub mod run;
pub mod script;

use anyhow::{Context, Result};
use oit_smoke_core::{HarnessConfig, ScenarioMatrixBuilder, ScenarioSequence};
use std::path::Path;

/// Load the config file, or defaults when there is none.
pub fn load_config(path: Option<&Path>) -> Result<HarnessConfig> {
    HarnessConfig::load(path).context("Failed to load configuration")
}

/// Build the scenario sequence for a config.
pub fn build_sequence(config: &HarnessConfig) -> ScenarioSequence {
    ScenarioMatrixBuilder::new(config.matrix.clone()).build()
}
