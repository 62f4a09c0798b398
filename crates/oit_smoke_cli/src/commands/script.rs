//! Script command - print the sequence script.

use anyhow::Result;
use oit_smoke_core::Script;
use std::path::Path;
use std::process::ExitCode;

/// Print the script a run would hand to the sample.
pub fn run(config_path: Option<&Path>) -> Result<ExitCode> {
    let config = super::load_config(config_path)?;
    let script = Script::render(&super::build_sequence(&config));
    print!("{}", script);
    Ok(ExitCode::SUCCESS)
}
