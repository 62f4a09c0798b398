//! List command - show the scenarios of a run.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::ExitCode;

/// List scenarios as names (text) or full scenarios (json).
pub fn run(config_path: Option<&Path>, format: &str) -> Result<ExitCode> {
    let config = super::load_config(config_path)?;
    let sequence = super::build_sequence(&config);

    match format {
        "json" => {
            let json = sequence.to_json().context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
        "text" => {
            for (i, scenario) in sequence.iter().enumerate() {
                let args: Vec<String> =
                    scenario.arguments().iter().map(|a| a.to_string()).collect();
                println!("{:3}  {:<28} {}", i, scenario.name(), args.join(" "));
            }
            println!();
            println!(
                "{} scenarios ({} baseline, {} matrix)",
                sequence.len(),
                sequence.len() - config.matrix.matrix_len(),
                config.matrix.matrix_len()
            );
        }
        _ => {
            anyhow::bail!("Unsupported format: {}. Use 'json' or 'text'.", format);
        }
    }

    Ok(ExitCode::SUCCESS)
}
