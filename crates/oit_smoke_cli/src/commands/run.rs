//! Run command - execute every scenario in one sample invocation.

use crate::RunArgs;
use anyhow::{Context, Result};
use console::style;
use oit_smoke_core::{ExecutionOutcome, HarnessConfig, HarnessRunner, Script, ScriptDelivery};
use std::path::Path;
use std::process::ExitCode;

/// Run the smoke test. Any failure exits with status 1.
pub fn run(config_path: Option<&Path>, args: &RunArgs) -> Result<ExitCode> {
    let mut config = super::load_config(config_path)?;
    apply_overrides(&mut config, args);
    config.validate().context("Invalid run options")?;

    let sequence = super::build_sequence(&config);
    let script = Script::render(&sequence);

    if !args.quiet {
        println!("Script:");
        println!("{}", script);
    }

    let runner = HarnessRunner::new(config.runner);
    if runner.plan_delivery(&script) == ScriptDelivery::File {
        println!(
            "{} command line would exceed {} characters, passing the script by file",
            style("note:").cyan(),
            runner.config().max_command_line
        );
    }

    let outcome = runner.execute(&script);
    match &outcome {
        ExecutionOutcome::Success => {
            println!(
                "{} {}",
                style("✓").green(),
                style(format!("{} scenarios passed", sequence.len())).green()
            );
        }
        ExecutionOutcome::Failure(diagnostic) => {
            println!("{}", diagnostic);
            println!("{} {}", style("×").red(), style("smoke test failed").red().bold());
        }
    }

    Ok(outcome.exit_code())
}

fn apply_overrides(config: &mut HarnessConfig, args: &RunArgs) {
    let runner = &mut config.runner;
    if let Some(program) = &args.program {
        runner.program = program.clone();
    }
    if !args.program_args.is_empty() {
        runner.program_args = args.program_args.clone();
    }
    if let Some([width, height]) = args.window_size.as_deref() {
        runner.window_width = *width;
        runner.window_height = *height;
    }
    if let Some(limit) = args.max_command_line {
        runner.max_command_line = limit;
    }
    if let Some(flag) = &args.sequence_file_flag {
        runner.sequence_file_flag = flag.clone();
    }
    if let Some(timeout) = args.timeout {
        runner.timeout_secs = Some(timeout);
    }
}
