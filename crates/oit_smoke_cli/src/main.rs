//! oit-smoke - smoke test runner for the order-independent-transparency sample.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(name = "oit-smoke")]
#[command(about = "Runs every OIT sample configuration once to check it doesn't crash", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: ./oit-smoke.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Run options, accepted without the `run` keyword
    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all scenarios in one sample invocation (default)
    Run(RunArgs),
    /// Print the sequence script without running it
    Script,
    /// List the scenarios of a run
    List {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Overrides for the [runner] section of the config file.
#[derive(Args, Debug, Default, PartialEq)]
pub struct RunArgs {
    /// Sample executable
    #[arg(long)]
    pub program: Option<PathBuf>,
    /// Argument placed before the harness's own (repeatable)
    #[arg(long = "program-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub program_args: Vec<String>,
    /// Window size passed to the sample
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub window_size: Option<Vec<u32>>,
    /// Longest command line delivered inline before using a sequence file
    #[arg(long)]
    pub max_command_line: Option<usize>,
    /// Flag that hands the sample a sequence file
    #[arg(long, allow_hyphen_values = true)]
    pub sequence_file_flag: Option<String>,
    /// Kill the sample after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Don't print the script before running
    #[arg(short, long)]
    pub quiet: bool,
}

fn main() -> ExitCode {
    // Initialize tracing subscriber
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = dispatch(Cli::parse());
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", style("error:").red().bold(), e);
            ExitCode::from(1)
        }
    }
}

fn dispatch(cli: Cli) -> Result<ExitCode> {
    let config = cli.config;
    let command = match cli.command {
        None => Commands::Run(cli.run),
        Some(command) => {
            if cli.run != RunArgs::default() {
                anyhow::bail!("Run options go after 'run' or without a subcommand");
            }
            command
        }
    };

    match command {
        Commands::Run(args) => commands::run::run(config.as_deref(), &args),
        Commands::Script => commands::script::run(config.as_deref()),
        Commands::List { format } => commands::list::run(config.as_deref(), &format),
    }
}
