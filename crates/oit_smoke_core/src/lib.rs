//! OIT Smoke Core Library
//!
//! Smoke-test harness for the order-independent-transparency sample:
//! - Deterministic enumeration of baseline and matrix scenarios
//! - Rendering of the scenarios into one sequence script
//! - A single sample invocation with normalized pass/fail status
//!
//! # Quick Start
//!
//! ```
//! use oit_smoke_core::{MatrixTables, ScenarioMatrixBuilder, Script};
//!
//! let sequence = ScenarioMatrixBuilder::new(MatrixTables::default()).build();
//! let script = Script::render(&sequence);
//!
//! assert!(script.as_str().starts_with("SEQUENCE \"init\"\n"));
//! assert!(script
//!     .as_str()
//!     .contains("SEQUENCE \"loop64_tail_msaa8\"\n--algorithm 3 --tailBlend 1 --aaType 4\n"));
//! ```
//!
//! # Running
//!
//! [`HarnessRunner::execute`] launches the sample once and folds every kind
//! of failure into [`ExecutionOutcome::Failure`]:
//!
//! ```no_run
//! use oit_smoke_core::{HarnessConfig, HarnessRunner, ScenarioMatrixBuilder, Script};
//!
//! let config = HarnessConfig::load(None).unwrap();
//! let script = Script::render(&ScenarioMatrixBuilder::new(config.matrix.clone()).build());
//! let outcome = HarnessRunner::new(config.runner).execute(&script);
//! assert!(outcome.exit_status() <= 1);
//! ```

mod config;
mod error;
mod runner;
mod scenario;
mod script;

pub use config::{HarnessConfig, RunnerConfig, CONFIG_FILE_NAME, DEFAULT_MAX_COMMAND_LINE};
pub use error::{HarnessError, Result};
pub use runner::{
    ExecutionOutcome, HarnessRunner, Invocation, ScriptDelivery, SEQUENCE_STRING_FLAG,
    WINDOW_SIZE_FLAG,
};
pub use scenario::{
    baseline_scenarios, Argument, MatrixTables, Scenario, ScenarioMatrixBuilder,
    ScenarioSequence, TAIL_NAMES,
};
pub use script::{serialize, Script, SEQUENCE_KEYWORD};
