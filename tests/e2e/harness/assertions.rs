use super::workspace::StubWorkspace;
use anyhow::{anyhow, bail, Result};
use oit_smoke_core::{ExecutionOutcome, Script, ScriptDelivery};

/// Declarative expectations on a finished run
#[derive(Debug, Clone)]
pub enum Expectation {
    // Outcome
    ExitStatus(u8),
    DiagnosticContains(String),

    // What the stub received
    StubNotLaunched,
    WindowSize { width: u32, height: u32 },
    Delivery(ScriptDelivery),
    FlagPresent(String),
    ScriptReceivedVerbatim,
}

/// Everything an expectation may look at
pub struct CaseOutput<'a> {
    pub outcome: &'a ExecutionOutcome,
    pub script: &'a Script,
    pub workspace: &'a StubWorkspace,
}

impl CaseOutput<'_> {
    fn args(&self) -> Result<Vec<String>> {
        self.workspace
            .recorded_args()?
            .ok_or_else(|| anyhow!("Stub was never launched"))
    }

    fn received_script(&self) -> Result<String> {
        if let Some(content) = self.workspace.recorded_sequence_file()? {
            return Ok(content);
        }
        let args = self.args()?;
        args.get(4)
            .cloned()
            .ok_or_else(|| anyhow!("Stub got no script argument: {:?}", args))
    }
}

impl Expectation {
    /// Check this expectation, returning a descriptive error on mismatch
    pub fn check(&self, output: &CaseOutput<'_>) -> Result<()> {
        match self {
            Expectation::ExitStatus(expected) => {
                let actual = output.outcome.exit_status();
                if actual != *expected {
                    bail!(
                        "Expected exit status {}, got {} ({:?})",
                        expected,
                        actual,
                        output.outcome
                    );
                }
            }
            Expectation::DiagnosticContains(text) => {
                let diagnostic = output
                    .outcome
                    .diagnostic()
                    .ok_or_else(|| anyhow!("Run succeeded, no diagnostic"))?;
                if !diagnostic.contains(text.as_str()) {
                    bail!("Diagnostic {:?} does not contain {:?}", diagnostic, text);
                }
            }
            Expectation::StubNotLaunched => {
                if output.workspace.recorded_args()?.is_some() {
                    bail!("Stub was launched");
                }
            }
            Expectation::WindowSize { width, height } => {
                let args = output.args()?;
                let expected = ["--windowSize".to_string(), width.to_string(), height.to_string()];
                if args.len() < 3 || args[..3] != expected {
                    bail!("Expected {:?} first, got {:?}", expected, args);
                }
            }
            Expectation::Delivery(delivery) => {
                let by_file = output.workspace.recorded_sequence_file()?.is_some();
                let actual = if by_file {
                    ScriptDelivery::File
                } else {
                    ScriptDelivery::Inline
                };
                if actual != *delivery {
                    bail!("Expected {:?} delivery, got {:?}", delivery, actual);
                }
            }
            Expectation::FlagPresent(flag) => {
                let args = output.args()?;
                if !args.iter().any(|a| a == flag) {
                    bail!("Flag {} missing from {:?}", flag, args);
                }
            }
            Expectation::ScriptReceivedVerbatim => {
                let received = output.received_script()?;
                if received != output.script.as_str() {
                    bail!(
                        "Script differs: sent {} bytes, stub got {} bytes",
                        output.script.len(),
                        received.len()
                    );
                }
            }
        }
        Ok(())
    }
}
