//! Rendering of a scenario sequence into the sample's sequence script.
//!
//! Each scenario becomes a `SEQUENCE "<name>"` line, followed by one line with
//! its arguments when it has any:
//!
//! ```text
//! SEQUENCE "init"
//! SEQUENCE "opaque_msaa4"
//! --percentTransparent 0 --aaType 1
//! ```

use crate::scenario::{Scenario, ScenarioSequence};
use std::fmt;

/// Keyword that opens a scenario block.
pub const SEQUENCE_KEYWORD: &str = "SEQUENCE";

/// Serialized sequence script, ready to hand to the sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script(String);

impl Script {
    /// Render a sequence. Pure: equal sequences give byte-identical scripts.
    pub fn render(sequence: &ScenarioSequence) -> Self {
        let mut text = String::new();
        for scenario in sequence {
            write_scenario(&mut text, scenario);
        }
        Script(text)
    }

    /// Script text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no scenarios were rendered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorthand for [`Script::render`].
pub fn serialize(sequence: &ScenarioSequence) -> Script {
    Script::render(sequence)
}

fn write_scenario(out: &mut String, scenario: &Scenario) {
    out.push_str(SEQUENCE_KEYWORD);
    out.push_str(" \"");
    out.push_str(scenario.name());
    out.push_str("\"\n");

    if scenario.arguments().is_empty() {
        return;
    }
    let line: Vec<String> = scenario.arguments().iter().map(|a| a.to_string()).collect();
    out.push_str(&line.join(" "));
    out.push('\n');
}
