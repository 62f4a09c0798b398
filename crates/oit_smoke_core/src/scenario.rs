//! Scenario enumeration for the OIT sample smoke test.
//!
//! A run consists of a fixed list of baseline scenarios followed by the full
//! cross product of algorithm, tail blending and antialiasing mode. The order
//! is part of the contract: the sample executes scenarios in list order and
//! stops at the first failure, so two builds from the same tables must yield
//! identical sequences.
//!
//! # Example
//!
//! ```
//! use oit_smoke_core::{MatrixTables, ScenarioMatrixBuilder};
//!
//! let sequence = ScenarioMatrixBuilder::new(MatrixTables::default()).build();
//! assert_eq!(sequence.len(), 93);
//! assert_eq!(sequence.first().name(), "init");
//! ```

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Names of the tail blending dimension, indexed by the `--tailBlend` value.
pub const TAIL_NAMES: [&str; 2] = ["notail", "tail"];

/// A single `--flag value` pair passed to the sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Flag including its leading dashes (e.g. `--aaType`).
    pub flag: String,
    /// Value exactly as it appears on the argument line.
    pub value: String,
}

impl Argument {
    /// Create an argument from a flag and any displayable value.
    pub fn new(flag: &str, value: impl fmt::Display) -> Self {
        Self {
            flag: flag.to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.flag, self.value)
    }
}

/// A named test case executed by the sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    name: String,
    arguments: Vec<Argument>,
}

impl Scenario {
    /// Create a scenario without arguments (runs with the sample's defaults).
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            arguments: Vec::new(),
        }
    }

    /// Append an argument.
    pub fn arg(mut self, flag: &str, value: impl fmt::Display) -> Self {
        self.arguments.push(Argument::new(flag, value));
        self
    }

    /// Scenario name, unique within a sequence.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments in the order they are passed to the sample.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Value of `flag`, if this scenario sets it.
    pub fn argument(&self, flag: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|a| a.flag == flag)
            .map(|a| a.value.as_str())
    }
}

/// Ordered, non-empty list of scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScenarioSequence {
    scenarios: Vec<Scenario>,
}

impl ScenarioSequence {
    fn from_vec(scenarios: Vec<Scenario>) -> Self {
        debug_assert!(!scenarios.is_empty(), "scenario sequence must not be empty");
        let sequence = Self { scenarios };
        debug_assert!(
            sequence.duplicate_names().is_empty(),
            "duplicate scenario names: {:?}",
            sequence.duplicate_names()
        );
        sequence
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// The first scenario to run.
    pub fn first(&self) -> &Scenario {
        &self.scenarios[0]
    }

    /// Iterate in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }

    /// Look up a scenario by name.
    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Scenario names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }

    /// Names that occur more than once, in order of their second occurrence.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.scenarios
            .iter()
            .map(|s| s.name.as_str())
            .filter(|name| !seen.insert(*name))
            .collect()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HarnessError::ConfigError(format!("failed to serialize scenarios: {}", e)))
    }
}

impl<'a> IntoIterator for &'a ScenarioSequence {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.iter()
    }
}

/// Enumerated dimensions of the scenario matrix.
///
/// A name's position in its list is the index passed to the sample, so the
/// lists must follow the sample's own enum order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixTables {
    /// Transparency algorithms, selected with `--algorithm <index>`.
    pub algorithms: Vec<String>,
    /// Antialiasing modes, selected with `--aaType <index>`.
    pub aa_modes: Vec<String>,
}

impl Default for MatrixTables {
    fn default() -> Self {
        Self {
            algorithms: [
                "simple",
                "linkedlist",
                "loop",
                "loop64",
                "spinlock",
                "interlock",
                "weighted",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            aa_modes: ["noaa", "msaa4", "ssaa4", "super4", "msaa8", "ssaa8"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl MatrixTables {
    /// Reject tables that would produce an empty or ambiguous matrix.
    ///
    /// Names from different dimensions can still combine into the same
    /// scenario name (`a` + `tail_b` vs `a_tail` + `b`), so the full name set
    /// is checked as well.
    pub fn validate(&self) -> Result<()> {
        check_dimension("algorithms", &self.algorithms)?;
        check_dimension("aa_modes", &self.aa_modes)?;

        let mut names: HashSet<String> =
            baseline_scenarios().into_iter().map(|s| s.name).collect();
        for scenario in ScenarioMatrixBuilder::new(self.clone()).matrix_scenarios() {
            if !names.insert(scenario.name.clone()) {
                return Err(HarnessError::ConfigError(format!(
                    "matrix tables produce scenario '{}' more than once",
                    scenario.name
                )));
            }
        }
        Ok(())
    }

    /// Number of matrix scenarios these tables produce.
    pub fn matrix_len(&self) -> usize {
        self.algorithms.len() * TAIL_NAMES.len() * self.aa_modes.len()
    }
}

fn check_dimension(label: &str, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Err(HarnessError::ConfigError(format!(
            "matrix dimension '{}' is empty",
            label
        )));
    }
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(HarnessError::ConfigError(format!(
                "matrix dimension '{}' contains a blank name",
                label
            )));
        }
        // Names end up inside `SEQUENCE "<name>"` lines
        if name.chars().any(|c| c == '"' || c.is_whitespace()) {
            return Err(HarnessError::ConfigError(format!(
                "matrix dimension '{}' name {:?} contains a quote or whitespace",
                label, name
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(HarnessError::ConfigError(format!(
                "matrix dimension '{}' lists '{}' twice",
                label, name
            )));
        }
    }
    Ok(())
}

/// Scenarios that cover behavior the matrix can't reach, starting with a
/// defaults-only `init` run.
pub fn baseline_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("init"),
        Scenario::new("interlock_unordered")
            .arg("--algorithm", 5)
            .arg("--interlockIsOrdered", 0),
        Scenario::new("opaque").arg("--percentTransparent", 0),
        Scenario::new("opaque_msaa4")
            .arg("--percentTransparent", 0)
            .arg("--aaType", 1),
        Scenario::new("opaque_ssaa4")
            .arg("--percentTransparent", 0)
            .arg("--aaType", 2),
        Scenario::new("3objects").arg("--numObjects", 3),
        Scenario::new("lowsubdiv").arg("--subdiv", 2),
        Scenario::new("scaleMin").arg("--scaleMin", "1.0"),
        Scenario::new("scaleWidth").arg("--scaleWidth", "10.0"),
    ]
}

/// Builds the full scenario sequence for one run.
#[derive(Debug, Clone)]
pub struct ScenarioMatrixBuilder {
    tables: MatrixTables,
}

impl ScenarioMatrixBuilder {
    /// Create a builder over the given tables.
    pub fn new(tables: MatrixTables) -> Self {
        Self { tables }
    }

    /// Tables this builder enumerates.
    pub fn tables(&self) -> &MatrixTables {
        &self.tables
    }

    /// Cross product in algorithm -> tail -> antialiasing order.
    pub fn matrix_scenarios(&self) -> Vec<Scenario> {
        let mut scenarios = Vec::with_capacity(self.tables.matrix_len());
        for (algorithm, algorithm_name) in self.tables.algorithms.iter().enumerate() {
            for (tail, tail_name) in TAIL_NAMES.iter().enumerate() {
                for (aa, aa_name) in self.tables.aa_modes.iter().enumerate() {
                    let name = format!("{}_{}_{}", algorithm_name, tail_name, aa_name);
                    scenarios.push(
                        Scenario::new(&name)
                            .arg("--algorithm", algorithm)
                            .arg("--tailBlend", tail)
                            .arg("--aaType", aa),
                    );
                }
            }
        }
        scenarios
    }

    /// Baseline scenarios followed by the matrix.
    pub fn build(&self) -> ScenarioSequence {
        let mut scenarios = baseline_scenarios();
        scenarios.extend(self.matrix_scenarios());
        ScenarioSequence::from_vec(scenarios)
    }
}
