use oit_smoke_core::{
    baseline_scenarios, MatrixTables, ScenarioMatrixBuilder, Script, TAIL_NAMES,
};
use std::collections::HashSet;

fn tables(algorithms: usize, aa_modes: usize) -> MatrixTables {
    MatrixTables {
        algorithms: (0..algorithms).map(|i| format!("alg{}", i)).collect(),
        aa_modes: (0..aa_modes).map(|i| format!("aa{}", i)).collect(),
    }
}

#[test]
fn test_matrix_has_unique_names_for_any_table_size() {
    for algorithms in 1..=5 {
        for aa_modes in 1..=4 {
            let sequence = ScenarioMatrixBuilder::new(tables(algorithms, aa_modes)).build();
            let baseline = baseline_scenarios().len();
            assert_eq!(sequence.len(), baseline + algorithms * 2 * aa_modes);

            let names: HashSet<&str> = sequence.names().into_iter().collect();
            assert_eq!(names.len(), sequence.len());
        }
    }
}

#[test]
fn test_default_run_has_93_scenarios() {
    let sequence = ScenarioMatrixBuilder::new(MatrixTables::default()).build();
    assert_eq!(sequence.len(), 93);
    assert!(sequence.duplicate_names().is_empty());
}

/// Every matrix name decodes back to the indices in its arguments
#[test]
fn test_matrix_names_agree_with_arguments() {
    let tables = MatrixTables::default();
    let sequence = ScenarioMatrixBuilder::new(tables.clone()).build();

    for scenario in sequence.iter().skip(baseline_scenarios().len()) {
        let index = |flag: &str| -> usize { scenario.argument(flag).unwrap().parse().unwrap() };
        let expected = format!(
            "{}_{}_{}",
            tables.algorithms[index("--algorithm")],
            TAIL_NAMES[index("--tailBlend")],
            tables.aa_modes[index("--aaType")]
        );
        assert_eq!(scenario.name(), expected);
    }
}

#[test]
fn test_matrix_order_is_algorithm_tail_aa() {
    let sequence = ScenarioMatrixBuilder::new(MatrixTables::default()).build();
    let keys: Vec<(usize, usize, usize)> = sequence
        .iter()
        .skip(baseline_scenarios().len())
        .map(|s| {
            (
                s.argument("--algorithm").unwrap().parse().unwrap(),
                s.argument("--tailBlend").unwrap().parse().unwrap(),
                s.argument("--aaType").unwrap().parse().unwrap(),
            )
        })
        .collect();

    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(keys.first(), Some(&(0, 0, 0)));
    assert_eq!(keys.last(), Some(&(6, 1, 5)));
}

#[test]
fn test_loop64_tail_msaa8() {
    let sequence = ScenarioMatrixBuilder::new(MatrixTables::default()).build();
    let scenario = sequence.get("loop64_tail_msaa8").unwrap();
    assert_eq!(scenario.argument("--algorithm"), Some("3"));
    assert_eq!(scenario.argument("--tailBlend"), Some("1"));
    assert_eq!(scenario.argument("--aaType"), Some("4"));
}

#[test]
fn test_two_builds_serialize_identically() {
    let first = Script::render(&ScenarioMatrixBuilder::new(MatrixTables::default()).build());
    let second = Script::render(&ScenarioMatrixBuilder::new(MatrixTables::default()).build());
    assert_eq!(first.as_str().as_bytes(), second.as_str().as_bytes());
}

#[test]
fn test_init_runs_first_with_sample_defaults() {
    let sequence = ScenarioMatrixBuilder::new(tables(1, 1)).build();
    assert_eq!(sequence.first().name(), "init");
    assert!(sequence.first().arguments().is_empty());
    assert!(Script::render(&sequence)
        .as_str()
        .starts_with("SEQUENCE \"init\"\nSEQUENCE \"interlock_unordered\"\n"));
}
