//! Property tests for the testable properties in spec.md §8, run across the
//! independent engine families via their uniform `solve` entry point.
use proptest::prelude::*;

use propsat::dpll::{classical, naive as dpll_naive, watched};
use propsat::resolution::{naive as resolution_naive, optimized};
use propsat::trace::{Trace, TraceFormat};
use propsat::truth_table;
use propsat::verdict::{Model, Verdict};
use propsat_formula::cnf_formula;
use propsat_formula::test::{conditional_pigeon_hole, sat_formula, sgen_unsat_formula};
use propsat_formula::CnfFormula;

fn no_trace() -> Trace {
    Trace::new(TraceFormat::Plain, false)
}

/// Run every engine on `formula` and return their verdicts in a fixed order:
/// truth-table, naive DPLL, classical DPLL, watched DPLL, naive resolution, optimized
/// resolution.
fn run_all(formula: &CnfFormula) -> Vec<Verdict> {
    vec![
        truth_table::solve(
            formula,
            &truth_table::TruthTableConfig::default(),
            None,
            &mut no_trace(),
        )
        .unwrap(),
        dpll_naive::solve(
            formula,
            &dpll_naive::NaiveDpllConfig::default(),
            None,
            &mut no_trace(),
        )
        .unwrap(),
        classical::solve(
            formula,
            &classical::ClassicalDpllConfig::default(),
            None,
            &mut no_trace(),
        )
        .unwrap(),
        watched::solve(
            formula,
            &watched::WatchedDpllConfig::default(),
            None,
            &mut no_trace(),
        )
        .unwrap(),
        resolution_naive::solve(
            formula,
            &resolution_naive::NaiveResolutionConfig::default(),
            None,
            &mut no_trace(),
        )
        .unwrap(),
        optimized::solve(
            formula,
            &optimized::OptimizedResolutionConfig::default(),
            None,
            &mut no_trace(),
        )
        .unwrap(),
    ]
}

fn assert_model_satisfies(formula: &CnfFormula, model: &Model) {
    for clause in formula.iter() {
        let satisfied = clause
            .iter()
            .any(|&lit| model.lit_value(lit) == Some(true));
        assert!(satisfied, "clause {:?} not satisfied by {:?}", clause, model);
    }
}

proptest! {
    /// Property 1 + property 4: every engine that reports SAT on a formula built to be
    /// satisfiable produces a witness that actually satisfies every clause, and every
    /// engine agrees it is satisfiable.
    #[test]
    fn sat_witnesses_are_sound_and_agree(
        formula in sat_formula(1..=8usize, 1..=20usize, 0.2..=0.6, 0.3..=0.7),
    ) {
        for verdict in run_all(&formula) {
            prop_assert!(verdict.is_sat());
            if let Some(model) = verdict.model() {
                if !matches!(model, Model::Bare) {
                    assert_model_satisfies(&formula, model);
                }
            }
        }
    }

    /// Property 2 + property 4: a formula from the sgen unsat family is reported UNSAT
    /// by every engine, cross-checked against the truth-table engine's exhaustive
    /// enumeration.
    #[test]
    fn unsat_family_agrees_with_truth_table(blocks in 1..=2usize) {
        let formula = sgen_unsat_formula(Just(blocks))
            .new_tree(&mut proptest::test_runner::TestRunner::default())
            .unwrap()
            .current();

        let oracle = truth_table::solve(
            &formula,
            &truth_table::TruthTableConfig::default(),
            None,
            &mut no_trace(),
        )
        .unwrap();
        prop_assert!(oracle.is_unsat());

        for verdict in run_all(&formula) {
            prop_assert_eq!(verdict.is_unsat(), oracle.is_unsat());
        }
    }

    /// Property 6 (renaming invariance, restricted case): negating every occurrence of
    /// a single fixed variable does not change any engine's verdict.
    #[test]
    fn negating_a_variable_preserves_verdict(
        formula in sat_formula(2..=6usize, 1..=15usize, 0.3..=0.6, 0.5..=0.5),
    ) {
        let flipped: CnfFormula = CnfFormula::from(formula.iter().map(|clause| {
            clause
                .iter()
                .map(|&lit| if lit.var().index() == 0 { !lit } else { lit })
                .collect::<Vec<_>>()
        }));

        let before = run_all(&formula);
        let after = run_all(&flipped);

        for (a, b) in before.iter().zip(after.iter()) {
            prop_assert_eq!(a.is_sat(), b.is_sat());
        }
    }

    /// Property 5: every literal in the optimized resolution engine's model (whether
    /// partial or total) is consistent with a satisfying completion of the formula.
    #[test]
    fn optimized_resolution_model_extends_to_a_satisfying_assignment(
        formula in sat_formula(1..=8usize, 1..=20usize, 0.2..=0.6, 0.3..=0.7),
    ) {
        let verdict = optimized::solve(
            &formula,
            &optimized::OptimizedResolutionConfig::default(),
            None,
            &mut no_trace(),
        )
        .unwrap();

        prop_assert!(verdict.is_sat());
        if let Some(model) = verdict.model() {
            for clause in formula.iter() {
                let satisfied = clause.iter().any(|&lit| {
                    model.lit_value(lit).unwrap_or(true)
                });
                prop_assert!(satisfied);
            }
        }
    }

    /// Property 4 over the conditional pigeonhole family, which is satisfiable once
    /// enough of the "extra" condition literals are false.
    #[test]
    fn conditional_pigeon_hole_agrees_across_engines(columns in 1..=3usize, extra_rows in 0..=1usize) {
        let (_conditions, _columns, formula) = conditional_pigeon_hole(Just(columns), Just(extra_rows))
            .new_tree(&mut proptest::test_runner::TestRunner::default())
            .unwrap()
            .current();

        let verdicts = run_all(&formula);
        let first = verdicts[0].is_sat();
        for verdict in &verdicts[1..] {
            prop_assert_eq!(verdict.is_sat(), first);
        }
    }
}

#[test]
fn tautology_idempotence_optimized_resolution() {
    let without = cnf_formula![1; -1, 2;];
    let with_tautology = cnf_formula![1; -1, 2; 3, -3;];

    let verdict_without = optimized::solve(
        &without,
        &optimized::OptimizedResolutionConfig::default(),
        None,
        &mut no_trace(),
    )
    .unwrap();
    let verdict_with = optimized::solve(
        &with_tautology,
        &optimized::OptimizedResolutionConfig::default(),
        None,
        &mut no_trace(),
    )
    .unwrap();

    assert_eq!(verdict_without.is_sat(), verdict_with.is_sat());
}

#[test]
fn subsumption_idempotence_optimized_resolution() {
    // {1} subsumes {1, 2}; removing the subsumed clause must not change the verdict.
    let with_subsumed = cnf_formula![1; 1, 2; -1, -2;];
    let without_subsumed = cnf_formula![1; -1, -2;];

    let a = optimized::solve(
        &with_subsumed,
        &optimized::OptimizedResolutionConfig::default(),
        None,
        &mut no_trace(),
    )
    .unwrap();
    let b = optimized::solve(
        &without_subsumed,
        &optimized::OptimizedResolutionConfig::default(),
        None,
        &mut no_trace(),
    )
    .unwrap();

    assert_eq!(a.is_sat(), b.is_sat());
}

#[test]
fn repeated_runs_are_deterministic() {
    let formula = cnf_formula![1, -2, 3; -1, 2, -3; -1, -2, 3; 1, 2, -3;];

    let first = watched::solve(
        &formula,
        &watched::WatchedDpllConfig::default(),
        None,
        &mut no_trace(),
    )
    .unwrap();
    let second = watched::solve(
        &formula,
        &watched::WatchedDpllConfig::default(),
        None,
        &mut no_trace(),
    )
    .unwrap();

    assert_eq!(first, second);
}
