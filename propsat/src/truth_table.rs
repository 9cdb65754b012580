//! Recursive truth-table search over partial assignments (spec.md §4.2).
use log::debug;

use propsat_formula::{CnfFormula, Lit, Var};

use crate::assignment::Assignment;
use crate::error::EngineError;
use crate::trace::Trace;
use crate::util::{eval_formula, var_name};
use crate::verdict::{Model, Verdict};

/// Configuration for the truth-table engine.
#[derive(Debug, Clone, Copy)]
pub struct TruthTableConfig {
    /// Only evaluate the clause set at leaves (total assignments), never at internal
    /// nodes. When `false` (the default), every partial assignment is evaluated and a
    /// branch is cut as soon as it is determined, per spec.md §4.2.
    pub leaves_only: bool,
}

impl Default for TruthTableConfig {
    fn default() -> TruthTableConfig {
        TruthTableConfig { leaves_only: false }
    }
}

/// Decide satisfiability by recursive enumeration of partial assignments.
pub fn solve(
    formula: &CnfFormula,
    config: &TruthTableConfig,
    names: Option<&[String]>,
    trace: &mut Trace,
) -> Result<Verdict, EngineError> {
    let var_count = formula.var_count();
    let clauses: Vec<Vec<Lit>> = formula.iter().map(|clause| clause.to_vec()).collect();

    let mut assignment = Assignment::with_var_count(var_count);

    debug!(
        "truth table search over {} variables, {} clauses, leaves_only={}",
        var_count,
        clauses.len(),
        config.leaves_only
    );

    let sat = search(&clauses, &mut assignment, 0, config, names, trace, 0);

    trace.enter(0, || format!("result: {}", if sat { "SAT" } else { "UNSAT" }));

    let verdict = if sat {
        Verdict::Sat(Model::Total(assignment.to_total_model()))
    } else {
        Verdict::Unsat
    };

    Ok(verdict)
}

/// Recursive search step.
///
/// Returns `true` iff a satisfying total extension of `assignment` exists; on success
/// `assignment` holds that extension (possibly partial, when a node-mode short circuit
/// found satisfaction before every variable was assigned).
fn search(
    clauses: &[Vec<Lit>],
    assignment: &mut Assignment,
    var_index: usize,
    config: &TruthTableConfig,
    names: Option<&[String]>,
    trace: &mut Trace,
    depth: usize,
) -> bool {
    trace.stats.max_depth = trace.stats.max_depth.max(depth as u64);

    if !config.leaves_only {
        trace.stats.evaluations += 1;
        match eval_formula(clauses, assignment) {
            Some(true) => {
                trace.enter(depth, || "partial assignment already satisfies".to_string());
                return true;
            }
            Some(false) => {
                trace.enter(depth, || "partial assignment already falsifies".to_string());
                return false;
            }
            None => {}
        }
    }

    if var_index == assignment.var_count() {
        trace.stats.leaves += 1;
        if config.leaves_only {
            trace.stats.evaluations += 1;
        }
        return eval_formula(clauses, assignment) == Some(true);
    }

    let var = Var::from_index(var_index);

    for &value in &[true, false] {
        assignment.assign_var(var, value);
        trace.enter(depth, || {
            format!("try {} = {}", var_name(names, var), value)
        });
        if search(
            clauses,
            assignment,
            var_index + 1,
            config,
            names,
            trace,
            depth + 1,
        ) {
            return true;
        }
    }

    assignment.unassign(var);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TraceFormat;
    use propsat_formula::cnf_formula;

    fn run(formula: &CnfFormula, config: TruthTableConfig) -> Verdict {
        let mut trace = Trace::new(TraceFormat::Plain, false);
        solve(formula, &config, None, &mut trace).unwrap()
    }

    #[test]
    fn scenario_1_unsat() {
        let formula = cnf_formula![-1, 2; 1; -2;];
        assert_eq!(
            run(&formula, TruthTableConfig::default()),
            Verdict::Unsat
        );
    }

    #[test]
    fn scenario_2_sat_forces_model() {
        let formula = cnf_formula![-1, 2; 1;];
        match run(&formula, TruthTableConfig::default()) {
            Verdict::Sat(model) => {
                assert_eq!(model.value(Var::from_dimacs(1)), Some(true));
                assert_eq!(model.value(Var::from_dimacs(2)), Some(true));
            }
            Verdict::Unsat => panic!("expected SAT"),
        }
    }

    #[test]
    fn scenario_3_pigeonhole_unsat() {
        let formula = cnf_formula![1, 2; -1, 2; 1, -2; -1, -2;];
        assert_eq!(
            run(&formula, TruthTableConfig::default()),
            Verdict::Unsat
        );
    }

    #[test]
    fn scenario_5_sat() {
        let formula = cnf_formula![1, -2, 3; -1, 2, -3; -1, -2, 3; 1, 2, -3;];
        assert!(run(&formula, TruthTableConfig::default()).is_sat());
    }

    #[test]
    fn leaves_only_agrees_with_node_mode() {
        let formula = cnf_formula![1, 2, 3; -1; -2; -3;];
        let nodes = run(
            &formula,
            TruthTableConfig { leaves_only: false },
        );
        let leaves = run(&formula, TruthTableConfig { leaves_only: true });
        assert_eq!(nodes, leaves);
    }

    #[test]
    fn soundness_of_sat_witness() {
        let formula = cnf_formula![1, -2, 3; -1, 2, -3; -1, -2, 3; 1, 2, -3;];
        if let Verdict::Sat(model) = run(&formula, TruthTableConfig::default()) {
            for clause in formula.iter() {
                assert!(clause.iter().any(|&lit| model.lit_value(lit) == Some(true)));
            }
        } else {
            panic!("expected SAT");
        }
    }
}
