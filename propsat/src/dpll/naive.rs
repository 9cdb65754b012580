//! Naive DPLL: recursive split plus full-scan unit propagation (spec.md §4.5).
use log::debug;

use propsat_formula::{CnfFormula, Lit, Var};

use crate::assignment::Assignment;
use crate::dpll::{classify_clause, ClauseStatus};
use crate::error::EngineError;
use crate::trace::Trace;
use crate::util::{eval_formula, var_name};
use crate::verdict::{Model, Verdict};

/// Configuration for the naive DPLL engine. No knobs; present for a uniform entry-point
/// shape across engines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveDpllConfig;

/// Decide satisfiability by recursive splitting with no clause indexing: every
/// propagation step re-scans every clause (spec.md §4.5).
pub fn solve(
    formula: &CnfFormula,
    _config: &NaiveDpllConfig,
    names: Option<&[String]>,
    trace: &mut Trace,
) -> Result<Verdict, EngineError> {
    let clauses: Vec<Vec<Lit>> = formula.iter().map(|clause| clause.to_vec()).collect();
    let mut assignment = Assignment::with_var_count(formula.var_count());

    debug!(
        "naive dpll over {} variables, {} clauses",
        formula.var_count(),
        clauses.len()
    );

    let sat = search(&clauses, &mut assignment, names, trace, 0);

    trace.enter(0, || format!("result: {}", if sat { "SAT" } else { "UNSAT" }));

    let verdict = if sat {
        Verdict::Sat(Model::Total(assignment.to_total_model()))
    } else {
        Verdict::Unsat
    };

    Ok(verdict)
}

/// One recursion frame: propagate to a fixpoint, then split on the first unassigned
/// variable. Returns `true` iff a satisfying extension exists; on failure, every
/// variable this frame assigned (by propagation or by either branch) is restored to
/// Unassigned before returning (spec.md §8 property 11, backtracking restoration).
fn search(
    clauses: &[Vec<Lit>],
    assignment: &mut Assignment,
    names: Option<&[String]>,
    trace: &mut Trace,
    depth: usize,
) -> bool {
    trace.stats.max_depth = trace.stats.max_depth.max(depth as u64);

    let mut assigned_here: Vec<Var> = Vec::new();

    loop {
        let mut unit_lits: Vec<Lit> = Vec::new();
        let mut conflict = false;

        for clause in clauses {
            match classify_clause(clause, assignment) {
                ClauseStatus::Conflict => {
                    conflict = true;
                    break;
                }
                ClauseStatus::Unit(lit) => unit_lits.push(lit),
                ClauseStatus::Satisfied | ClauseStatus::Other => {}
            }
        }

        if conflict {
            debug!("conflict during unit propagation at depth {}", depth);
            for &var in &assigned_here {
                assignment.unassign(var);
            }
            return false;
        }

        if unit_lits.is_empty() {
            break;
        }

        for lit in unit_lits {
            match assignment.lit_value(lit) {
                Some(true) => {}
                Some(false) => {
                    for &var in &assigned_here {
                        assignment.unassign(var);
                    }
                    return false;
                }
                None => {
                    assignment.assign_lit(lit);
                    assigned_here.push(lit.var());
                    trace.stats.unit_propagations += 1;
                    trace.stats.units_derived += 1;
                }
            }
        }
    }

    if eval_formula(clauses, assignment) == Some(true) {
        return true;
    }

    let var = match assignment.first_unassigned() {
        Some(var) => var,
        None => {
            for &var in &assigned_here {
                assignment.unassign(var);
            }
            return false;
        }
    };

    for &value in &[true, false] {
        assignment.assign_var(var, value);
        trace.enter(depth, || format!("try {} = {}", var_name(names, var), value));
        if search(clauses, assignment, names, trace, depth + 1) {
            return true;
        }
        assignment.unassign(var);
    }

    for &var in &assigned_here {
        assignment.unassign(var);
    }
    false
}
