//! Classical DPLL: occurrence buckets, pure-literal elimination, weighted branching
//! (spec.md §4.6).
use std::collections::VecDeque;

use log::debug;

use propsat_formula::{CnfFormula, Lit, Var};

use crate::assignment::Assignment;
use crate::dpll::{classify_clause, length_bonus, ClauseStatus};
use crate::error::EngineError;
use crate::trace::Trace;
use crate::util::var_name;
use crate::verdict::{Model, Verdict};

/// Configuration for the classical DPLL engine. No knobs; present for a uniform
/// entry-point shape across engines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalDpllConfig;

struct Buckets {
    pos: Vec<Vec<usize>>,
    neg: Vec<Vec<usize>>,
}

fn build_buckets(clauses: &[Vec<Lit>], var_count: usize) -> Buckets {
    let mut pos = vec![Vec::new(); var_count];
    let mut neg = vec![Vec::new(); var_count];
    for (id, clause) in clauses.iter().enumerate() {
        for &lit in clause {
            if lit.is_positive() {
                pos[lit.var().index()].push(id);
            } else {
                neg[lit.var().index()].push(id);
            }
        }
    }
    Buckets { pos, neg }
}

/// Decide satisfiability with occurrence-indexed propagation, immediate reuse of
/// derived units, pure-literal elimination and weighted variable selection.
pub fn solve(
    formula: &CnfFormula,
    _config: &ClassicalDpllConfig,
    names: Option<&[String]>,
    trace: &mut Trace,
) -> Result<Verdict, EngineError> {
    if let Some(names) = names {
        let need = formula.var_count() + 1;
        if names.len() < need {
            return Err(EngineError::NamesTooShort {
                got: names.len(),
                need,
            });
        }
    }

    let clauses: Vec<Vec<Lit>> = formula.iter().map(|clause| clause.to_vec()).collect();
    let var_count = formula.var_count();
    let buckets = build_buckets(&clauses, var_count);
    let mut assignment = Assignment::with_var_count(var_count);

    debug!(
        "classical dpll over {} variables, {} clauses",
        var_count,
        clauses.len()
    );

    for clause in &clauses {
        if clause.len() == 1 {
            if propagate(clause[0], &clauses, &buckets, &mut assignment, trace).is_none() {
                trace.enter(0, || "result: UNSAT".to_string());
                return Ok(Verdict::Unsat);
            }
        }
    }

    let sat = search(&clauses, &buckets, &mut assignment, names, trace, 0);

    trace.enter(0, || format!("result: {}", if sat { "SAT" } else { "UNSAT" }));

    let verdict = if sat {
        Verdict::Sat(Model::Total(assignment.to_total_model()))
    } else {
        Verdict::Unsat
    };

    Ok(verdict)
}

/// Assign `start` and propagate through the occurrence buckets opposite to each newly
/// derived literal's polarity, to a fixpoint. Returns the set of variables this call
/// assigned on success, `None` on conflict (with every assignment it made undone).
fn propagate(
    start: Lit,
    clauses: &[Vec<Lit>],
    buckets: &Buckets,
    assignment: &mut Assignment,
    trace: &mut Trace,
) -> Option<Vec<Var>> {
    match assignment.lit_value(start) {
        Some(true) => return Some(Vec::new()),
        Some(false) => return None,
        None => {}
    }

    assignment.assign_lit(start);
    let mut assigned = vec![start.var()];
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(lit) = queue.pop_front() {
        let opposite = !lit;
        let ids = if opposite.is_positive() {
            &buckets.pos[opposite.var().index()]
        } else {
            &buckets.neg[opposite.var().index()]
        };

        for &id in ids {
            match classify_clause(&clauses[id], assignment) {
                ClauseStatus::Conflict => {
                    for &var in &assigned {
                        assignment.unassign(var);
                    }
                    return None;
                }
                ClauseStatus::Unit(unit_lit) => match assignment.lit_value(unit_lit) {
                    Some(true) => {}
                    Some(false) => {
                        for &var in &assigned {
                            assignment.unassign(var);
                        }
                        return None;
                    }
                    None => {
                        assignment.assign_lit(unit_lit);
                        assigned.push(unit_lit.var());
                        queue.push_back(unit_lit);
                        trace.stats.unit_propagations += 1;
                        trace.stats.units_derived += 1;
                    }
                },
                ClauseStatus::Satisfied | ClauseStatus::Other => {}
            }
        }
    }

    Some(assigned)
}

enum Selection {
    Pure(Lit),
    Branch(Var),
    Conflict,
    Done,
}

/// Scan the not-yet-satisfied clauses once to find a pure literal (no split needed) or
/// else the highest-scoring unassigned variable, ties broken by smallest index
/// (spec.md §4.6). A clause with no unassigned literals left that isn't satisfied
/// (including the empty clause, which never has one) is a conflict, not a reason to
/// stop: it falsifies the whole formula regardless of what else is unassigned.
fn select_variable(clauses: &[Vec<Lit>], assignment: &Assignment) -> Selection {
    let var_count = assignment.var_count();
    let mut polarity: Vec<Option<bool>> = vec![None; var_count];
    let mut mixed = vec![false; var_count];
    let mut scores = vec![0.0f64; var_count];
    let mut any_unsatisfied = false;

    for clause in clauses {
        match classify_clause(clause, assignment) {
            ClauseStatus::Satisfied => continue,
            ClauseStatus::Conflict => return Selection::Conflict,
            ClauseStatus::Unit(_) | ClauseStatus::Other => {}
        }
        any_unsatisfied = true;

        let bonus = length_bonus(clause.len());
        for &lit in clause {
            if assignment.lit_value(lit).is_some() {
                continue;
            }
            let idx = lit.var().index();
            scores[idx] += bonus;
            match polarity[idx] {
                None => polarity[idx] = Some(lit.is_positive()),
                Some(p) if p != lit.is_positive() => mixed[idx] = true,
                _ => {}
            }
        }
    }

    if !any_unsatisfied {
        return Selection::Done;
    }

    for idx in 0..var_count {
        if assignment.values()[idx].is_none() && !mixed[idx] {
            if let Some(p) = polarity[idx] {
                return Selection::Pure(Var::from_index(idx).lit(p));
            }
        }
    }

    let mut best: Option<(usize, f64)> = None;
    for idx in 0..var_count {
        if assignment.values()[idx].is_some() || polarity[idx].is_none() {
            continue;
        }
        match best {
            None => best = Some((idx, scores[idx])),
            Some((_, best_score)) if scores[idx] > best_score => best = Some((idx, scores[idx])),
            _ => {}
        }
    }

    match best {
        Some((idx, _)) => Selection::Branch(Var::from_index(idx)),
        None => Selection::Done,
    }
}

fn search(
    clauses: &[Vec<Lit>],
    buckets: &Buckets,
    assignment: &mut Assignment,
    names: Option<&[String]>,
    trace: &mut Trace,
    depth: usize,
) -> bool {
    trace.stats.max_depth = trace.stats.max_depth.max(depth as u64);

    match select_variable(clauses, assignment) {
        Selection::Done => true,
        Selection::Conflict => false,
        Selection::Pure(lit) => {
            trace.stats.pure_derivations += 1;
            trace.enter(depth, || {
                format!("pure literal {}", var_name(names, lit.var()))
            });
            match propagate(lit, clauses, buckets, assignment, trace) {
                None => false,
                Some(assigned) => {
                    if search(clauses, buckets, assignment, names, trace, depth + 1) {
                        true
                    } else {
                        for &var in &assigned {
                            assignment.unassign(var);
                        }
                        false
                    }
                }
            }
        }
        Selection::Branch(var) => {
            for &value in &[true, false] {
                let lit = var.lit(value);
                trace.enter(depth, || format!("try {} = {}", var_name(names, var), value));
                if let Some(assigned) = propagate(lit, clauses, buckets, assignment, trace) {
                    if search(clauses, buckets, assignment, names, trace, depth + 1) {
                        return true;
                    }
                    for &v in &assigned {
                        assignment.unassign(v);
                    }
                }
            }
            false
        }
    }
}
