//! Watched-literal DPLL: two watches per clause, VSIDS-like activity, chronological
//! backtracking (spec.md §4.7).
use std::collections::VecDeque;

use log::debug;

use propsat_formula::{CnfFormula, Lit, Var};

use crate::assignment::Assignment;
use crate::dpll::length_bonus;
use crate::error::EngineError;
use crate::merge::UnitIndex;
use crate::trace::Trace;
use crate::util::var_name;
use crate::verdict::{Model, Verdict};

/// Configuration for the watched-literal engine.
#[derive(Debug, Clone, Copy)]
pub struct WatchedDpllConfig {
    /// Run pure-literal elimination and activity shaping before building watches.
    /// Dedup, tautology removal and unit consistency always run regardless of this
    /// flag: those are load-bearing for the watch invariant (a watch can never be a
    /// literal a unit clause has forced false), not an optional cleanup pass. Turning
    /// this off only skips the extra pure-literal fixpoint pass over the survivors.
    pub preprocess: bool,
}

impl Default for WatchedDpllConfig {
    fn default() -> WatchedDpllConfig {
        WatchedDpllConfig { preprocess: true }
    }
}

type ClauseRef = usize;

/// A clause with its two watched literals held in an explicit header, rather than
/// overloading the first two body slots (spec.md §9 "Clause meta-slots").
struct WatchedClause {
    watch: [Lit; 2],
    rest: Vec<Lit>,
}

struct Preprocessed {
    clauses: Vec<WatchedClause>,
    pos: Vec<Vec<ClauseRef>>,
    neg: Vec<Vec<ClauseRef>>,
    assignment: Assignment,
    activities: Vec<f64>,
}

/// Decide satisfiability with two-watched-literal propagation and activity-guided
/// branching.
pub fn solve(
    formula: &CnfFormula,
    config: &WatchedDpllConfig,
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

    debug!(
        "watched-literal dpll over {} variables, {} clauses",
        formula.var_count(),
        formula.len()
    );

    let Preprocessed {
        mut clauses,
        mut pos,
        mut neg,
        mut assignment,
        mut activities,
    } = match preprocess(formula, config) {
        Some(prepped) => prepped,
        None => {
            trace.enter(0, || "result: UNSAT (preprocessing)".to_string());
            return Ok(Verdict::Unsat);
        }
    };

    let sat = search(
        &mut clauses,
        &mut pos,
        &mut neg,
        &mut assignment,
        &mut activities,
        names,
        trace,
        0,
    );

    trace.enter(0, || format!("result: {}", if sat { "SAT" } else { "UNSAT" }));

    let verdict = if sat {
        Verdict::Sat(Model::Total(assignment.to_total_model()))
    } else {
        Verdict::Unsat
    };

    Ok(verdict)
}

fn place_watch(pos: &mut [Vec<ClauseRef>], neg: &mut [Vec<ClauseRef>], lit: Lit, cref: ClauseRef) {
    if lit.is_positive() {
        pos[lit.var().index()].push(cref);
    } else {
        neg[lit.var().index()].push(cref);
    }
}

fn remove_watch(bucket: &mut Vec<ClauseRef>, cref: ClauseRef) {
    if let Some(pos) = bucket.iter().position(|&c| c == cref) {
        bucket.swap_remove(pos);
    }
}

/// Clean up the input (dedup, tautology/unit cutting, pure-literal elimination),
/// collect activities, and place exactly two watches per surviving clause.
///
/// Returns `None` if UNSAT is already decided by preprocessing.
fn preprocess(formula: &CnfFormula, config: &WatchedDpllConfig) -> Option<Preprocessed> {
    let var_count = formula.var_count();
    let mut assignment = Assignment::with_var_count(var_count);
    let mut units = UnitIndex::new();

    let mut working: Vec<Vec<Lit>> = formula.iter().map(|clause| clause.to_vec()).collect();
    working.sort_by_key(|clause| clause.len());

    loop {
        let mut changed = false;
        let mut next: Vec<Vec<Lit>> = Vec::with_capacity(working.len());

        for mut lits in working.drain(..) {
            lits.sort_unstable();
            lits.dedup();

            if lits.windows(2).any(|w| w[0].var() == w[1].var()) {
                changed = true;
                continue;
            }

            // Unit consistency is not optional: a watch can never be a literal already
            // forced false, regardless of `config.preprocess`.
            lits.retain(|&lit| !units.conflicts_with(lit));

            if lits.iter().any(|&lit| units.contains(lit)) {
                changed = true;
                continue;
            }

            if lits.is_empty() {
                return None;
            }

            if lits.len() == 1 {
                let lit = lits[0];
                if units.conflicts_with(lit) {
                    return None;
                }
                if units.insert(lit) {
                    assignment.assign_lit(lit);
                    changed = true;
                }
                continue;
            }

            next.push(lits);
        }

        working = next;
        if !changed {
            break;
        }
    }

    if config.preprocess {
        loop {
            let mut polarity: Vec<Option<bool>> = vec![None; var_count];
            let mut mixed = vec![false; var_count];

            for clause in &working {
                for &lit in clause {
                    let idx = lit.var().index();
                    match polarity[idx] {
                        None => polarity[idx] = Some(lit.is_positive()),
                        Some(p) if p != lit.is_positive() => mixed[idx] = true,
                        _ => {}
                    }
                }
            }

            let mut found = false;
            for idx in 0..var_count {
                if assignment.values()[idx].is_some() {
                    continue;
                }
                if let Some(p) = polarity[idx] {
                    if !mixed[idx] {
                        assignment.assign_lit(Var::from_index(idx).lit(p));
                        found = true;
                    }
                }
            }

            if !found {
                break;
            }

            working.retain(|clause| {
                !clause
                    .iter()
                    .any(|&lit| assignment.lit_value(lit) == Some(true))
            });
        }
    }

    let mut activities = vec![0.0f64; var_count];
    for clause in &working {
        let bonus = length_bonus(clause.len());
        for &lit in clause {
            activities[lit.var().index()] += bonus;
        }
    }

    let mut clauses = Vec::with_capacity(working.len());
    let mut pos = vec![Vec::new(); var_count];
    let mut neg = vec![Vec::new(); var_count];

    for lits in working {
        debug_assert!(lits.len() >= 2);
        let watch = [lits[0], lits[1]];
        let rest = lits[2..].to_vec();
        let cref = clauses.len();
        place_watch(&mut pos, &mut neg, watch[0], cref);
        place_watch(&mut pos, &mut neg, watch[1], cref);
        clauses.push(WatchedClause { watch, rest });
    }

    Some(Preprocessed {
        clauses,
        pos,
        neg,
        assignment,
        activities,
    })
}

/// Assign `start` true and walk the buckets opposite to each newly-true literal's
/// polarity, moving watches or enqueueing units as needed. Returns the variables this
/// call assigned on success; on conflict, bumps activity over the conflicting clause,
/// undoes every assignment this call made, and returns `None`.
fn propagate(
    start: Lit,
    clauses: &mut [WatchedClause],
    pos: &mut [Vec<ClauseRef>],
    neg: &mut [Vec<ClauseRef>],
    assignment: &mut Assignment,
    activities: &mut [f64],
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
    let mut prop_count: u64 = 0;

    while let Some(lit) = queue.pop_front() {
        let false_lit = !lit;
        let bucket_ids: Vec<ClauseRef> = if false_lit.is_positive() {
            pos[false_lit.var().index()].clone()
        } else {
            neg[false_lit.var().index()].clone()
        };

        for cref in bucket_ids {
            prop_count += 1;

            let (watch_idx, other) = {
                let clause = &clauses[cref];
                if clause.watch[0] == false_lit {
                    (0usize, clause.watch[1])
                } else {
                    (1usize, clause.watch[0])
                }
            };

            if assignment.lit_value(other) == Some(true) {
                continue;
            }

            let replacement = {
                let clause = &clauses[cref];
                clause
                    .rest
                    .iter()
                    .position(|&candidate| assignment.lit_value(candidate) != Some(false))
            };

            match replacement {
                Some(body_idx) => {
                    let new_watch = clauses[cref].rest[body_idx];
                    clauses[cref].rest[body_idx] = clauses[cref].watch[watch_idx];
                    clauses[cref].watch[watch_idx] = new_watch;

                    let old_bucket = if false_lit.is_positive() {
                        &mut pos[false_lit.var().index()]
                    } else {
                        &mut neg[false_lit.var().index()]
                    };
                    remove_watch(old_bucket, cref);
                    place_watch(pos, neg, new_watch, cref);
                }
                None => match assignment.lit_value(other) {
                    None => {
                        assignment.assign_lit(other);
                        assigned.push(other.var());
                        queue.push_back(other);
                        trace.stats.unit_propagations += 1;
                        trace.stats.units_derived += 1;
                    }
                    Some(false) => {
                        let bump = 2.0 * (prop_count as f64).powf(1.5);
                        for &lit in clauses[cref].watch.iter().chain(clauses[cref].rest.iter()) {
                            activities[lit.var().index()] += bump;
                        }
                        for &var in &assigned {
                            assignment.unassign(var);
                        }
                        return None;
                    }
                    Some(true) => unreachable!("satisfied watch handled above"),
                },
            }
        }
    }

    Some(assigned)
}

fn select_decision_var(assignment: &Assignment, activities: &[f64]) -> Option<Var> {
    let mut best: Option<(usize, f64)> = None;
    for idx in 0..assignment.var_count() {
        if assignment.values()[idx].is_some() {
            continue;
        }
        match best {
            None => best = Some((idx, activities[idx])),
            Some((_, best_score)) if activities[idx] > best_score => {
                best = Some((idx, activities[idx]))
            }
            _ => {}
        }
    }
    best.map(|(idx, _)| Var::from_index(idx))
}

#[allow(clippy::too_many_arguments)]
fn search(
    clauses: &mut Vec<WatchedClause>,
    pos: &mut Vec<Vec<ClauseRef>>,
    neg: &mut Vec<Vec<ClauseRef>>,
    assignment: &mut Assignment,
    activities: &mut Vec<f64>,
    names: Option<&[String]>,
    trace: &mut Trace,
    depth: usize,
) -> bool {
    trace.stats.max_depth = trace.stats.max_depth.max(depth as u64);

    let var = match select_decision_var(assignment, activities) {
        Some(var) => var,
        None => return true,
    };

    for &value in &[true, false] {
        let lit = var.lit(value);
        trace.enter(depth, || format!("decide {} = {}", var_name(names, var), value));
        if let Some(assigned) = propagate(lit, clauses, pos, neg, assignment, activities, trace) {
            if search(clauses, pos, neg, assignment, activities, names, trace, depth + 1) {
                return true;
            }
            for &var in &assigned {
                assignment.unassign(var);
            }
        }
    }

    false
}
