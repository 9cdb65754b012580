//! Optimized resolution: preprocessing, a unit index, ordered resolution by first
//! literal, length-bucketed usable queues and horn detection (spec.md §4.4).
use std::collections::VecDeque;

use log::debug;
use rustc_hash::FxHashMap;

use propsat_formula::{CnfFormula, Lit, Var};

use crate::assignment::Assignment;
use crate::error::EngineError;
use crate::merge::{merge, subsumes_ordered, MergeOutcome, UnitIndex};
use crate::trace::Trace;
use crate::verdict::{Model, Verdict};

/// Configuration for the optimized resolution engine. No knobs; present for a uniform
/// entry-point shape across engines.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizedResolutionConfig;

type ClauseId = usize;

/// The outcome of [`preprocess_clause`], an explicit sum type per the "Tagged returns"
/// design note (spec.md §9) rather than a sentinel boolean/empty-vec overload.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PreprocessOutcome {
    Unsat,
    Subsumed,
    Clause(Vec<Lit>),
}

/// A clause arena with logical (tombstone) deletion, so a processed clause can be
/// "marked ⊤" (spec.md §3, "Lifecycles") without invalidating the indices held by
/// `usable`/`pos`/`neg`.
struct ClauseStore {
    literals: Vec<Vec<Lit>>,
    alive: Vec<bool>,
}

impl ClauseStore {
    fn new() -> ClauseStore {
        ClauseStore {
            literals: Vec::new(),
            alive: Vec::new(),
        }
    }

    fn insert(&mut self, clause: Vec<Lit>) -> ClauseId {
        let id = self.literals.len();
        self.literals.push(clause);
        self.alive.push(true);
        id
    }

    fn get(&self, id: ClauseId) -> Option<&[Lit]> {
        if self.alive[id] {
            Some(&self.literals[id])
        } else {
            None
        }
    }

    fn replace(&mut self, id: ClauseId, clause: Vec<Lit>) {
        self.literals[id] = clause;
    }

    fn kill(&mut self, id: ClauseId) {
        self.alive[id] = false;
    }
}

fn length_bucket(len: usize) -> usize {
    len.min(99)
}

/// Sort, dedup, apply unit cuts and check subsumption against the processed index,
/// against `clause`'s current literals.
fn preprocess_clause(
    clause: &[Lit],
    units: &UnitIndex,
    store: &ClauseStore,
    pos_idx: &FxHashMap<Var, Vec<ClauseId>>,
    neg_idx: &FxHashMap<Var, Vec<ClauseId>>,
) -> PreprocessOutcome {
    let mut lits: Vec<Lit> = clause.to_vec();
    lits.sort_unstable();
    lits.dedup();

    let was_unit = lits.len() == 1;

    if !was_unit && lits.iter().any(|&lit| units.contains(lit)) {
        return PreprocessOutcome::Subsumed;
    }

    lits.retain(|&lit| !units.conflicts_with(lit));

    if lits.is_empty() {
        return PreprocessOutcome::Unsat;
    }

    let mut candidates: Vec<ClauseId> = Vec::new();
    for &lit in &lits {
        let bucket = if lit.is_positive() {
            pos_idx.get(&lit.var())
        } else {
            neg_idx.get(&lit.var())
        };
        if let Some(ids) = bucket {
            candidates.extend(ids.iter().copied());
        }
    }

    for id in candidates {
        if let Some(existing) = store.get(id) {
            if subsumes_ordered(existing, &lits) {
                return PreprocessOutcome::Subsumed;
            }
        }
    }

    PreprocessOutcome::Clause(lits)
}

/// Saturate by ordered resolution, pivoting only on each selected clause's first
/// (smallest) literal, shortest-clause-first.
pub fn solve(
    formula: &CnfFormula,
    _config: &OptimizedResolutionConfig,
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

    let var_count = formula.var_count();
    let mut store = ClauseStore::new();
    let mut units = UnitIndex::new();
    let mut assignment = Assignment::with_var_count(var_count);
    let mut usable: Vec<VecDeque<ClauseId>> = (0..100).map(|_| VecDeque::new()).collect();
    let mut pos_idx: FxHashMap<Var, Vec<ClauseId>> = FxHashMap::default();
    let mut neg_idx: FxHashMap<Var, Vec<ClauseId>> = FxHashMap::default();

    let mut horn = true;
    for clause in formula.iter() {
        if clause.iter().filter(|lit| lit.is_positive()).count() > 1 {
            horn = false;
        }
    }

    // Pass 1: unit clauses already present in the input.
    for clause in formula.iter() {
        if clause.is_empty() {
            return Ok(Verdict::Unsat);
        }
        if clause.len() == 1 {
            let lit = clause[0];
            if units.conflicts_with(lit) {
                return Ok(Verdict::Unsat);
            }
            if units.insert(lit) {
                assignment.assign_lit(lit);
                let id = store.insert(vec![lit]);
                usable[1].push_back(id);
            }
        }
    }

    // Pass 2: non-unit clauses, tautology-filtered and preprocessed against the units
    // collected in pass 1. `processed` is still empty here.
    for clause in formula.iter() {
        if clause.len() <= 1 {
            continue;
        }

        let mut lits: Vec<Lit> = clause.to_vec();
        lits.sort_unstable();
        lits.dedup();

        if lits.windows(2).any(|w| w[0].var() == w[1].var()) {
            continue;
        }

        match preprocess_clause(&lits, &units, &store, &pos_idx, &neg_idx) {
            PreprocessOutcome::Unsat => return Ok(Verdict::Unsat),
            PreprocessOutcome::Subsumed => {}
            PreprocessOutcome::Clause(survivor) => {
                if survivor.len() == 1 {
                    let lit = survivor[0];
                    if units.conflicts_with(lit) {
                        return Ok(Verdict::Unsat);
                    }
                    units.insert(lit);
                    assignment.assign_lit(lit);
                }
                let bucket = length_bucket(survivor.len());
                let id = store.insert(survivor);
                usable[bucket].push_back(id);
            }
        }
    }

    debug!(
        "optimized resolution over {} variables, horn={}",
        var_count, horn
    );

    loop {
        let bucket_idx = match usable.iter().position(|queue| !queue.is_empty()) {
            Some(idx) => idx,
            None => break,
        };
        let id = usable[bucket_idx].pop_front().unwrap();

        let popped = match store.get(id) {
            Some(c) => c.to_vec(),
            None => continue,
        };

        trace.stats.selected += 1;

        let clause = match preprocess_clause(&popped, &units, &store, &pos_idx, &neg_idx) {
            PreprocessOutcome::Unsat => return Ok(Verdict::Unsat),
            PreprocessOutcome::Subsumed => {
                store.kill(id);
                continue;
            }
            PreprocessOutcome::Clause(lits) => {
                store.replace(id, lits.clone());
                lits
            }
        };

        if clause.len() == 1 {
            let lit = clause[0];
            if units.conflicts_with(lit) {
                return Ok(Verdict::Unsat);
            }
            units.insert(lit);
            assignment.assign_lit(lit);
        }

        let pivot = clause[0];
        let opposite = !pivot;

        // Horn restriction: a non-unit given clause never drives resolution against
        // anything (unit-forced-false cutting on the next `preprocess_clause` re-apply
        // still reduces it). Only a unit given clause, or any given clause under a
        // non-horn formula, generates resolvents here.
        if !(horn && clause.len() > 1) {
            let bucket_map = if opposite.is_positive() {
                &pos_idx
            } else {
                &neg_idx
            };
            let candidates: Vec<ClauseId> = bucket_map
                .get(&opposite.var())
                .cloned()
                .unwrap_or_default();

            for cand_id in candidates {
                let cand_clause = match store.get(cand_id) {
                    Some(c) => c,
                    None => continue,
                };

                trace.stats.generated += 1;

                match merge(&clause, cand_clause, 0, 0, &units) {
                    MergeOutcome::Tautology => {}
                    MergeOutcome::Empty => {
                        trace.enter(0, || "derived the empty clause".to_string());
                        return Ok(Verdict::Unsat);
                    }
                    MergeOutcome::Clause(resolvent) => {
                        if subsumes_ordered(&resolvent, cand_clause) {
                            store.kill(cand_id);
                        }

                        if resolvent.len() == 1 {
                            let lit = resolvent[0];
                            if units.conflicts_with(lit) {
                                return Ok(Verdict::Unsat);
                            }
                            units.insert(lit);
                            assignment.assign_lit(lit);
                        }

                        trace.stats.kept += 1;
                        let bucket = length_bucket(resolvent.len());
                        let new_id = store.insert(resolvent);
                        usable[bucket].push_back(new_id);
                    }
                }
            }
        }

        let entry = if pivot.is_positive() {
            pos_idx.entry(pivot.var())
        } else {
            neg_idx.entry(pivot.var())
        };
        entry.or_insert_with(Vec::new).push(id);
    }

    trace.enter(0, || "usable exhausted".to_string());
    Ok(Verdict::Sat(Model::Partial(units.literals())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TraceFormat;
    use propsat_formula::cnf_formula;

    fn run(formula: &CnfFormula) -> Verdict {
        let mut trace = Trace::new(TraceFormat::Plain, false);
        solve(formula, &OptimizedResolutionConfig::default(), None, &mut trace).unwrap()
    }

    #[test]
    fn scenario_1_unsat() {
        let formula = cnf_formula![-1, 2; 1; -2;];
        assert_eq!(run(&formula), Verdict::Unsat);
    }

    #[test]
    fn scenario_2_sat_partial_model() {
        let formula = cnf_formula![-1, 2; 1;];
        match run(&formula) {
            Verdict::Sat(Model::Partial(lits)) => {
                assert!(lits.contains(&Lit::from_dimacs(1)));
                assert!(lits.contains(&Lit::from_dimacs(2)));
            }
            other => panic!("expected a partial model, got {:?}", other),
        }
    }

    #[test]
    fn scenario_3_pigeonhole_unsat() {
        let formula = cnf_formula![1, 2; -1, 2; 1, -2; -1, -2;];
        assert_eq!(run(&formula), Verdict::Unsat);
    }

    #[test]
    fn scenario_4_small_unsat_family() {
        let formula = cnf_formula![1, 2, 3; -1; -2; -3;];
        assert_eq!(run(&formula), Verdict::Unsat);
    }

    #[test]
    fn horn_formula_unsat_by_unit_resolution() {
        // Every clause has at most one positive literal: horn.
        let formula = cnf_formula![1; -1, 2; -2;];
        assert_eq!(run(&formula), Verdict::Unsat);
    }

    #[test]
    fn names_table_too_short_fails_fast() {
        let formula = cnf_formula![1, 2; -1;];
        let names = vec![String::new(), "a".to_string()];
        let mut trace = Trace::new(TraceFormat::Plain, false);
        let result = solve(
            &formula,
            &OptimizedResolutionConfig::default(),
            Some(&names),
            &mut trace,
        );
        assert!(matches!(result, Err(EngineError::NamesTooShort { .. })));
    }
}
