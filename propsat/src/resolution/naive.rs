//! Naive resolution: a given-clause loop with forward subsumption only (spec.md §4.3).
use std::collections::VecDeque;

use log::debug;

use propsat_formula::{CnfFormula, Lit};

use crate::error::EngineError;
use crate::merge::{merge, subsumes_unordered, MergeOutcome, UnitIndex};
use crate::trace::Trace;
use crate::verdict::{Model, Verdict};

/// Configuration for the naive resolution engine. No knobs; present for a uniform
/// entry-point shape across engines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveResolutionConfig;

/// Saturate the clause set by resolution until the empty clause is derived (UNSAT) or
/// the usable set is exhausted (SAT).
pub fn solve(
    formula: &CnfFormula,
    _config: &NaiveResolutionConfig,
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

    let mut usable: VecDeque<Vec<Lit>> = formula.iter().map(|clause| clause.to_vec()).collect();
    let mut processed: Vec<Vec<Lit>> = Vec::new();
    let units = UnitIndex::new();

    debug!(
        "naive resolution over {} variables, {} clauses",
        formula.var_count(),
        formula.len()
    );

    if usable.iter().any(|clause| clause.is_empty()) {
        trace.enter(0, || "input contains the empty clause".to_string());
        return Ok(Verdict::Unsat);
    }

    while let Some(selected) = usable.pop_front() {
        if processed
            .iter()
            .any(|clause| subsumes_unordered(clause, &selected))
        {
            continue;
        }

        trace.stats.selected += 1;
        trace.enter(0, || format!("selected {:?}", selected));

        for processed_clause in &processed {
            for (i1, &lit) in selected.iter().enumerate() {
                for (i2, &other) in processed_clause.iter().enumerate() {
                    if other != !lit {
                        continue;
                    }

                    trace.stats.generated += 1;

                    match merge(&selected, processed_clause, i1, i2, &units) {
                        MergeOutcome::Tautology => {}
                        MergeOutcome::Empty => {
                            trace.enter(0, || "derived the empty clause".to_string());
                            return Ok(Verdict::Unsat);
                        }
                        MergeOutcome::Clause(resolvent) => {
                            trace.stats.kept += 1;
                            usable.push_back(resolvent);
                        }
                    }
                }
            }
        }

        processed.push(selected);
    }

    trace.enter(0, || "usable exhausted".to_string());
    Ok(Verdict::Sat(Model::Bare))
}
