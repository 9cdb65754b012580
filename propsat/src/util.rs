//! Shared helpers for rendering variables and literals in trace messages, and for
//! evaluating a clause set under a (possibly partial) assignment.
use propsat_formula::{Lit, Var};

use crate::assignment::Assignment;

/// Evaluate a single clause under a (possibly partial) assignment.
///
/// `Some(true)` if some literal is true, `Some(false)` if every literal is false, `None`
/// (undetermined) otherwise.
pub fn eval_clause(clause: &[Lit], assignment: &Assignment) -> Option<bool> {
    let mut falsified = true;
    for &lit in clause {
        match assignment.lit_value(lit) {
            Some(true) => return Some(true),
            Some(false) => {}
            None => falsified = false,
        }
    }
    if falsified {
        Some(false)
    } else {
        None
    }
}

/// Evaluate a whole clause set under a (possibly partial) assignment.
///
/// A falsified clause makes the whole formula `Some(false)` even if other clauses are
/// still undetermined; the formula is only `Some(true)` once every clause is satisfied.
pub fn eval_formula(clauses: &[Vec<Lit>], assignment: &Assignment) -> Option<bool> {
    let mut all_satisfied = true;
    for clause in clauses {
        match eval_clause(clause, assignment) {
            Some(false) => return Some(false),
            Some(true) => {}
            None => all_satisfied = false,
        }
    }
    if all_satisfied {
        Some(true)
    } else {
        None
    }
}

/// The name used for `var` in trace output.
///
/// Per spec.md §6, `names` is 1-indexed with position 0 reserved; the formatter falls
/// back to the numeric (DIMACS) encoding whenever no name table was supplied or the
/// table doesn't reach this variable.
pub fn var_name(names: Option<&[String]>, var: Var) -> String {
    let index = var.to_dimacs() as usize;
    match names.and_then(|names| names.get(index)) {
        Some(name) if !name.is_empty() => name.clone(),
        _ => var.to_dimacs().to_string(),
    }
}

/// The name used for `lit` in trace output, with a leading `-` for negative literals.
pub fn lit_name(names: Option<&[String]>, lit: Lit) -> String {
    let name = var_name(names, lit.var());
    if lit.is_negative() {
        format!("-{}", name)
    } else {
        name
    }
}
