//! DPLL search engines (spec.md §4.5–§4.7): naive, classical (occurrence buckets) and
//! watched-literal.
pub mod classical;
pub mod naive;
pub mod watched;

pub use classical::ClassicalDpllConfig;
pub use naive::NaiveDpllConfig;
pub use watched::WatchedDpllConfig;

use propsat_formula::Lit;

use crate::assignment::Assignment;

/// The result of scanning one clause's literals against the current assignment.
///
/// Shared by the naive and classical engines, which both classify a clause by a direct
/// literal scan; the watched-literal engine instead maintains this information
/// incrementally through its watch invariant and never needs a full scan.
pub(crate) enum ClauseStatus {
    Satisfied,
    Conflict,
    Unit(Lit),
    Other,
}

pub(crate) fn classify_clause(clause: &[Lit], assignment: &Assignment) -> ClauseStatus {
    let mut unassigned_count = 0;
    let mut unassigned_lit = None;
    for &lit in clause {
        match assignment.lit_value(lit) {
            Some(true) => return ClauseStatus::Satisfied,
            Some(false) => {}
            None => {
                unassigned_count += 1;
                unassigned_lit = Some(lit);
            }
        }
    }
    match unassigned_count {
        0 => ClauseStatus::Conflict,
        1 => ClauseStatus::Unit(unassigned_lit.unwrap()),
        _ => ClauseStatus::Other,
    }
}

/// A length-dependent bonus used by both the classical engine's variable scores and the
/// watched-literal engine's activity initialization (spec.md §4.6, §4.7): shorter
/// clauses contribute a larger bonus.
pub(crate) fn length_bonus(len: usize) -> f64 {
    2f64.powi(-(len.max(1) as i32))
}
