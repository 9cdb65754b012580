//! Run counters attached to the end of every trace.
use std::fmt;

/// Counters accumulated over a single engine run.
///
/// Every engine fills in the subset of counters relevant to it and leaves the rest at
/// zero; [`Trace::finish`](crate::trace::Trace::finish) always appends the full
/// [`Display`] line regardless of which counters a given engine touched, so a reader of
/// the trace never has to guess which engine produced it from the shape of the
/// statistics line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Clauses selected as the given clause (resolution engines).
    pub selected: u64,
    /// Resolvents generated, tautologies and empties included (resolution engines).
    pub generated: u64,
    /// Resolvents kept in `usable` after subsumption filtering (resolution engines).
    pub kept: u64,
    /// Unit-propagation steps performed (DPLL engines).
    pub unit_propagations: u64,
    /// Distinct unit literals derived (DPLL engines).
    pub units_derived: u64,
    /// Pure-literal assignments made without branching (classical and watched DPLL).
    pub pure_derivations: u64,
    /// Deepest recursion depth reached (DPLL and truth-table engines).
    pub max_depth: u64,
    /// Full clause-set evaluations performed (truth-table engine).
    pub evaluations: u64,
    /// Leaves (total assignments) visited (truth-table engine).
    pub leaves: u64,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "selected={} generated={} kept={} unit_propagations={} units_derived={} \
             pure_derivations={} max_depth={} evaluations={} leaves={}",
            self.selected,
            self.generated,
            self.kept,
            self.unit_propagations,
            self.units_derived,
            self.pure_derivations,
            self.max_depth,
            self.evaluations,
            self.leaves,
        )
    }
}
