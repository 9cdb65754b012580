//! Subsumption and resolvent-merge primitives shared by both resolution engines
//! (spec.md §4.1).
use rustc_hash::FxHashSet;

use propsat_formula::Lit;

/// The outcome of merging two clauses at a resolution pivot.
///
/// An explicit sum type, per the "Tagged returns" design note in spec.md §9: the
/// source this is modelled on overloads `false`/`true`/array returns for this; we never
/// do that here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The resolvent contains a variable in both polarities, or is already entailed by
    /// a known unit clause.
    Tautology,
    /// The resolvent is the empty clause (⊥).
    Empty,
    /// The (possibly shortened) resolvent, sorted by [`Lit`]'s total order.
    Clause(Vec<Lit>),
}

/// The set of literals pinned down by unit clauses seen so far.
///
/// Used by [`merge`] to detect that a resolvent is already entailed (it contains a
/// known-true literal) or can be shortened (it contains the negation of a known-true
/// literal, which must be false and can be dropped).
#[derive(Debug, Clone, Default)]
pub struct UnitIndex {
    units: FxHashSet<Lit>,
}

impl UnitIndex {
    /// An empty unit index.
    pub fn new() -> UnitIndex {
        UnitIndex::default()
    }

    /// Record a unit clause's literal. Returns `false` if it was already present.
    pub fn insert(&mut self, lit: Lit) -> bool {
        self.units.insert(lit)
    }

    /// Whether `lit` itself is a known unit.
    pub fn contains(&self, lit: Lit) -> bool {
        self.units.contains(&lit)
    }

    /// Whether the negation of `lit` is a known unit, i.e. `lit` is forced false.
    pub fn conflicts_with(&self, lit: Lit) -> bool {
        self.units.contains(&!lit)
    }

    /// Literals pinned down so far, sorted by [`Lit`]'s total order.
    pub fn literals(&self) -> Vec<Lit> {
        let mut lits: Vec<Lit> = self.units.iter().copied().collect();
        lits.sort_unstable();
        lits
    }
}

/// Forward subsumption, unordered inputs.
///
/// `c1` subsumes `c2` iff every literal of `c1` occurs in `c2`. `O(|c1| * |c2|)`;
/// acceptable at the naive tier (spec.md §4.1).
pub fn subsumes_unordered(c1: &[Lit], c2: &[Lit]) -> bool {
    c1.iter().all(|lit| c2.contains(lit))
}

/// Forward subsumption, assuming both clauses are sorted by [`Lit`]'s total order.
///
/// Same relation as [`subsumes_unordered`] but in `O(|c1| + |c2|)` using an advancing
/// pointer into `c2`, as required by spec.md §4.1.
pub fn subsumes_ordered(c1: &[Lit], c2: &[Lit]) -> bool {
    debug_assert!(is_sorted(c1));
    debug_assert!(is_sorted(c2));

    let mut j = 0;
    for &lit in c1 {
        while j < c2.len() && c2[j] < lit {
            j += 1;
        }
        if j >= c2.len() || c2[j] != lit {
            return false;
        }
        j += 1;
    }
    true
}

fn is_sorted(lits: &[Lit]) -> bool {
    lits.windows(2).all(|w| w[0] <= w[1])
}

/// Construct the resolvent of `c1` and `c2` on the pivot `c1[i1]` / `c2[i2]`.
///
/// Precondition: `c1[i1] == !c2[i2]`. Computes the multiset union of `c1` and `c2` with
/// the pivot literals removed, then:
///
/// - if any variable occurs with both polarities in the union, returns [`MergeOutcome::Tautology`];
/// - if any surviving literal is itself a known unit, returns [`MergeOutcome::Tautology`]
///   (the resolvent is already entailed);
/// - if the negation of a surviving literal is a known unit, that literal is cut
///   (dropped, since it is forced false);
/// - duplicate literals are removed;
/// - if nothing survives, returns [`MergeOutcome::Empty`];
/// - otherwise returns the sorted resolvent as [`MergeOutcome::Clause`].
///
/// `c1` and `c2` are not mutated; the returned clause is a fresh allocation.
pub fn merge(c1: &[Lit], c2: &[Lit], i1: usize, i2: usize, units: &UnitIndex) -> MergeOutcome {
    debug_assert_eq!(c1[i1], !c2[i2]);

    let mut lits = Vec::with_capacity(c1.len() + c2.len() - 2);
    lits.extend(
        c1.iter()
            .enumerate()
            .filter(|&(i, _)| i != i1)
            .map(|(_, &lit)| lit),
    );
    lits.extend(
        c2.iter()
            .enumerate()
            .filter(|&(i, _)| i != i2)
            .map(|(_, &lit)| lit),
    );

    lits.sort_unstable();
    lits.dedup();

    if lits.windows(2).any(|w| w[0].var() == w[1].var()) {
        return MergeOutcome::Tautology;
    }

    if lits.iter().any(|&lit| units.contains(lit)) {
        return MergeOutcome::Tautology;
    }

    lits.retain(|&lit| !units.conflicts_with(lit));

    if lits.is_empty() {
        MergeOutcome::Empty
    } else {
        MergeOutcome::Clause(lits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propsat_formula::Lit;

    fn lit(x: isize) -> Lit {
        Lit::from_dimacs(x)
    }

    #[test]
    fn unordered_subsumption() {
        assert!(subsumes_unordered(&[lit(1)], &[lit(1), lit(2)]));
        assert!(!subsumes_unordered(&[lit(1), lit(3)], &[lit(1), lit(2)]));
    }

    #[test]
    fn ordered_subsumption_matches_unordered() {
        let mut c1 = vec![lit(1), lit(-2)];
        let mut c2 = vec![lit(-2), lit(1), lit(3)];
        c1.sort_unstable();
        c2.sort_unstable();
        assert_eq!(subsumes_ordered(&c1, &c2), subsumes_unordered(&c1, &c2));
        assert!(subsumes_ordered(&c1, &c2));
    }

    #[test]
    fn merge_plain_resolvent() {
        let c1 = vec![lit(1), lit(2)];
        let c2 = vec![lit(-1), lit(3)];
        let units = UnitIndex::new();
        match merge(&c1, &c2, 0, 0, &units) {
            MergeOutcome::Clause(lits) => assert_eq!(lits, vec![lit(2), lit(3)]),
            other => panic!("expected a clause, got {:?}", other),
        }
    }

    #[test]
    fn merge_detects_tautology() {
        let c1 = vec![lit(1), lit(2)];
        let c2 = vec![lit(-1), lit(-2)];
        let units = UnitIndex::new();
        assert_eq!(merge(&c1, &c2, 0, 0, &units), MergeOutcome::Tautology);
    }

    #[test]
    fn merge_detects_empty() {
        let c1 = vec![lit(1)];
        let c2 = vec![lit(-1)];
        let units = UnitIndex::new();
        assert_eq!(merge(&c1, &c2, 0, 0, &units), MergeOutcome::Empty);
    }

    #[test]
    fn merge_cuts_literal_forced_false_by_unit() {
        let c1 = vec![lit(1), lit(2)];
        let c2 = vec![lit(-1), lit(3)];
        let mut units = UnitIndex::new();
        units.insert(lit(-3)); // forces literal 3 false
        match merge(&c1, &c2, 0, 0, &units) {
            MergeOutcome::Clause(lits) => assert_eq!(lits, vec![lit(2)]),
            other => panic!("expected a clause, got {:?}", other),
        }
    }

    #[test]
    fn merge_detects_unit_entailment() {
        let c1 = vec![lit(1), lit(2)];
        let c2 = vec![lit(-1), lit(3)];
        let mut units = UnitIndex::new();
        units.insert(lit(2)); // already known true, so resolvent adds nothing
        assert_eq!(merge(&c1, &c2, 0, 0, &units), MergeOutcome::Tautology);
    }
}
