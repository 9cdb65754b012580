//! Verdicts returned by the decision procedures.
use propsat_formula::{Lit, Var};

/// A satisfying witness.
///
/// Open Question (spec.md §9, "empty SAT model"): the naive resolution engine derives
/// satisfiability by exhausting the usable set, never constructing a witness along the
/// way, so it must be able to report SAT without fabricating one. The other engines
/// always have an assignment in hand when they report SAT, but differ in whether it
/// covers every variable (DPLL and truth-table engines always produce a total
/// assignment; the optimized resolution engine only has the unit clauses it derived).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model {
    /// A value for every variable `1..=var_count`.
    Total(Vec<bool>),
    /// A value only for the variables whose truth value was pinned down as a unit
    /// clause; all others are free.
    Partial(Vec<Lit>),
    /// Satisfiable, but no witness was reconstructed.
    Bare,
}

impl Model {
    /// The value of `var` in this model, if known.
    pub fn value(&self, var: Var) -> Option<bool> {
        match self {
            Model::Total(values) => values.get(var.index()).copied(),
            Model::Partial(lits) => lits
                .iter()
                .find(|lit| lit.var() == var)
                .map(|lit| lit.is_positive()),
            Model::Bare => None,
        }
    }

    /// Whether `lit` is true in this model. `None` if its value is unknown (only
    /// possible for [`Model::Partial`] and [`Model::Bare`]).
    pub fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.value(lit.var()).map(|value| value == lit.is_positive())
    }
}

/// The result of running a decision procedure on a clause set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No assignment satisfies the clause set.
    Unsat,
    /// The clause set is satisfiable, with the given witness.
    Sat(Model),
}

impl Verdict {
    /// Whether this verdict reports satisfiability.
    pub fn is_sat(&self) -> bool {
        matches!(self, Verdict::Sat(_))
    }

    /// Whether this verdict reports unsatisfiability.
    pub fn is_unsat(&self) -> bool {
        matches!(self, Verdict::Unsat)
    }

    /// The witness, if this is a [`Verdict::Sat`].
    pub fn model(&self) -> Option<&Model> {
        match self {
            Verdict::Sat(model) => Some(model),
            Verdict::Unsat => None,
        }
    }
}
