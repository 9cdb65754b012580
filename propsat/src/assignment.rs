//! The dense variable assignment (spec.md §3, "Assignment (varvals)") shared by every
//! engine that needs one.
use propsat_formula::{Lit, Var};

/// A dense mapping from every variable `1..=var_count` to `{Unassigned, True, False}`.
///
/// `None` is Unassigned. Reading a literal's value follows spec.md §3: it is `Some(true)`
/// iff the variable's assigned polarity matches the literal's, `Some(false)` iff it is
/// the opposite polarity, and `None` while the variable is unassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<Option<bool>>,
}

impl Assignment {
    /// Create an assignment with every one of `var_count` variables unassigned.
    pub fn with_var_count(var_count: usize) -> Assignment {
        Assignment {
            values: vec![None; var_count],
        }
    }

    /// Number of variables this assignment covers.
    pub fn var_count(&self) -> usize {
        self.values.len()
    }

    /// The value of `var`, or `None` if unassigned.
    pub fn var_value(&self, var: Var) -> Option<bool> {
        self.values[var.index()]
    }

    /// The value of `lit` under this assignment, accounting for its polarity.
    pub fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.values[lit.var().index()].map(|value| value == lit.is_positive())
    }

    /// Assign `var` the value `true`/`false`.
    pub fn assign_var(&mut self, var: Var, value: bool) {
        self.values[var.index()] = Some(value);
    }

    /// Assign `lit`'s variable so that `lit` becomes true.
    pub fn assign_lit(&mut self, lit: Lit) {
        self.assign_var(lit.var(), lit.is_positive());
    }

    /// Revert `var` to Unassigned.
    pub fn unassign(&mut self, var: Var) {
        self.values[var.index()] = None;
    }

    /// Whether every variable has a value.
    pub fn is_total(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// The first unassigned variable, if any, in increasing index order.
    pub fn first_unassigned(&self) -> Option<Var> {
        self.values
            .iter()
            .position(Option::is_none)
            .map(Var::from_index)
    }

    /// Raw per-variable values, indexed by `Var::index()`.
    pub fn values(&self) -> &[Option<bool>] {
        &self.values
    }

    /// Build a [`crate::verdict::Model::Total`] from this assignment.
    ///
    /// Unassigned variables (possible when the search terminates early, e.g. all
    /// remaining clauses are already satisfied) default to `true`; this is always a
    /// valid completion since no clause can depend on their value once satisfied.
    pub fn to_total_model(&self) -> Vec<bool> {
        self.values.iter().map(|v| v.unwrap_or(true)).collect()
    }
}
