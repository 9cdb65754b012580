//! Errors raised by the decision procedures.
use thiserror::Error;

/// Input-structural errors.
///
/// A semantically UNSAT clause set is never an error: it is reported through
/// [`Verdict::Unsat`](crate::verdict::Verdict::Unsat). These variants only cover malformed
/// input, which engines that index by variable (the two resolution engines and the
/// indexed DPLL engines) detect up front rather than clamp silently.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A clause referenced a variable outside `1..=var_count`.
    #[error("literal {lit} references a variable outside 1..={var_count}")]
    VarOutOfRange {
        /// The offending literal, in DIMACS (signed, 1-based) form.
        lit: isize,
        /// The variable count the engine was run with.
        var_count: usize,
    },

    /// The supplied variable-name table is shorter than required.
    #[error("names table has {got} entries, need at least {need} (1-indexed, position 0 reserved)")]
    NamesTooShort {
        /// Number of entries actually supplied.
        got: usize,
        /// Number of entries required.
        need: usize,
    },
}
