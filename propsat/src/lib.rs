//! Decision procedures for propositional satisfiability over [`CnfFormula`]s.
//!
//! This crate implements the nine decision-procedure components built on top of
//! `propsat-formula`'s literal and clause-set model: forward subsumption and
//! resolvent-merge primitives ([`merge`]), a pluggable trace sink ([`trace`]) with run
//! counters ([`stats`]), and three independent solving families, each exposing a
//! uniform entry point:
//!
//! ```ignore
//! fn solve(
//!     formula: &CnfFormula,
//!     config: &EngineConfig,
//!     names: Option<&[String]>,
//!     trace: &mut Trace,
//! ) -> Result<Verdict, EngineError>;
//! ```
//!
//! - [`truth_table`]: recursive enumeration of partial assignments.
//! - [`resolution`]: naive and optimized given-clause resolution.
//! - [`dpll`]: naive, classical (occurrence-list) and watched-literal DPLL.
//!
//! None of these engines are incremental or conflict-driven; each run owns its state
//! from scratch, so there is no analog of a long-lived solver object here.
pub use propsat_formula::CnfFormula;

pub mod assignment;
pub mod dpll;
pub mod error;
pub mod merge;
pub mod resolution;
pub mod stats;
pub mod trace;
pub mod truth_table;
pub mod util;
pub mod verdict;

pub use error::EngineError;
pub use stats::Stats;
pub use trace::{Trace, TraceFormat};
pub use verdict::{Model, Verdict};
