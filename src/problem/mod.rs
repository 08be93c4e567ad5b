//! Multiobjective problem model.
//!
//! A problem is a box of decision variables, a vector of objectives to be
//! minimized, and an optional set of inequality constraints. Users either
//! implement [`MoProblem`] directly or assemble an [`FnProblem`] from
//! closures.
//!
//! # Constraint convention
//!
//! A constraint value `>= 0` means the constraint holds; a negative value
//! measures how badly it is violated.

mod types;
mod variable;

pub use types::{constraint_violation, Evaluation, FnProblem, MoProblem};
pub use variable::{variable_builder, Variable};
