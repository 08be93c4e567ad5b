//! Scalarization of multiobjective problems.
//!
//! - [`ReferencePointAsf`]: achievement scalarizing function around a
//!   reference point, weighted by preference factors.
//! - [`EpsilonConstraint`]: minimize one objective, bound the others.
//!
//! [`AsfProblem`] and [`EpsilonProblem`] bind a scalarization to an
//! [`MoProblem`](crate::problem::MoProblem) so that it can be handed to a
//! [`ScalarMinimizer`](crate::solver::ScalarMinimizer).

mod adapter;
mod asf;
mod epsilon;

pub use adapter::{AsfProblem, EpsilonProblem};
pub use asf::ReferencePointAsf;
pub use epsilon::EpsilonConstraint;
