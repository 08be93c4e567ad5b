//! Traditional optimization techniques from the field of
//! multiple-criteria decision-making.
//!
//! Provides the interactive NAUTILUS method together with everything it
//! needs to run on its own:
//!
//! - **Problem model** ([`problem`]): box-bounded decision variables,
//!   vector-valued objectives and inequality constraints.
//! - **Scalarization** ([`scalarization`]): reference point achievement
//!   scalarizing function and the epsilon-constraint method.
//! - **Scalar solvers** ([`solver`], [`de`], [`sa`]): differential
//!   evolution and simulated annealing for the scalarized subproblems.
//! - **Payoff table** ([`payoff`]): ideal and nadir point estimates.
//! - **Interactive protocol** ([`interactive`]): requests handed to the
//!   decision maker and validated responses handed back.
//! - **NAUTILUS** ([`nautilus`]): Miettinen et al. (2010).
//!
//! All objectives are minimized.

pub mod de;
pub mod error;
pub mod interactive;
pub mod nautilus;
pub mod payoff;
pub mod problem;
pub mod sa;
pub mod scalarization;
pub mod solver;

pub use error::{McdmError, Result};
