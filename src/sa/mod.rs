//! Simulated Annealing (SA) over continuous boxes.
//!
//! A single-solution trajectory method inspired by the physical
//! annealing process. Worsening moves are accepted with a probability that
//! decreases with the temperature, which lets the search leave local
//! optima early and settle later. Moves perturb one coordinate at a time
//! with a step that shrinks as the temperature falls.
//!
//! Constraint violation enters the acceptance test as a penalty; the best
//! point is tracked with feasibility rules so a feasible point is never
//! replaced by an infeasible one.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::{SaResult, SaRunner};
