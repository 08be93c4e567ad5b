//! Differential Evolution (DE).
//!
//! A population-based global optimizer for continuous box-bounded
//! problems. Each generation builds a trial vector for every member from
//! the scaled difference of two random members added to a third
//! (`rand/1`), mixes it with the member by binomial crossover (`bin`) and
//! keeps the better of the two.
//!
//! Constraints are handled with Deb's feasibility rules (see
//! [`ScalarEvaluation::compare`](crate::solver::ScalarEvaluation::compare)),
//! so no penalty weight has to be tuned.
//!
//! # References
//!
//! - Storn & Price (1997), "Differential Evolution – A Simple and Efficient
//!   Heuristic for Global Optimization over Continuous Spaces"
//! - Deb (2000), "An efficient constraint handling method for genetic algorithms"

mod config;
mod runner;

pub use config::DeConfig;
pub use runner::{DeResult, DeRunner};
