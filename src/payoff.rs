//! Payoff table estimation of the ideal and nadir points.
//!
//! Each objective is minimized on its own over the feasible set and the
//! full objective vector at that minimizer becomes one row of the table.
//! The diagonal is the ideal point; the column maxima estimate the nadir
//! point. The nadir estimate can be too optimistic when objectives have
//! several minimizers, which is the usual caveat of the method.
//!
//! # Reference
//!
//! Benayoun, de Montgolfier, Tergny & Laritchev (1971), "Linear programming
//! with multiple objective functions: Step method (STEM)"

use crate::error::{McdmError, Result};
use crate::problem::MoProblem;
use crate::solver::{ScalarEvaluation, ScalarMinimizer, ScalarProblem};
use tracing::{debug, warn};

/// Rows of objective vectors, one per individually minimized objective.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffTable {
    /// `rows[i]` is the objective vector at the minimizer of objective `i`.
    pub rows: Vec<Vec<f64>>,
    /// `solutions[i]` is the decision vector minimizing objective `i`.
    pub solutions: Vec<Vec<f64>>,
}

impl PayoffTable {
    /// The diagonal of the table.
    pub fn ideal(&self) -> Vec<f64> {
        self.rows.iter().enumerate().map(|(i, row)| row[i]).collect()
    }

    /// Column-wise maxima of the table.
    pub fn nadir(&self) -> Vec<f64> {
        let k = self.rows.len();
        (0..k)
            .map(|j| {
                self.rows
                    .iter()
                    .map(|row| row[j])
                    .fold(f64::NEG_INFINITY, f64::max)
            })
            .collect()
    }
}

struct SingleObjective<'a, P: MoProblem + ?Sized> {
    problem: &'a P,
    index: usize,
}

impl<P: MoProblem + ?Sized> ScalarProblem for SingleObjective<'_, P> {
    fn bounds(&self) -> Vec<(f64, f64)> {
        self.problem.variable_bounds()
    }

    fn evaluate(&self, x: &[f64]) -> ScalarEvaluation {
        let eval = self.problem.evaluate(x);
        ScalarEvaluation {
            value: eval.objectives[self.index],
            violation: eval.violation(),
        }
    }
}

/// Computes the payoff table of `problem`.
///
/// Fails if any single-objective minimization ends infeasible.
///
/// # Examples
///
/// ```
/// use desdeo_mcdm::de::DeConfig;
/// use desdeo_mcdm::payoff::payoff_table;
/// use desdeo_mcdm::problem::{variable_builder, FnProblem};
/// use desdeo_mcdm::solver::{ScalarMethod, ScalarMinimizer};
///
/// let vars = variable_builder(&["x"], &[0.5], &[0.0], &[1.0]).unwrap();
/// let problem = FnProblem::new(vars, 2, |x| vec![x[0], 1.0 - x[0]]).unwrap();
/// let minimizer = ScalarMinimizer::new(ScalarMethod::DifferentialEvolution(
///     DeConfig::default().with_seed(0),
/// ));
///
/// let table = payoff_table(&problem, &minimizer).unwrap();
/// assert!(table.ideal().iter().all(|v| v.abs() < 1e-4));
/// assert!(table.nadir().iter().all(|v| (v - 1.0).abs() < 1e-4));
/// ```
pub fn payoff_table<P: MoProblem + ?Sized>(
    problem: &P,
    minimizer: &ScalarMinimizer,
) -> Result<PayoffTable> {
    let k = problem.n_objectives();
    let x0 = problem.initial_values();
    let mut rows = Vec::with_capacity(k);
    let mut solutions = Vec::with_capacity(k);

    for index in 0..k {
        let scalar = SingleObjective { problem, index };
        let res = minimizer.minimize(&scalar, &x0)?;
        if !res.success {
            warn!(objective = index, violation = res.violation, "payoff row infeasible");
            return Err(McdmError::Solver(format!(
                "no feasible minimizer found for objective {index} (violation {})",
                res.violation
            )));
        }
        rows.push(problem.evaluate(&res.x).objectives);
        solutions.push(res.x);
    }

    let table = PayoffTable { rows, solutions };
    debug!(ideal = ?table.ideal(), nadir = ?table.nadir(), "payoff table computed");
    Ok(table)
}
