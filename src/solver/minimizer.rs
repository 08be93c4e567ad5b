//! Method selection and a uniform result type.

use super::types::ScalarProblem;
use crate::de::{DeConfig, DeRunner};
use crate::error::Result;
use crate::sa::{SaConfig, SaRunner};

/// Which solver minimizes a scalarized problem.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarMethod {
    /// Differential evolution (default).
    DifferentialEvolution(DeConfig),
    /// Simulated annealing from the starting point.
    SimulatedAnnealing(SaConfig),
}

impl Default for ScalarMethod {
    fn default() -> Self {
        ScalarMethod::DifferentialEvolution(DeConfig::default())
    }
}

impl ScalarMethod {
    pub fn validate(&self) -> Result<()> {
        match self {
            ScalarMethod::DifferentialEvolution(c) => c.validate(),
            ScalarMethod::SimulatedAnnealing(c) => c.validate(),
        }
    }
}

/// Outcome of a scalar minimization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinimizeResult {
    /// Minimizer found.
    pub x: Vec<f64>,
    /// Value at `x`.
    pub fun: f64,
    /// Constraint violation at `x`.
    pub violation: f64,
    /// Whether `x` is feasible.
    pub success: bool,
    /// Generations (DE) or neighbor evaluations (SA).
    pub iterations: usize,
    /// Number of evaluations of the scalar problem.
    pub evaluations: usize,
}

/// Minimizes [`ScalarProblem`]s with a fixed [`ScalarMethod`].
///
/// # Examples
///
/// ```
/// use desdeo_mcdm::de::DeConfig;
/// use desdeo_mcdm::solver::{ScalarEvaluation, ScalarMethod, ScalarMinimizer, ScalarProblem};
///
/// struct Parabola;
/// impl ScalarProblem for Parabola {
///     fn bounds(&self) -> Vec<(f64, f64)> { vec![(-3.0, 3.0)] }
///     fn evaluate(&self, x: &[f64]) -> ScalarEvaluation {
///         ScalarEvaluation::feasible((x[0] - 2.0).powi(2))
///     }
/// }
///
/// let minimizer = ScalarMinimizer::new(ScalarMethod::DifferentialEvolution(
///     DeConfig::default().with_seed(0),
/// ));
/// let res = minimizer.minimize(&Parabola, &[0.0]).unwrap();
/// assert!(res.success);
/// assert!((res.x[0] - 2.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScalarMinimizer {
    method: ScalarMethod,
}

impl ScalarMinimizer {
    pub fn new(method: ScalarMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> &ScalarMethod {
        &self.method
    }

    /// Minimizes `problem`, seeding the search with `x0`.
    pub fn minimize<P: ScalarProblem>(&self, problem: &P, x0: &[f64]) -> Result<MinimizeResult> {
        match &self.method {
            ScalarMethod::DifferentialEvolution(config) => {
                let r = DeRunner::run(problem, config, Some(x0))?;
                Ok(MinimizeResult {
                    x: r.best,
                    fun: r.best_eval.value,
                    violation: r.best_eval.violation,
                    success: r.best_eval.is_feasible(),
                    iterations: r.generations,
                    evaluations: r.evaluations,
                })
            }
            ScalarMethod::SimulatedAnnealing(config) => {
                let r = SaRunner::run(problem, config, Some(x0))?;
                Ok(MinimizeResult {
                    x: r.best,
                    fun: r.best_eval.value,
                    violation: r.best_eval.violation,
                    success: r.best_eval.is_feasible(),
                    iterations: r.iterations,
                    evaluations: r.iterations + 1,
                })
            }
        }
    }
}
