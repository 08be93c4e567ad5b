//! Core problem trait and a closure-backed implementation.

use super::variable::Variable;
use crate::error::{McdmError, Result};

/// Objective and constraint values of one decision vector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Objective values, all minimized.
    pub objectives: Vec<f64>,
    /// Constraint values; `>= 0` is satisfied.
    pub constraints: Vec<f64>,
}

impl Evaluation {
    /// Total amount by which the constraints are violated.
    pub fn violation(&self) -> f64 {
        constraint_violation(&self.constraints)
    }

    /// Whether every constraint holds.
    pub fn is_feasible(&self) -> bool {
        self.violation() == 0.0
    }
}

/// Sum of `max(0, -c)` over all constraint values.
pub fn constraint_violation(constraints: &[f64]) -> f64 {
    constraints.iter().map(|&c| (-c).max(0.0)).sum()
}

/// Defines a multiobjective minimization problem.
///
/// All objectives are **minimized**. Negate an objective to maximize it.
///
/// `MoProblem` must be `Send + Sync` because solvers may evaluate
/// candidates in parallel.
///
/// # Examples
///
/// ```
/// use desdeo_mcdm::problem::{Evaluation, MoProblem, Variable};
///
/// struct Schaffer { vars: Vec<Variable> }
///
/// impl MoProblem for Schaffer {
///     fn variables(&self) -> &[Variable] { &self.vars }
///     fn n_objectives(&self) -> usize { 2 }
///     fn evaluate(&self, x: &[f64]) -> Evaluation {
///         Evaluation {
///             objectives: vec![x[0] * x[0], (x[0] - 2.0).powi(2)],
///             constraints: vec![],
///         }
///     }
/// }
///
/// let p = Schaffer { vars: vec![Variable::new("x", 1.0, -5.0, 5.0).unwrap()] };
/// assert_eq!(p.evaluate(&[1.0]).objectives, vec![1.0, 1.0]);
/// ```
pub trait MoProblem: Send + Sync {
    /// The decision variables, in the order `evaluate` expects them.
    fn variables(&self) -> &[Variable];

    /// Number of objectives returned by [`evaluate`](MoProblem::evaluate).
    fn n_objectives(&self) -> usize;

    /// Evaluates objectives and constraints at `x`.
    fn evaluate(&self, x: &[f64]) -> Evaluation;

    /// Number of decision variables.
    fn n_variables(&self) -> usize {
        self.variables().len()
    }

    /// `(lower, upper)` bound pairs for each variable.
    fn variable_bounds(&self) -> Vec<(f64, f64)> {
        self.variables()
            .iter()
            .map(|v| (v.lower_bound, v.upper_bound))
            .collect()
    }

    fn variable_lower_bounds(&self) -> Vec<f64> {
        self.variables().iter().map(|v| v.lower_bound).collect()
    }

    fn variable_upper_bounds(&self) -> Vec<f64> {
        self.variables().iter().map(|v| v.upper_bound).collect()
    }

    fn initial_values(&self) -> Vec<f64> {
        self.variables().iter().map(|v| v.initial_value).collect()
    }
}

type ObjectiveFn = Box<dyn Fn(&[f64]) -> Vec<f64> + Send + Sync>;
type ConstraintFn = Box<dyn Fn(&[f64], &[f64]) -> f64 + Send + Sync>;

/// A problem assembled from closures.
///
/// The objective closure maps a decision vector to all objective values.
/// Each constraint closure receives the decision vector and the objective
/// values and returns one constraint value (`>= 0` satisfied).
///
/// # Examples
///
/// ```
/// use desdeo_mcdm::problem::{variable_builder, FnProblem, MoProblem};
///
/// let vars = variable_builder(&["x"], &[0.5], &[0.0], &[1.0]).unwrap();
/// let problem = FnProblem::new(vars, 2, |x| vec![x[0], 1.0 - x[0]])
///     .unwrap()
///     .with_constraint(|x, _f| 0.8 - x[0]);
///
/// let eval = problem.evaluate(&[0.9]);
/// assert!(!eval.is_feasible());
/// ```
pub struct FnProblem {
    variables: Vec<Variable>,
    n_objectives: usize,
    objectives: ObjectiveFn,
    constraints: Vec<ConstraintFn>,
}

impl FnProblem {
    /// Creates a problem with the given variables and objective function.
    pub fn new<F>(variables: Vec<Variable>, n_objectives: usize, objectives: F) -> Result<Self>
    where
        F: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    {
        if variables.is_empty() {
            return Err(McdmError::InvalidConfig(
                "problem needs at least one variable".into(),
            ));
        }
        if n_objectives == 0 {
            return Err(McdmError::InvalidConfig(
                "problem needs at least one objective".into(),
            ));
        }
        Ok(Self {
            variables,
            n_objectives,
            objectives: Box::new(objectives),
            constraints: Vec::new(),
        })
    }

    /// Adds an inequality constraint.
    pub fn with_constraint<C>(mut self, constraint: C) -> Self
    where
        C: Fn(&[f64], &[f64]) -> f64 + Send + Sync + 'static,
    {
        self.constraints.push(Box::new(constraint));
        self
    }

    pub fn n_constraints(&self) -> usize {
        self.constraints.len()
    }
}

impl std::fmt::Debug for FnProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProblem")
            .field("variables", &self.variables)
            .field("n_objectives", &self.n_objectives)
            .field("n_constraints", &self.constraints.len())
            .finish()
    }
}

impl MoProblem for FnProblem {
    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn n_objectives(&self) -> usize {
        self.n_objectives
    }

    fn evaluate(&self, x: &[f64]) -> Evaluation {
        let objectives = (self.objectives)(x);
        debug_assert_eq!(
            objectives.len(),
            self.n_objectives,
            "objective function returned the wrong number of values"
        );
        let constraints = self.constraints.iter().map(|c| c(x, &objectives)).collect();
        Evaluation {
            objectives,
            constraints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::variable_builder;

    fn cylinder() -> FnProblem {
        let vars = variable_builder(&["r", "h"], &[2.6, 11.0], &[2.5, 10.0], &[15.0, 50.0]).unwrap();
        FnProblem::new(vars, 2, |x| {
            let (r, h) = (x[0], x[1]);
            vec![
                std::f64::consts::PI * r * r * h,
                -(2.0 * std::f64::consts::PI.powi(2) + std::f64::consts::PI * r * h),
            ]
        })
        .unwrap()
        .with_constraint(|x, _| -(x[0] / x[1] - 1.618))
        .with_constraint(|x, _| x[0] / x[1] - 5.0)
    }

    #[test]
    fn test_constraint_violation() {
        assert_eq!(constraint_violation(&[1.0, 0.0, 2.5]), 0.0);
        assert!((constraint_violation(&[-1.0, 2.0, -0.5]) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_fn_problem_bounds() {
        let p = cylinder();
        assert_eq!(p.n_variables(), 2);
        assert_eq!(p.variable_bounds(), vec![(2.5, 15.0), (10.0, 50.0)]);
        assert_eq!(p.variable_upper_bounds(), vec![15.0, 50.0]);
        assert_eq!(p.variable_lower_bounds(), vec![2.5, 10.0]);
        assert_eq!(p.initial_values(), vec![2.6, 11.0]);
        assert_eq!(p.n_constraints(), 2);
    }

    #[test]
    fn test_fn_problem_evaluate() {
        let p = cylinder();
        let eval = p.evaluate(&[5.0, 10.0]);
        assert_eq!(eval.objectives.len(), 2);
        assert!((eval.objectives[0] - std::f64::consts::PI * 250.0).abs() < 1e-9);
        // r/h = 0.5 satisfies the first constraint, violates the second
        assert!(eval.constraints[0] > 0.0);
        assert!(eval.constraints[1] < 0.0);
        assert!(!eval.is_feasible());
        assert!((eval.violation() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_fn_problem_rejects_empty() {
        assert!(FnProblem::new(Vec::new(), 2, |_| vec![0.0, 0.0]).is_err());
        let vars = variable_builder(&["x"], &[0.0], &[0.0], &[1.0]).unwrap();
        assert!(FnProblem::new(vars, 0, |_| Vec::new()).is_err());
    }
}
