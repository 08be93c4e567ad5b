//! Scalar problem trait shared by all scalar solvers.

use std::cmp::Ordering;

/// Objective value and constraint violation of one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarEvaluation {
    /// Value to be minimized.
    pub value: f64,
    /// Total constraint violation; 0 means feasible.
    pub violation: f64,
}

impl ScalarEvaluation {
    /// An unconstrained evaluation.
    pub fn feasible(value: f64) -> Self {
        Self {
            value,
            violation: 0.0,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.violation <= 0.0
    }

    /// Deb's feasibility rules.
    ///
    /// A feasible candidate beats an infeasible one; two feasible
    /// candidates compare by value; two infeasible ones by violation.
    /// NaN values compare as worst.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.is_feasible(), other.is_feasible()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => nan_last(self.value, other.value),
            (false, false) => nan_last(self.violation, other.violation),
        }
    }

    /// Whether `self` is at least as good as `other` under [`compare`](Self::compare).
    pub fn no_worse_than(&self, other: &Self) -> bool {
        self.compare(other) != Ordering::Greater
    }
}

fn nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// A single-objective, box-bounded, optionally constrained problem.
///
/// Scalarizations of a multiobjective problem implement this trait so
/// that any [`ScalarMethod`](super::ScalarMethod) can minimize them.
///
/// # Thread Safety
///
/// `ScalarProblem` must be `Sync` because differential evolution may
/// evaluate its trial population in parallel.
pub trait ScalarProblem: Sync {
    /// `(lower, upper)` bounds of each decision variable.
    fn bounds(&self) -> Vec<(f64, f64)>;

    /// Evaluates the candidate `x`.
    fn evaluate(&self, x: &[f64]) -> ScalarEvaluation;
}
