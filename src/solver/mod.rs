//! Scalar minimization.
//!
//! Every scalarization of a multiobjective problem ends up here: a single
//! value to minimize over a box, possibly with constraints. The
//! [`ScalarMinimizer`] dispatches to one of the crate's solvers according
//! to a [`ScalarMethod`].

mod minimizer;
mod types;

pub use minimizer::{MinimizeResult, ScalarMethod, ScalarMinimizer};
pub use types::{ScalarEvaluation, ScalarProblem};

use crate::error::{McdmError, Result};

/// Checks that bounds are non-empty, finite and ordered.
pub(crate) fn check_bounds(bounds: &[(f64, f64)]) -> Result<()> {
    if bounds.is_empty() {
        return Err(McdmError::InvalidConfig(
            "at least one decision variable is required".into(),
        ));
    }
    for (i, &(lo, hi)) in bounds.iter().enumerate() {
        if !(lo.is_finite() && hi.is_finite()) || lo > hi {
            return Err(McdmError::InvalidConfig(format!(
                "bounds of variable {i} are invalid: [{lo}, {hi}]"
            )));
        }
    }
    Ok(())
}

/// Projects `x` onto the box.
pub(crate) fn clip(x: &[f64], bounds: &[(f64, f64)]) -> Vec<f64> {
    x.iter()
        .zip(bounds)
        .map(|(&v, &(lo, hi))| v.clamp(lo, hi))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bounds() {
        assert!(check_bounds(&[(0.0, 1.0), (2.0, 2.0)]).is_ok());
        assert!(check_bounds(&[]).is_err());
        assert!(check_bounds(&[(1.0, 0.0)]).is_err());
        assert!(check_bounds(&[(0.0, f64::INFINITY)]).is_err());
    }
}
