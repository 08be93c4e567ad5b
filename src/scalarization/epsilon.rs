//! Epsilon-constraint scalarization.

use crate::error::{McdmError, Result};

/// Minimizes objective `to_be_minimized` while every other objective `j`
/// is bounded by `f_j <= eps_j`.
///
/// `epsilons` lists the bounds of the other objectives in order, skipping
/// the minimized one, so it has `n_objectives - 1` entries. A bound of the
/// form `f_j >= eps_j` is expressed by negating both the objective and
/// the bound.
///
/// # Examples
///
/// ```
/// use desdeo_mcdm::scalarization::EpsilonConstraint;
///
/// let ecm = EpsilonConstraint::new(0, vec![0.5]);
/// let c = ecm.evaluate_constraints(&[0.1, 0.7], &[]).unwrap();
/// assert!(c[0] < 0.0); // f_1 = 0.7 exceeds 0.5
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpsilonConstraint {
    to_be_minimized: usize,
    epsilons: Vec<f64>,
}

impl EpsilonConstraint {
    pub fn new(to_be_minimized: usize, epsilons: Vec<f64>) -> Self {
        Self {
            to_be_minimized,
            epsilons,
        }
    }

    /// Builds the scalarization from a full bound vector, dropping the
    /// entry of the minimized objective.
    pub fn from_bounds(to_be_minimized: usize, bounds: &[f64]) -> Self {
        let epsilons = bounds
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != to_be_minimized)
            .map(|(_, &e)| e)
            .collect();
        Self::new(to_be_minimized, epsilons)
    }

    pub fn to_be_minimized(&self) -> usize {
        self.to_be_minimized
    }

    pub fn epsilons(&self) -> &[f64] {
        &self.epsilons
    }

    /// Checks that the scalarization fits a problem with `n_objectives`.
    pub fn check(&self, n_objectives: usize) -> Result<()> {
        if self.to_be_minimized >= n_objectives {
            return Err(McdmError::EpsilonConstraint(format!(
                "objective index {} out of range for {} objectives",
                self.to_be_minimized, n_objectives
            )));
        }
        if self.epsilons.len() + 1 != n_objectives {
            return Err(McdmError::EpsilonConstraint(format!(
                "the length of the epsilons array ({}) must match the total number of objectives - 1 ({})",
                self.epsilons.len(),
                n_objectives - 1
            )));
        }
        Ok(())
    }

    /// The value to minimize.
    pub fn objective(&self, objectives: &[f64]) -> Result<f64> {
        self.check(objectives.len())?;
        Ok(objectives[self.to_be_minimized])
    }

    /// Problem constraints followed by the epsilon constraints
    /// `eps_j - f_j` (non-negative when satisfied).
    pub fn evaluate_constraints(
        &self,
        objectives: &[f64],
        problem_constraints: &[f64],
    ) -> Result<Vec<f64>> {
        self.check(objectives.len())?;
        Ok(self.constraints_unchecked(objectives, problem_constraints))
    }

    pub(crate) fn constraints_unchecked(
        &self,
        objectives: &[f64],
        problem_constraints: &[f64],
    ) -> Vec<f64> {
        let others = objectives
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != self.to_be_minimized)
            .map(|(_, &f)| f);
        problem_constraints
            .iter()
            .copied()
            .chain(others.zip(&self.epsilons).map(|(f, &eps)| eps - f))
            .collect()
    }
}
