//! NAUTILUS configuration.

use crate::error::{McdmError, Result};
use crate::solver::ScalarMethod;

/// Configuration for [`Nautilus`](super::Nautilus).
///
/// # Examples
///
/// ```
/// use desdeo_mcdm::de::DeConfig;
/// use desdeo_mcdm::nautilus::NautilusConfig;
/// use desdeo_mcdm::solver::ScalarMethod;
///
/// let config = NautilusConfig::default()
///     .with_epsilon(1e-3)
///     .with_objective_names(vec!["cost".into(), "risk".into()])
///     .with_method(ScalarMethod::DifferentialEvolution(DeConfig::default().with_seed(1)));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NautilusConfig {
    /// Offset of the utopian point below the ideal point.
    pub epsilon: f64,

    /// Display names of the objectives. Empty = `f1`, `f2`, ...
    pub objective_names: Vec<String>,

    /// Per-objective multipliers: `1` for a minimized objective, `-1` for
    /// a maximized one that the problem reports negated. Empty = all `1`.
    ///
    /// Informational only: the method always works on, and reports, the
    /// minimized values returned by the problem. Multiply by these to
    /// present maximized objectives in their original sense.
    pub minimize: Vec<i8>,

    /// Solver for the scalarized subproblems.
    pub method: ScalarMethod,
}

impl NautilusConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_objective_names(mut self, names: Vec<String>) -> Self {
        self.objective_names = names;
        self
    }

    pub fn with_minimize(mut self, minimize: Vec<i8>) -> Self {
        self.minimize = minimize;
        self
    }

    pub fn with_method(mut self, method: ScalarMethod) -> Self {
        self.method = method;
        self
    }

    /// Validates the configuration on its own; lengths are checked against
    /// the problem when the method is built.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon >= 0.0 && self.epsilon.is_finite()) {
            return Err(McdmError::InvalidConfig(format!(
                "epsilon must be a non-negative finite number, got {}",
                self.epsilon
            )));
        }
        if let Some(&m) = self.minimize.iter().find(|&&m| m != 1 && m != -1) {
            return Err(McdmError::InvalidConfig(format!(
                "minimize multipliers must be 1 or -1, got {m}"
            )));
        }
        self.method.validate()
    }
}
