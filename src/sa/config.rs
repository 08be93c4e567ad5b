//! SA configuration and cooling schedules.

use crate::error::{McdmError, Result};

/// Cooling schedule for temperature reduction.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_k = T_0 - k * (T_0 - T_min) / max_steps`.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// One iteration per temperature step.
    LundyMees {
        /// Cooling parameter, typically `(T_0 - T_min) / (max_iter * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

/// Configuration for Simulated Annealing.
///
/// # Examples
///
/// ```
/// use desdeo_mcdm::sa::{CoolingSchedule, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(10.0)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.9 })
///     .with_step_fraction(0.2)
///     .with_seed(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature.
    pub initial_temperature: f64,

    /// The run stops when the temperature drops below this.
    pub min_temperature: f64,

    pub cooling: CoolingSchedule,

    /// Iterations at each temperature level (ignored by Lundy-Mees).
    pub iterations_per_temperature: usize,

    /// Hard iteration budget. 0 = no limit.
    pub max_iterations: usize,

    /// Largest perturbation, as a fraction of each variable's range,
    /// applied at the initial temperature.
    pub step_fraction: f64,

    /// Weight of the constraint violation added to the value during
    /// acceptance.
    pub penalty: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 1e-6,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 100,
            max_iterations: 0,
            step_fraction: 0.1,
            penalty: 1e3,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_step_fraction(mut self, fraction: f64) -> Self {
        self.step_fraction = fraction;
        self
    }

    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(McdmError::InvalidConfig(msg));
        if self.initial_temperature <= 0.0 {
            return invalid("initial_temperature must be positive".into());
        }
        if self.min_temperature <= 0.0 {
            return invalid("min_temperature must be positive".into());
        }
        if self.min_temperature >= self.initial_temperature {
            return invalid("min_temperature must be less than initial_temperature".into());
        }
        if !(self.step_fraction > 0.0 && self.step_fraction <= 1.0) {
            return invalid(format!(
                "step_fraction must be in (0, 1], got {}",
                self.step_fraction
            ));
        }
        if self.penalty < 0.0 {
            return invalid(format!("penalty must be non-negative, got {}", self.penalty));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return invalid(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta <= 0.0 {
                    return invalid(format!("lundy-mees beta must be positive, got {beta}"));
                }
            }
            CoolingSchedule::Linear => {}
        }
        Ok(())
    }
}
