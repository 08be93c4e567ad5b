//! DE configuration.

use crate::error::{McdmError, Result};

/// Configuration for Differential Evolution.
///
/// # Examples
///
/// ```
/// use desdeo_mcdm::de::DeConfig;
///
/// let config = DeConfig::default()
///     .with_population_size(40)
///     .with_max_generations(300)
///     .with_mutation(0.7)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeConfig {
    /// Number of population members. 0 = `max(15 * n_variables, 20)`.
    pub population_size: usize,

    /// Maximum number of generations.
    pub max_generations: usize,

    /// Differential weight F in (0, 2].
    pub mutation: f64,

    /// Crossover probability CR in [0, 1].
    pub crossover: f64,

    /// Relative convergence tolerance on the spread of population values.
    pub tol: f64,

    /// Absolute convergence tolerance on the spread of population values.
    pub atol: f64,

    /// Whether to evaluate trial vectors in parallel.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for DeConfig {
    fn default() -> Self {
        Self {
            population_size: 0,
            max_generations: 1000,
            mutation: 0.8,
            crossover: 0.9,
            tol: 1e-8,
            atol: 1e-12,
            parallel: false,
            seed: None,
        }
    }
}

impl DeConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_mutation(mut self, f: f64) -> Self {
        self.mutation = f;
        self
    }

    pub fn with_crossover(mut self, cr: f64) -> Self {
        self.crossover = cr;
        self
    }

    pub fn with_tolerance(mut self, tol: f64, atol: f64) -> Self {
        self.tol = tol;
        self.atol = atol;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Population size actually used for a problem with `n_variables`.
    pub fn effective_population_size(&self, n_variables: usize) -> usize {
        if self.population_size == 0 {
            (15 * n_variables).max(20)
        } else {
            self.population_size
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size != 0 && self.population_size < 4 {
            return Err(McdmError::InvalidConfig(format!(
                "population_size must be 0 (automatic) or at least 4, got {}",
                self.population_size
            )));
        }
        if self.max_generations == 0 {
            return Err(McdmError::InvalidConfig(
                "max_generations must be positive".into(),
            ));
        }
        if !(self.mutation > 0.0 && self.mutation <= 2.0) {
            return Err(McdmError::InvalidConfig(format!(
                "mutation must be in (0, 2], got {}",
                self.mutation
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover) {
            return Err(McdmError::InvalidConfig(format!(
                "crossover must be in [0, 1], got {}",
                self.crossover
            )));
        }
        if !(self.tol >= 0.0 && self.atol >= 0.0) {
            return Err(McdmError::InvalidConfig(
                "tolerances must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DeConfig::default();
        assert_eq!(config.population_size, 0);
        assert_eq!(config.max_generations, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_population_size() {
        let config = DeConfig::default();
        assert_eq!(config.effective_population_size(1), 20);
        assert_eq!(config.effective_population_size(4), 60);
        assert_eq!(config.with_population_size(8).effective_population_size(4), 8);
    }

    #[test]
    fn test_validate_small_population() {
        assert!(DeConfig::default().with_population_size(3).validate().is_err());
    }

    #[test]
    fn test_validate_bad_mutation() {
        assert!(DeConfig::default().with_mutation(0.0).validate().is_err());
        assert!(DeConfig::default().with_mutation(2.5).validate().is_err());
        assert!(DeConfig::default().with_mutation(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_bad_crossover() {
        assert!(DeConfig::default().with_crossover(1.1).validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        assert!(DeConfig::default().with_max_generations(0).validate().is_err());
    }
}
