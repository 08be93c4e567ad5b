//! Reference point achievement scalarizing function.

use crate::error::{ensure_len, McdmError, Result};

/// Achievement scalarizing function for a reference point `q`:
///
/// ```text
/// s(f, q) = max_i mu_i (f_i - q_i) + rho * sum_i (f_i - q_i) / (nadir_i - utopian_i)
/// ```
///
/// `mu` are the preference factors. The small augmentation term keeps
/// minimizers Pareto optimal rather than only weakly Pareto optimal.
///
/// # Reference
///
/// Wierzbicki (1980), "The use of reference objectives in multiobjective
/// optimization"
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferencePointAsf {
    preference_factors: Vec<f64>,
    nadir: Vec<f64>,
    utopian: Vec<f64>,
    rho: f64,
}

impl ReferencePointAsf {
    /// Augmentation coefficient used unless overridden.
    pub const DEFAULT_RHO: f64 = 1e-6;

    pub fn new(preference_factors: Vec<f64>, nadir: Vec<f64>, utopian: Vec<f64>) -> Result<Self> {
        let k = preference_factors.len();
        ensure_len("nadir", k, nadir.len())?;
        ensure_len("utopian", k, utopian.len())?;
        if let Some(i) = nadir
            .iter()
            .zip(&utopian)
            .position(|(n, u)| !(n - u).is_normal() || n <= u)
        {
            return Err(McdmError::InvalidPreference(format!(
                "nadir must be strictly worse than utopian in objective {i}"
            )));
        }
        Ok(Self {
            preference_factors,
            nadir,
            utopian,
            rho: Self::DEFAULT_RHO,
        })
    }

    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    pub fn preference_factors(&self) -> &[f64] {
        &self.preference_factors
    }

    pub fn n_objectives(&self) -> usize {
        self.preference_factors.len()
    }

    /// Value of the ASF for objective vector `f` and reference point `q`.
    pub fn value(&self, f: &[f64], q: &[f64]) -> f64 {
        debug_assert_eq!(f.len(), self.n_objectives());
        debug_assert_eq!(q.len(), self.n_objectives());

        let mut max_term = f64::NEG_INFINITY;
        let mut sum_term = 0.0;
        for i in 0..self.n_objectives() {
            let diff = f[i] - q[i];
            max_term = max_term.max(self.preference_factors[i] * diff);
            sum_term += diff / (self.nadir[i] - self.utopian[i]);
        }
        max_term + self.rho * sum_term
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asf_value() {
        let asf = ReferencePointAsf::new(vec![1.0, 2.0], vec![1.0, 1.0], vec![0.0, 0.0])
            .unwrap()
            .with_rho(0.0);
        // max(1 * (0.5 - 1), 2 * (0.2 - 1)) = max(-0.5, -1.6)
        assert!((asf.value(&[0.5, 0.2], &[1.0, 1.0]) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_asf_augmentation() {
        let asf = ReferencePointAsf::new(vec![1.0, 1.0], vec![2.0, 3.0], vec![0.0, 1.0])
            .unwrap()
            .with_rho(0.1);
        // max term 1, sum term 1/2 + 1/2
        let v = asf.value(&[2.0, 2.0], &[1.0, 1.0]);
        assert!((v - (1.0 + 0.1 * 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_asf_dimension_mismatch() {
        let err = ReferencePointAsf::new(vec![1.0], vec![1.0, 1.0], vec![0.0]).unwrap_err();
        assert!(matches!(err, McdmError::DimensionMismatch { what: "nadir", .. }));
    }

    #[test]
    fn test_asf_degenerate_range() {
        assert!(ReferencePointAsf::new(vec![1.0], vec![1.0], vec![1.0]).is_err());
        assert!(ReferencePointAsf::new(vec![1.0], vec![0.0], vec![1.0]).is_err());
    }
}
