//! Preference information and DM responses.

use crate::error::{McdmError, Result};
use tracing::warn;

/// How the DM expresses which objectives to improve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preference {
    /// Importance ranks, one per objective, each in `1..=n_objectives`.
    /// Ranks may repeat.
    Ranks(Vec<usize>),
    /// Desired improvement shares in percent, one per objective, positive
    /// and summing to 100.
    Percentages(Vec<f64>),
}

impl Preference {
    /// Checks the preference against the number of objectives.
    pub fn validate(&self, n_objectives: usize) -> Result<()> {
        let result = match self {
            Preference::Ranks(ranks) => validate_ranks(ranks, n_objectives),
            Preference::Percentages(pcts) => validate_percentages(pcts, n_objectives),
        };
        if let Err(ref e) = result {
            warn!(error = %e, "rejected preference");
        }
        result
    }

    /// Preference factors `mu_i` for the achievement scalarizing function.
    ///
    /// - Ranks: `mu_i = 1 / (r_i (nadir_i - utopian_i))`
    /// - Percentages: `mu_i = 1 / ((p_i / 100) (nadir_i - utopian_i))`
    pub fn factors(&self, nadir: &[f64], utopian: &[f64]) -> Vec<f64> {
        let ranges = nadir.iter().zip(utopian).map(|(n, u)| n - u);
        match self {
            Preference::Ranks(ranks) => ranks
                .iter()
                .zip(ranges)
                .map(|(&r, range)| 1.0 / (r as f64 * range))
                .collect(),
            Preference::Percentages(pcts) => pcts
                .iter()
                .zip(ranges)
                .map(|(&p, range)| 1.0 / (p / 100.0 * range))
                .collect(),
        }
    }
}

fn validate_ranks(ranks: &[usize], n_objectives: usize) -> Result<()> {
    if ranks.len() != n_objectives {
        return Err(McdmError::InvalidPreference(format!(
            "number of ranks ({}) does not match the number of objectives ({})",
            ranks.len(),
            n_objectives
        )));
    }
    if let Some(&bad) = ranks.iter().find(|&&r| r < 1 || r > n_objectives) {
        return Err(McdmError::InvalidPreference(format!(
            "ranks must lie between 1 and the number of objectives ({n_objectives}), got {bad}"
        )));
    }
    Ok(())
}

fn validate_percentages(pcts: &[f64], n_objectives: usize) -> Result<()> {
    if pcts.len() != n_objectives {
        return Err(McdmError::InvalidPreference(format!(
            "number of percentages ({}) does not match the number of objectives ({})",
            pcts.len(),
            n_objectives
        )));
    }
    if let Some(&bad) = pcts.iter().find(|&&p| !(p > 0.0 && p.is_finite())) {
        return Err(McdmError::InvalidPreference(format!(
            "percentages must be positive, got {bad}"
        )));
    }
    let sum: f64 = pcts.iter().sum();
    if (sum - 100.0).abs() > 1e-9 {
        return Err(McdmError::InvalidPreference(format!(
            "the sum of the percentages must be 100, current sum is {sum}"
        )));
    }
    Ok(())
}

/// Checks a requested number of iterations.
pub fn validate_n_iterations(n_iterations: usize) -> Result<()> {
    if n_iterations < 1 {
        return Err(McdmError::InvalidResponse(format!(
            "the number of iterations left should be a positive integer, got {n_iterations}"
        )));
    }
    Ok(())
}

/// Answer to the initial request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialResponse {
    /// Total number of iterations to carry out.
    pub n_iterations: usize,
    pub preference: Preference,
}

impl InitialResponse {
    pub fn new(n_iterations: usize, preference: Preference) -> Self {
        Self {
            n_iterations,
            preference,
        }
    }

    pub fn validate(&self, n_objectives: usize) -> Result<()> {
        validate_n_iterations(self.n_iterations)?;
        self.preference.validate(n_objectives)
    }
}

/// Answer to an intermediate request.
///
/// # Examples
///
/// ```
/// use desdeo_mcdm::nautilus::{IterationResponse, Preference};
///
/// // keep going with the same preferences
/// let next = IterationResponse::continue_previous();
/// assert!(next.validate(2).is_ok());
///
/// // go back, change the preferences and the number of iterations
/// let back = IterationResponse::step_back()
///     .with_preference(Preference::Percentages(vec![30.0, 70.0]))
///     .with_n_iterations(4);
/// assert!(back.validate(2).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationResponse {
    /// New number of iterations left, if the DM wants to change it.
    pub n_iterations: Option<usize>,
    /// Return to the previous iteration point.
    pub step_back: bool,
    /// When stepping back, take half a step with the previous preference.
    pub short_step: bool,
    /// Keep the preference information of the previous iteration.
    pub use_previous_preference: bool,
    /// New preference information; required unless
    /// `use_previous_preference` is set.
    pub preference: Option<Preference>,
}

impl IterationResponse {
    /// Proceed with the previous preference information.
    pub fn continue_previous() -> Self {
        Self {
            use_previous_preference: true,
            ..Self::default()
        }
    }

    /// Proceed with new preference information.
    pub fn new_preference(preference: Preference) -> Self {
        Self {
            preference: Some(preference),
            ..Self::default()
        }
    }

    /// Step back to the previous iteration point. Combine with
    /// [`with_preference`](Self::with_preference) to change preferences, or
    /// use [`short_step`](Self::short_step).
    pub fn step_back() -> Self {
        Self {
            step_back: true,
            use_previous_preference: true,
            ..Self::default()
        }
    }

    /// Step back and take a shorter step with the previous preference.
    pub fn short_step() -> Self {
        Self {
            step_back: true,
            short_step: true,
            use_previous_preference: true,
            ..Self::default()
        }
    }

    /// Supplies new preference information.
    pub fn with_preference(mut self, preference: Preference) -> Self {
        self.preference = Some(preference);
        self.use_previous_preference = false;
        self
    }

    pub fn with_n_iterations(mut self, n: usize) -> Self {
        self.n_iterations = Some(n);
        self
    }

    pub fn validate(&self, n_objectives: usize) -> Result<()> {
        if !self.use_previous_preference {
            match &self.preference {
                Some(p) => p.validate(n_objectives)?,
                None => {
                    return Err(McdmError::InvalidResponse(
                        "new preference information missing; set a preference or use the previous one"
                            .into(),
                    ))
                }
            }
        }
        if let Some(n) = self.n_iterations {
            validate_n_iterations(n)?;
        }
        Ok(())
    }
}
