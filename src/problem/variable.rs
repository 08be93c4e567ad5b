//! Decision variable definitions.

use crate::error::{ensure_len, McdmError, Result};

/// A bounded continuous decision variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    /// Variable name (unique within a problem).
    pub name: String,
    /// Starting value used to seed solvers.
    pub initial_value: f64,
    /// Lower bound (inclusive).
    pub lower_bound: f64,
    /// Upper bound (inclusive).
    pub upper_bound: f64,
}

impl Variable {
    /// Creates a variable, checking `lower <= initial <= upper`.
    pub fn new(
        name: impl Into<String>,
        initial_value: f64,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<Self> {
        let name = name.into();
        if !(lower_bound.is_finite() && upper_bound.is_finite()) {
            return Err(McdmError::InvalidVariable {
                name,
                reason: "bounds must be finite".into(),
            });
        }
        if lower_bound > upper_bound {
            return Err(McdmError::InvalidVariable {
                name,
                reason: format!("lower bound {lower_bound} exceeds upper bound {upper_bound}"),
            });
        }
        if !(lower_bound..=upper_bound).contains(&initial_value) {
            return Err(McdmError::InvalidVariable {
                name,
                reason: format!(
                    "initial value {initial_value} outside [{lower_bound}, {upper_bound}]"
                ),
            });
        }
        Ok(Self {
            name,
            initial_value,
            lower_bound,
            upper_bound,
        })
    }

    /// Width of the feasible interval.
    pub fn range(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// Builds a list of variables from parallel slices.
///
/// # Examples
///
/// ```
/// use desdeo_mcdm::problem::variable_builder;
///
/// let vars = variable_builder(
///     &["r", "h"],
///     &[2.6, 11.0],
///     &[2.5, 10.0],
///     &[15.0, 50.0],
/// ).unwrap();
/// assert_eq!(vars.len(), 2);
/// assert_eq!(vars[1].name, "h");
/// ```
pub fn variable_builder<S: AsRef<str>>(
    names: &[S],
    initial_values: &[f64],
    lower_bounds: &[f64],
    upper_bounds: &[f64],
) -> Result<Vec<Variable>> {
    let n = names.len();
    ensure_len("initial_values", n, initial_values.len())?;
    ensure_len("lower_bounds", n, lower_bounds.len())?;
    ensure_len("upper_bounds", n, upper_bounds.len())?;

    names
        .iter()
        .zip(initial_values)
        .zip(lower_bounds.iter().zip(upper_bounds))
        .map(|((name, &x0), (&lo, &hi))| Variable::new(name.as_ref(), x0, lo, hi))
        .collect()
}
