//! Crate-wide error type.

use thiserror::Error;

/// Errors produced by problem setup, solvers and interactive methods.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum McdmError {
    /// Two vectors that must agree in length do not.
    #[error("dimension mismatch: {what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A decision variable definition is inconsistent.
    #[error("invalid variable '{name}': {reason}")]
    InvalidVariable { name: String, reason: String },

    /// Preference information supplied by the decision maker is unusable.
    #[error("invalid preference: {0}")]
    InvalidPreference(String),

    /// A decision maker's response is malformed for the current request.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A request was passed to `iterate` before a response was set.
    #[error("request has no response")]
    MissingResponse,

    /// A solver configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Misuse of the epsilon-constraint scalarization.
    #[error("epsilon constraint: {0}")]
    EpsilonConstraint(String),

    /// A scalar solver could not produce a result.
    #[error("solver failed: {0}")]
    Solver(String),
}

/// Shorthand for results carrying [`McdmError`].
pub type Result<T> = std::result::Result<T, McdmError>;

/// Checks that `actual` equals `expected`.
pub(crate) fn ensure_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(McdmError::DimensionMismatch {
            what,
            expected,
            actual,
        })
    }
}
