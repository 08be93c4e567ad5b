//! Scalar views of a multiobjective problem.

use super::asf::ReferencePointAsf;
use super::epsilon::EpsilonConstraint;
use crate::error::{ensure_len, Result};
use crate::problem::{constraint_violation, MoProblem};
use crate::solver::{ScalarEvaluation, ScalarProblem};

/// Minimizes a [`ReferencePointAsf`] over a problem's feasible set.
pub struct AsfProblem<'a, P: MoProblem + ?Sized> {
    problem: &'a P,
    asf: &'a ReferencePointAsf,
    reference_point: &'a [f64],
}

impl<'a, P: MoProblem + ?Sized> AsfProblem<'a, P> {
    pub fn new(
        problem: &'a P,
        asf: &'a ReferencePointAsf,
        reference_point: &'a [f64],
    ) -> Result<Self> {
        let k = problem.n_objectives();
        ensure_len("preference_factors", k, asf.n_objectives())?;
        ensure_len("reference_point", k, reference_point.len())?;
        Ok(Self {
            problem,
            asf,
            reference_point,
        })
    }
}

impl<P: MoProblem + ?Sized> ScalarProblem for AsfProblem<'_, P> {
    fn bounds(&self) -> Vec<(f64, f64)> {
        self.problem.variable_bounds()
    }

    fn evaluate(&self, x: &[f64]) -> ScalarEvaluation {
        let eval = self.problem.evaluate(x);
        ScalarEvaluation {
            value: self.asf.value(&eval.objectives, self.reference_point),
            violation: eval.violation(),
        }
    }
}

/// Minimizes one objective of a problem under epsilon bounds on the rest.
pub struct EpsilonProblem<'a, P: MoProblem + ?Sized> {
    problem: &'a P,
    ecm: EpsilonConstraint,
}

impl<'a, P: MoProblem + ?Sized> EpsilonProblem<'a, P> {
    pub fn new(problem: &'a P, ecm: EpsilonConstraint) -> Result<Self> {
        ecm.check(problem.n_objectives())?;
        Ok(Self { problem, ecm })
    }
}

impl<P: MoProblem + ?Sized> ScalarProblem for EpsilonProblem<'_, P> {
    fn bounds(&self) -> Vec<(f64, f64)> {
        self.problem.variable_bounds()
    }

    fn evaluate(&self, x: &[f64]) -> ScalarEvaluation {
        let eval = self.problem.evaluate(x);
        let constraints = self
            .ecm
            .constraints_unchecked(&eval.objectives, &eval.constraints);
        ScalarEvaluation {
            value: eval.objectives[self.ecm.to_be_minimized()],
            violation: constraint_violation(&constraints),
        }
    }
}
