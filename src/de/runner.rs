//! DE execution loop.

use super::config::DeConfig;
use crate::error::{McdmError, Result};
use crate::solver::{check_bounds, clip, ScalarEvaluation, ScalarProblem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Result of a Differential Evolution run.
#[derive(Debug, Clone)]
pub struct DeResult {
    /// Best decision vector found.
    pub best: Vec<f64>,

    /// Evaluation of `best`.
    pub best_eval: ScalarEvaluation,

    /// Number of generations executed.
    pub generations: usize,

    /// Number of objective evaluations.
    pub evaluations: usize,

    /// Whether the population spread fell below the tolerance.
    pub converged: bool,

    /// Best value after each generation.
    pub cost_history: Vec<f64>,
}

/// Executes Differential Evolution.
pub struct DeRunner;

impl DeRunner {
    /// Minimizes `problem`.
    ///
    /// When `x0` is given it is clipped into the bounds and replaces the
    /// first member of the initial population.
    ///
    /// # Examples
    ///
    /// ```
    /// use desdeo_mcdm::de::{DeConfig, DeRunner};
    /// use desdeo_mcdm::solver::{ScalarEvaluation, ScalarProblem};
    ///
    /// struct Sphere;
    /// impl ScalarProblem for Sphere {
    ///     fn bounds(&self) -> Vec<(f64, f64)> { vec![(-5.0, 5.0); 2] }
    ///     fn evaluate(&self, x: &[f64]) -> ScalarEvaluation {
    ///         ScalarEvaluation::feasible(x.iter().map(|v| v * v).sum())
    ///     }
    /// }
    ///
    /// let result = DeRunner::run(&Sphere, &DeConfig::default().with_seed(1), None).unwrap();
    /// assert!(result.best_eval.value < 1e-6);
    /// ```
    pub fn run<P: ScalarProblem>(
        problem: &P,
        config: &DeConfig,
        x0: Option<&[f64]>,
    ) -> Result<DeResult> {
        config.validate()?;
        let bounds = problem.bounds();
        check_bounds(&bounds)?;
        let n = bounds.len();
        if let Some(x0) = x0 {
            if x0.len() != n {
                return Err(McdmError::DimensionMismatch {
                    what: "x0",
                    expected: n,
                    actual: x0.len(),
                });
            }
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let pop_size = config.effective_population_size(n);

        // Initialize
        let mut population: Vec<Vec<f64>> = (0..pop_size)
            .map(|_| {
                bounds
                    .iter()
                    .map(|&(lo, hi)| lo + rng.random::<f64>() * (hi - lo))
                    .collect()
            })
            .collect();
        if let Some(x0) = x0 {
            population[0] = clip(x0, &bounds);
        }

        let mut evals = evaluate_all(problem, &population, config.parallel);
        let mut evaluations = pop_size;
        let mut best_idx = best_index(&evals);

        let mut cost_history = Vec::with_capacity(config.max_generations + 1);
        cost_history.push(evals[best_idx].value);

        let mut converged = false;
        let mut generations = 0usize;

        while generations < config.max_generations {
            if has_converged(&evals, config.tol, config.atol) {
                converged = true;
                break;
            }

            let trials: Vec<Vec<f64>> = (0..pop_size)
                .map(|i| {
                    let (r0, r1, r2) = pick_three(&mut rng, pop_size, i);
                    let j_rand = rng.random_range(0..n);
                    (0..n)
                        .map(|j| {
                            if j == j_rand || rng.random::<f64>() < config.crossover {
                                let v = population[r0][j]
                                    + config.mutation * (population[r1][j] - population[r2][j]);
                                v.clamp(bounds[j].0, bounds[j].1)
                            } else {
                                population[i][j]
                            }
                        })
                        .collect()
                })
                .collect();

            let trial_evals = evaluate_all(problem, &trials, config.parallel);
            evaluations += pop_size;

            // Greedy one-to-one selection
            for (i, (trial, trial_eval)) in trials.into_iter().zip(trial_evals).enumerate() {
                if trial_eval.no_worse_than(&evals[i]) {
                    population[i] = trial;
                    evals[i] = trial_eval;
                    if evals[i].no_worse_than(&evals[best_idx]) {
                        best_idx = i;
                    }
                }
            }

            generations += 1;
            cost_history.push(evals[best_idx].value);
        }

        let best_eval = evals[best_idx];
        debug!(
            generations,
            evaluations,
            converged,
            value = best_eval.value,
            violation = best_eval.violation,
            "differential evolution finished"
        );

        Ok(DeResult {
            best: population.swap_remove(best_idx),
            best_eval,
            generations,
            evaluations,
            converged,
            cost_history,
        })
    }
}

fn best_index(evals: &[ScalarEvaluation]) -> usize {
    let mut best = 0;
    for (i, e) in evals.iter().enumerate().skip(1) {
        if e.compare(&evals[best]).is_lt() {
            best = i;
        }
    }
    best
}

/// Three mutually distinct indices, all different from `exclude`.
fn pick_three<R: Rng>(rng: &mut R, pop_size: usize, exclude: usize) -> (usize, usize, usize) {
    let mut draw = |taken: &[usize]| loop {
        let k = rng.random_range(0..pop_size);
        if !taken.contains(&k) {
            return k;
        }
    };
    let r0 = draw(&[exclude]);
    let r1 = draw(&[exclude, r0]);
    let r2 = draw(&[exclude, r0, r1]);
    (r0, r1, r2)
}

/// Population spread test: only a fully feasible population can converge.
fn has_converged(evals: &[ScalarEvaluation], tol: f64, atol: f64) -> bool {
    if evals.iter().any(|e| !e.is_feasible() || !e.value.is_finite()) {
        return false;
    }
    let n = evals.len() as f64;
    let mean = evals.iter().map(|e| e.value).sum::<f64>() / n;
    let var = evals.iter().map(|e| (e.value - mean).powi(2)).sum::<f64>() / n;
    var.sqrt() <= atol + tol * mean.abs()
}

#[cfg(feature = "parallel")]
fn evaluate_all<P: ScalarProblem>(
    problem: &P,
    xs: &[Vec<f64>],
    parallel: bool,
) -> Vec<ScalarEvaluation> {
    use rayon::prelude::*;
    if parallel {
        xs.par_iter().map(|x| problem.evaluate(x)).collect()
    } else {
        xs.iter().map(|x| problem.evaluate(x)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all<P: ScalarProblem>(
    problem: &P,
    xs: &[Vec<f64>],
    _parallel: bool,
) -> Vec<ScalarEvaluation> {
    xs.iter().map(|x| problem.evaluate(x)).collect()
}
