//! SA execution loop.

use super::config::{CoolingSchedule, SaConfig};
use crate::error::{McdmError, Result};
use crate::solver::{check_bounds, clip, ScalarEvaluation, ScalarProblem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best point found.
    pub best: Vec<f64>,

    /// Evaluation of `best`.
    pub best_eval: ScalarEvaluation,

    /// Total number of neighbor evaluations.
    pub iterations: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Accepted moves, improvements included.
    pub accepted_moves: usize,

    /// Improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best value sampled at regular intervals.
    pub cost_history: Vec<f64>,
}

/// Executes Simulated Annealing.
pub struct SaRunner;

impl SaRunner {
    /// Minimizes `problem` starting from `x0`, or from the box center.
    pub fn run<P: ScalarProblem>(
        problem: &P,
        config: &SaConfig,
        x0: Option<&[f64]>,
    ) -> Result<SaResult> {
        Self::run_with_cancel(problem, config, x0, None)
    }

    /// Runs SA with an optional cancellation token.
    pub fn run_with_cancel<P: ScalarProblem>(
        problem: &P,
        config: &SaConfig,
        x0: Option<&[f64]>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult> {
        config.validate()?;
        let bounds = problem.bounds();
        check_bounds(&bounds)?;
        let n = bounds.len();

        let mut current = match x0 {
            Some(x0) if x0.len() != n => {
                return Err(McdmError::DimensionMismatch {
                    what: "x0",
                    expected: n,
                    actual: x0.len(),
                })
            }
            Some(x0) => clip(x0, &bounds),
            None => bounds.iter().map(|&(lo, hi)| 0.5 * (lo + hi)).collect(),
        };

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut current_eval = problem.evaluate(&current);
        let mut current_cost = penalized(&current_eval, config.penalty);
        let mut best = current.clone();
        let mut best_eval = current_eval;

        let mut temperature = config.initial_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;

        let linear_max_steps = compute_linear_steps(config);

        let history_interval = 100.max(config.iterations_per_temperature);
        let mut cost_history = vec![best_eval.value];

        let mut step = 0usize;

        while temperature > config.min_temperature {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let inner_iters = match config.cooling {
                CoolingSchedule::LundyMees { .. } => 1,
                _ => config.iterations_per_temperature,
            };
            let scale = config.step_fraction
                * (temperature / config.initial_temperature).sqrt().max(1e-6);

            for _ in 0..inner_iters {
                if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                    break;
                }

                let neighbor = perturb(&current, &bounds, scale, &mut rng);
                let neighbor_eval = problem.evaluate(&neighbor);
                let neighbor_cost = penalized(&neighbor_eval, config.penalty);
                let delta = neighbor_cost - current_cost;

                // Metropolis acceptance criterion
                let accept = if delta < 0.0 {
                    improving_moves += 1;
                    true
                } else {
                    rng.random_range(0.0..1.0) < (-delta / temperature).exp()
                };

                if accept {
                    current = neighbor;
                    current_eval = neighbor_eval;
                    current_cost = neighbor_cost;
                    accepted_moves += 1;

                    if current_eval.compare(&best_eval).is_lt() {
                        best.clone_from(&current);
                        best_eval = current_eval;
                    }
                }

                total_iterations += 1;
                if total_iterations.is_multiple_of(history_interval) {
                    cost_history.push(best_eval.value);
                }
            }

            if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                break;
            }

            temperature = cool(temperature, config, step, linear_max_steps);
            step += 1;
        }

        if cost_history
            .last()
            .is_none_or(|&last| (last - best_eval.value).abs() > 1e-15)
        {
            cost_history.push(best_eval.value);
        }

        debug!(
            iterations = total_iterations,
            accepted_moves,
            cancelled,
            value = best_eval.value,
            violation = best_eval.violation,
            "simulated annealing finished"
        );

        Ok(SaResult {
            best,
            best_eval,
            iterations: total_iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            cost_history,
        })
    }
}

fn penalized(eval: &ScalarEvaluation, penalty: f64) -> f64 {
    let cost = eval.value + penalty * eval.violation;
    if cost.is_nan() {
        f64::INFINITY
    } else {
        cost
    }
}

/// Moves one random coordinate by up to `scale` times its range.
fn perturb<R: Rng>(x: &[f64], bounds: &[(f64, f64)], scale: f64, rng: &mut R) -> Vec<f64> {
    let mut next = x.to_vec();
    let j = rng.random_range(0..x.len());
    let (lo, hi) = bounds[j];
    let delta = rng.random_range(-1.0..1.0) * scale * (hi - lo);
    next[j] = (next[j] + delta).clamp(lo, hi);
    next
}

fn cool(temperature: f64, config: &SaConfig, step: usize, linear_max_steps: usize) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,

        CoolingSchedule::Linear => {
            if linear_max_steps == 0 {
                config.min_temperature
            } else {
                let t = config.initial_temperature
                    - (step + 1) as f64 * (config.initial_temperature - config.min_temperature)
                        / linear_max_steps as f64;
                t.max(config.min_temperature)
            }
        }

        CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
    }
}

fn compute_linear_steps(config: &SaConfig) -> usize {
    match config.cooling {
        CoolingSchedule::Linear => {
            if config.max_iterations > 0 && config.iterations_per_temperature > 0 {
                config.max_iterations / config.iterations_per_temperature
            } else {
                1000
            }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // f(x) = (x - 1)^2 on [-10, 10]
    struct Quadratic;

    impl ScalarProblem for Quadratic {
        fn bounds(&self) -> Vec<(f64, f64)> {
            vec![(-10.0, 10.0)]
        }

        fn evaluate(&self, x: &[f64]) -> ScalarEvaluation {
            ScalarEvaluation::feasible((x[0] - 1.0).powi(2))
        }
    }

    // min x^2 + y^2  s.t.  x >= 1
    struct Shifted;

    impl ScalarProblem for Shifted {
        fn bounds(&self) -> Vec<(f64, f64)> {
            vec![(-5.0, 5.0); 2]
        }

        fn evaluate(&self, x: &[f64]) -> ScalarEvaluation {
            ScalarEvaluation {
                value: x[0] * x[0] + x[1] * x[1],
                violation: (1.0 - x[0]).max(0.0),
            }
        }
    }

    #[test]
    fn test_sa_quadratic_geometric() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(1e-4)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.95 })
            .with_iterations_per_temperature(100)
            .with_seed(42);

        let result = SaRunner::run(&Quadratic, &config, None).unwrap();
        assert!(
            result.best_eval.value < 1e-2,
            "expected near-zero cost, got {}",
            result.best_eval.value
        );
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves >= result.improving_moves);
    }

    #[test]
    fn test_sa_quadratic_lundy_mees() {
        let t0 = 10.0;
        let t_min = 1e-3;
        let max_iter = 50_000;
        let beta = (t0 - t_min) / (max_iter as f64 * t0 * t_min);
        let config = SaConfig::default()
            .with_initial_temperature(t0)
            .with_min_temperature(t_min)
            .with_cooling(CoolingSchedule::LundyMees { beta })
            .with_max_iterations(max_iter)
            .with_seed(42);

        let result = SaRunner::run(&Quadratic, &config, None).unwrap();
        assert!(result.best_eval.value < 0.1, "got {}", result.best_eval.value);
    }

    #[test]
    fn test_sa_constrained() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(1e-5)
            .with_seed(7);

        let result = SaRunner::run(&Shifted, &config, Some(&[3.0, 3.0])).unwrap();
        assert!(result.best_eval.is_feasible());
        assert!(
            (result.best_eval.value - 1.0).abs() < 0.05,
            "expected 1.0, got {}",
            result.best_eval.value
        );
    }

    #[test]
    fn test_sa_max_iterations_limit() {
        let config = SaConfig::default()
            .with_initial_temperature(1e10)
            .with_min_temperature(1e-15)
            .with_iterations_per_temperature(10)
            .with_max_iterations(100)
            .with_seed(42);

        let result = SaRunner::run(&Quadratic, &config, None).unwrap();
        assert!(result.iterations <= 100);
    }

    #[test]
    fn test_sa_cancellation() {
        let config = SaConfig::default().with_seed(42);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = SaRunner::run_with_cancel(&Quadratic, &config, None, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        // start point is the box center
        assert_eq!(result.best, vec![0.0]);
    }

    #[test]
    fn test_sa_cost_history_non_increasing() {
        let config = SaConfig::default()
            .with_initial_temperature(50.0)
            .with_min_temperature(0.01)
            .with_seed(42);

        let result = SaRunner::run(&Quadratic, &config, None).unwrap();
        for window in result.cost_history.windows(2) {
            assert!(window[1] <= window[0] + 1e-10);
        }
    }

    #[test]
    fn test_sa_x0_wrong_length() {
        let err = SaRunner::run(&Quadratic, &SaConfig::default(), Some(&[1.0, 2.0])).unwrap_err();
        assert!(matches!(err, McdmError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_perturb_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = vec![(0.0, 1.0), (-1.0, 0.0)];
        let mut x = vec![1.0, -1.0];
        for _ in 0..1000 {
            x = perturb(&x, &bounds, 1.0, &mut rng);
            assert!((0.0..=1.0).contains(&x[0]));
            assert!((-1.0..=0.0).contains(&x[1]));
        }
    }
}
