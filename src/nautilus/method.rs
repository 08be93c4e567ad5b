//! NAUTILUS state machine.

use super::config::NautilusConfig;
use super::preference::Preference;
use super::request::{
    IterationContent, NautilusInitialRequest, NautilusIterationRequest, NautilusRequest,
    NautilusStopRequest,
};
use crate::error::{ensure_len, McdmError, Result};
use crate::interactive::InteractiveMethod;
use crate::problem::MoProblem;
use crate::scalarization::{AsfProblem, EpsilonConstraint, EpsilonProblem, ReferencePointAsf};
use crate::solver::{check_bounds, ScalarMinimizer};
use tracing::{debug, warn};

/// The NAUTILUS method.
///
/// Starting from the nadir point, every iteration moves the iteration
/// point a fraction of the way towards a Pareto optimal solution chosen by
/// the DM's preferences. Each objective improves monotonically, and the
/// reachable part of the Pareto optimal set shrinks until the final
/// iteration lands on it.
///
/// Histories are indexed by step number `h`: `z[0]` is the nadir point,
/// `x[h]`, `f[h]` the solution and objective vector found at step `h`,
/// `z[h]` the iteration point and `lb[h + 1]`, `ub[h + 1]` the bounds of
/// what remains reachable from it.
///
/// # Reference
///
/// Miettinen, Eskelinen, Ruiz & Luque (2010), "NAUTILUS method: An
/// interactive technique in multiobjective optimization based on the nadir
/// point", *European Journal of Operational Research* 206(2), 426-434.
///
/// # Examples
///
/// ```
/// use desdeo_mcdm::de::DeConfig;
/// use desdeo_mcdm::interactive::InteractiveMethod;
/// use desdeo_mcdm::nautilus::{
///     InitialResponse, IterationResponse, Nautilus, NautilusConfig, NautilusRequest, Preference,
/// };
/// use desdeo_mcdm::problem::{variable_builder, FnProblem};
/// use desdeo_mcdm::solver::ScalarMethod;
///
/// let vars = variable_builder(&["x"], &[0.5], &[0.0], &[1.0]).unwrap();
/// let problem = FnProblem::new(vars, 2, |x| vec![x[0] * x[0], (x[0] - 1.0).powi(2)]).unwrap();
/// let config = NautilusConfig::default()
///     .with_method(ScalarMethod::DifferentialEvolution(DeConfig::default().with_seed(1)));
/// let mut method = Nautilus::new(problem, vec![0.0, 0.0], vec![1.0, 1.0], config).unwrap();
///
/// let mut req = method.start();
/// req.as_initial_mut()
///     .unwrap()
///     .set_response(InitialResponse::new(2, Preference::Percentages(vec![50.0, 50.0])))
///     .unwrap();
///
/// let mut req = method.iterate(req).unwrap();
/// while let NautilusRequest::Iteration(ref mut it) = req {
///     it.set_response(IterationResponse::continue_previous()).unwrap();
///     req = method.iterate(req).unwrap();
/// }
/// let f = &req.as_stop().unwrap().content().objective_vector;
/// assert!((f[0] - 0.25).abs() < 1e-3);
/// ```
#[derive(Debug)]
pub struct Nautilus<P: MoProblem> {
    problem: P,
    ideal: Vec<f64>,
    nadir: Vec<f64>,
    utopian: Vec<f64>,
    objective_names: Vec<String>,
    minimize: Vec<i8>,
    minimizer: ScalarMinimizer,

    step_number: usize,
    n_iterations: usize,
    n_iterations_left: usize,

    zs: Vec<Vec<f64>>,
    xs: Vec<Vec<f64>>,
    fs: Vec<Vec<f64>>,
    ds: Vec<f64>,
    lower_bounds: Vec<Vec<f64>>,
    upper_bounds: Vec<Vec<f64>>,

    preference: Option<Preference>,
    preference_factors: Vec<f64>,
}

/// Outcome of one step, applied to the histories once every solve of the
/// step has succeeded.
struct StepUpdate {
    step: usize,
    n_iterations: usize,
    n_iterations_left: usize,
    preference: Option<(Preference, Vec<f64>)>,
    x: Vec<f64>,
    f: Vec<f64>,
    z: Vec<f64>,
    lower: Vec<f64>,
    distance: f64,
}

impl<P: MoProblem> Nautilus<P> {
    /// Creates the method for `problem` with the given ideal and nadir
    /// points (see [`payoff_table`](crate::payoff::payoff_table) to
    /// estimate them).
    pub fn new(problem: P, ideal: Vec<f64>, nadir: Vec<f64>, config: NautilusConfig) -> Result<Self> {
        config.validate()?;
        check_bounds(&problem.variable_bounds())?;
        let k = ideal.len();
        ensure_len("nadir", k, nadir.len())?;
        ensure_len("ideal", problem.n_objectives(), k)?;

        let objective_names = if config.objective_names.is_empty() {
            (1..=k).map(|i| format!("f{i}")).collect()
        } else {
            ensure_len("objective_names", k, config.objective_names.len())?;
            config.objective_names
        };
        let minimize = if config.minimize.is_empty() {
            vec![1; k]
        } else {
            ensure_len("minimize", k, config.minimize.len())?;
            config.minimize
        };

        let utopian: Vec<f64> = ideal.iter().map(|z| z - config.epsilon).collect();
        if let Some(i) = (0..k).find(|&i| !(nadir[i] > utopian[i])) {
            return Err(McdmError::InvalidConfig(format!(
                "nadir must be worse than the utopian point in objective {i}"
            )));
        }

        Ok(Self {
            problem,
            lower_bounds: vec![Vec::new(), ideal.clone()],
            upper_bounds: vec![Vec::new(), nadir.clone()],
            ideal,
            nadir,
            utopian,
            objective_names,
            minimize,
            minimizer: ScalarMinimizer::new(config.method),
            step_number: 0,
            n_iterations: 0,
            n_iterations_left: 0,
            zs: Vec::new(),
            xs: Vec::new(),
            fs: Vec::new(),
            ds: Vec::new(),
            preference: None,
            preference_factors: Vec::new(),
        })
    }

    /// The problem being solved.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Ideal point the method was built with.
    pub fn ideal(&self) -> &[f64] {
        &self.ideal
    }

    /// Nadir point, also the first iteration point.
    pub fn nadir(&self) -> &[f64] {
        &self.nadir
    }

    /// Ideal point shifted by `epsilon`.
    pub fn utopian(&self) -> &[f64] {
        &self.utopian
    }

    /// Display names of the objectives.
    pub fn objective_names(&self) -> &[String] {
        &self.objective_names
    }

    /// Per-objective multipliers from the configuration (informational).
    pub fn minimize(&self) -> &[i8] {
        &self.minimize
    }

    /// Current step number `h` (0 before the initial request is answered).
    pub fn step_number(&self) -> usize {
        self.step_number
    }

    /// Total number of iterations currently planned.
    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Iterations left, the current one included.
    pub fn n_iterations_left(&self) -> usize {
        self.n_iterations_left
    }

    /// Preference information in use.
    pub fn preference(&self) -> Option<&Preference> {
        self.preference.as_ref()
    }

    /// Factors derived from [`preference`](Self::preference).
    pub fn preference_factors(&self) -> &[f64] {
        &self.preference_factors
    }

    /// Decision vector of the current step.
    pub fn current_solution(&self) -> Option<&[f64]> {
        self.current(&self.xs)
    }

    /// Objective vector of the current step.
    pub fn current_objectives(&self) -> Option<&[f64]> {
        self.current(&self.fs)
    }

    /// Iteration points `z[0..=h]`.
    pub fn iteration_points(&self) -> &[Vec<f64>] {
        let end = (self.step_number + 1).min(self.zs.len());
        &self.zs[..end]
    }

    /// Distance of the current iteration point to the Pareto optimal set.
    pub fn distance(&self) -> Option<f64> {
        self.ds.get(self.step_number).copied().filter(|d| !d.is_nan())
    }

    /// Bounds of the objective values reachable from the current
    /// iteration point.
    pub fn reachable_bounds(&self) -> (&[f64], &[f64]) {
        let i = self.step_number + 1;
        (
            self.lower_bounds.get(i).map_or(&[][..], Vec::as_slice),
            self.upper_bounds.get(i).map_or(&[][..], Vec::as_slice),
        )
    }

    fn current<'a>(&self, history: &'a [Vec<f64>]) -> Option<&'a [f64]> {
        history
            .get(self.step_number)
            .filter(|v| !v.is_empty())
            .map(Vec::as_slice)
    }

    fn handle_initial_request(&mut self, request: NautilusInitialRequest) -> Result<NautilusRequest> {
        let response = request.response().cloned().ok_or(McdmError::MissingResponse)?;
        response.validate(self.ideal.len())?;

        let n = response.n_iterations;
        let factors = response.preference.factors(&self.nadir, &self.utopian);
        let (x, f) = self.solve_asf(&self.nadir, &factors)?;
        let z = iteration_point(n, &self.nadir, &f);
        let update = self.finish_step(1, n, n, Some((response.preference, factors)), x, f, z)?;

        self.zs = vec![self.nadir.clone()];
        self.xs.clear();
        self.fs.clear();
        self.ds.clear();
        self.lower_bounds.truncate(2);
        self.upper_bounds.truncate(2);
        self.commit(update);
        Ok(self.iteration_request())
    }

    fn handle_iteration_request(
        &mut self,
        request: NautilusIterationRequest,
    ) -> Result<NautilusRequest> {
        if self.step_number == 0 {
            return Err(McdmError::InvalidResponse(
                "the initial request must be answered first".into(),
            ));
        }
        let response = request.response().cloned().ok_or(McdmError::MissingResponse)?;
        response.validate(self.ideal.len())?;

        let (total, left) = match response.n_iterations {
            Some(n) => (n, n),
            None => (self.n_iterations, self.n_iterations_left),
        };
        let h = self.step_number;

        if left <= 1 {
            self.n_iterations = total;
            self.n_iterations_left = 0;
            debug!(step = h, "NAUTILUS finished");
            return Ok(NautilusRequest::Stop(NautilusStopRequest::new(
                self.xs[h].clone(),
                self.fs[h].clone(),
            )));
        }

        let new_preference = || -> Result<(Preference, Vec<f64>)> {
            let preference = response.preference.clone().ok_or_else(|| {
                McdmError::InvalidResponse("new preference information missing".into())
            })?;
            let factors = preference.factors(&self.nadir, &self.utopian);
            Ok((preference, factors))
        };
        let (x, f) = (self.xs[h].clone(), self.fs[h].clone());

        let update = match (
            response.step_back,
            response.short_step,
            response.use_previous_preference,
        ) {
            // continue towards the same solution
            (false, _, true) => {
                let z = iteration_point(left - 1, &self.zs[h], &f);
                self.finish_step(h + 1, total, left - 1, None, x, f, z)?
            }
            // continue with new preferences
            (false, _, false) => {
                let (preference, factors) = new_preference()?;
                let (x, f) = self.solve_asf(&self.zs[h], &factors)?;
                let z = iteration_point(left - 1, &self.zs[h], &f);
                self.finish_step(h + 1, total, left - 1, Some((preference, factors)), x, f, z)?
            }
            // half the step just taken
            (true, true, _) => {
                let z: Vec<f64> = self.zs[h]
                    .iter()
                    .zip(&self.zs[h - 1])
                    .map(|(a, b)| 0.5 * a + 0.5 * b)
                    .collect();
                self.finish_step(h, total, left, None, x, f, z)?
            }
            // redo the step with new preferences
            (true, false, false) => {
                let (preference, factors) = new_preference()?;
                let (x, f) = self.solve_asf(&self.zs[h - 1], &factors)?;
                let z = iteration_point(left, &self.zs[h - 1], &f);
                self.finish_step(h, total, left, Some((preference, factors)), x, f, z)?
            }
            // redo the step with the previous preferences
            (true, false, true) => {
                let z = iteration_point(left, &self.zs[h - 1], &f);
                self.finish_step(h, total, left, None, x, f, z)?
            }
        };

        self.commit(update);
        Ok(self.iteration_request())
    }

    /// Projects `reference_point` onto the Pareto optimal set along the
    /// preference factors, returning the solution and its objectives.
    fn solve_asf(&self, reference_point: &[f64], factors: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        let asf = ReferencePointAsf::new(factors.to_vec(), self.nadir.clone(), self.utopian.clone())?;
        let scalar = AsfProblem::new(&self.problem, &asf, reference_point)?;
        let res = self
            .minimizer
            .minimize(&scalar, &self.problem.initial_values())?;
        if !res.success {
            warn!(violation = res.violation, "achievement problem ended infeasible");
        }

        let f = self.problem.evaluate(&res.x).objectives;
        Ok((res.x, f))
    }

    /// Computes the bounds and distance of the iteration point `z`.
    #[allow(clippy::too_many_arguments)]
    fn finish_step(
        &self,
        step: usize,
        n_iterations: usize,
        n_iterations_left: usize,
        preference: Option<(Preference, Vec<f64>)>,
        x: Vec<f64>,
        f: Vec<f64>,
        z: Vec<f64>,
    ) -> Result<StepUpdate> {
        let lower = self.calculate_bounds(&z, &x)?;
        let distance = calculate_distance(&z, &self.nadir, &f);
        Ok(StepUpdate {
            step,
            n_iterations,
            n_iterations_left,
            preference,
            x,
            f,
            z,
            lower,
            distance,
        })
    }

    fn commit(&mut self, update: StepUpdate) {
        let h = update.step;
        if let Some((preference, factors)) = update.preference {
            self.preference = Some(preference);
            self.preference_factors = factors;
        }
        self.step_number = h;
        self.n_iterations = update.n_iterations;
        self.n_iterations_left = update.n_iterations_left;

        put(&mut self.xs, h, update.x);
        put(&mut self.fs, h, update.f);
        put(&mut self.lower_bounds, h + 1, update.lower);
        put(&mut self.upper_bounds, h + 1, update.z.clone());
        put(&mut self.zs, h, update.z);
        if self.ds.len() <= h {
            self.ds.resize(h + 1, f64::NAN);
        }
        self.ds[h] = update.distance;

        debug!(
            step = h,
            iterations_left = self.n_iterations_left,
            distance = update.distance,
            "NAUTILUS iteration"
        );
    }

    /// Lower bounds of the region reachable from `z`: for each objective,
    /// its minimum subject to every other objective staying below `z`.
    /// `x0` should satisfy `f(x0) <= z`; no bound exceeds `z`.
    fn calculate_bounds(&self, z: &[f64], x0: &[f64]) -> Result<Vec<f64>> {
        (0..z.len())
            .map(|i| -> Result<f64> {
                let scalar = EpsilonProblem::new(&self.problem, EpsilonConstraint::from_bounds(i, z))?;
                let res = self.minimizer.minimize(&scalar, x0)?;
                if !res.success {
                    warn!(objective = i, violation = res.violation, "epsilon problem ended infeasible");
                }
                Ok(self.problem.evaluate(&res.x).objectives[i].min(z[i]))
            })
            .collect()
    }

    fn iteration_request(&self) -> NautilusRequest {
        let h = self.step_number;
        NautilusRequest::Iteration(NautilusIterationRequest::new(IterationContent {
            message: String::new(),
            ideal: self.ideal.clone(),
            nadir: self.nadir.clone(),
            objective_names: self.objective_names.clone(),
            n_iterations: self.n_iterations,
            n_iterations_left: self.n_iterations_left,
            lower_bounds: self.lower_bounds[h + 1].clone(),
            upper_bounds: self.upper_bounds[h + 1].clone(),
            distance: self.ds[h],
        }))
    }
}

impl<P: MoProblem> InteractiveMethod for Nautilus<P> {
    type Request = NautilusRequest;

    fn start(&mut self) -> NautilusRequest {
        NautilusRequest::Initial(NautilusInitialRequest::new(
            self.ideal.clone(),
            self.nadir.clone(),
            self.objective_names.clone(),
        ))
    }

    fn iterate(&mut self, request: NautilusRequest) -> Result<NautilusRequest> {
        match request {
            NautilusRequest::Initial(r) => self.handle_initial_request(r),
            NautilusRequest::Iteration(r) => self.handle_iteration_request(r),
            stop @ NautilusRequest::Stop(_) => Ok(stop),
        }
    }
}

/// Stores `value` at `index`, growing the history as needed.
fn put(history: &mut Vec<Vec<f64>>, index: usize, value: Vec<f64>) {
    if history.len() <= index {
        history.resize(index + 1, Vec::new());
    }
    history[index] = value;
}

/// Next iteration point with `iterations_left` iterations to go.
pub fn iteration_point(iterations_left: usize, z_prev: &[f64], f_current: &[f64]) -> Vec<f64> {
    let it = iterations_left.max(1) as f64;
    z_prev
        .iter()
        .zip(f_current)
        .map(|(z, f)| ((it - 1.0) / it) * z + (1.0 / it) * f)
        .collect()
}

/// `100 * ||z - nadir|| / ||f - nadir||`; 100 when `f` is the nadir point.
pub fn calculate_distance(z_current: &[f64], nadir: &[f64], f_current: &[f64]) -> f64 {
    let norm = |a: &[f64]| -> f64 {
        a.iter()
            .zip(nadir)
            .map(|(v, n)| (v - n).powi(2))
            .sum::<f64>()
            .sqrt()
    };
    let denom = norm(f_current);
    if denom == 0.0 {
        return 100.0;
    }
    100.0 * norm(z_current) / denom
}
