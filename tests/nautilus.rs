//! End-to-end NAUTILUS sessions.

use desdeo_mcdm::de::DeConfig;
use desdeo_mcdm::interactive::InteractiveMethod;
use desdeo_mcdm::nautilus::{
    InitialResponse, IterationResponse, Nautilus, NautilusConfig, NautilusRequest, Preference,
};
use desdeo_mcdm::payoff::payoff_table;
use desdeo_mcdm::problem::{variable_builder, FnProblem, MoProblem};
use desdeo_mcdm::solver::{ScalarMethod, ScalarMinimizer};
use desdeo_mcdm::McdmError;

const TOL: f64 = 1e-6;

// f1 = x^2, f2 = (x - 1)^2 on [0, 1]; ideal (0, 0), nadir (1, 1)
fn schaffer() -> FnProblem {
    let vars = variable_builder(&["x"], &[0.5], &[0.0], &[1.0]).unwrap();
    FnProblem::new(vars, 2, |x| vec![x[0] * x[0], (x[0] - 1.0).powi(2)]).unwrap()
}

fn method() -> ScalarMethod {
    ScalarMethod::DifferentialEvolution(DeConfig::default().with_seed(42))
}

fn nautilus() -> Nautilus<FnProblem> {
    let config = NautilusConfig::default().with_method(method());
    Nautilus::new(schaffer(), vec![0.0, 0.0], vec![1.0, 1.0], config).unwrap()
}

fn begin(method: &mut Nautilus<FnProblem>, n: usize, preference: Preference) -> NautilusRequest {
    let mut req = method.start();
    req.as_initial_mut()
        .unwrap()
        .set_response(InitialResponse::new(n, preference))
        .unwrap();
    method.iterate(req).unwrap()
}

fn answer(
    method: &mut Nautilus<FnProblem>,
    mut req: NautilusRequest,
    response: IterationResponse,
) -> NautilusRequest {
    req.as_iteration_mut().unwrap().set_response(response).unwrap();
    method.iterate(req).unwrap()
}

fn distance(req: &NautilusRequest) -> f64 {
    req.as_iteration().unwrap().content().distance
}

#[test]
fn distance_grows_linearly_with_same_preferences() {
    let mut m = nautilus();
    let mut req = begin(&mut m, 5, Preference::Percentages(vec![50.0, 50.0]));

    for k in 1..=5 {
        let d = distance(&req);
        assert!(
            (d - 20.0 * k as f64).abs() < TOL,
            "step {k}: expected {} got {d}",
            20.0 * k as f64
        );
        assert_eq!(m.step_number(), k);
        assert_eq!(req.as_iteration().unwrap().content().n_iterations_left, 6 - k);
        req = answer(&mut m, req, IterationResponse::continue_previous());
    }

    assert!(req.is_stop());
    assert_eq!(m.n_iterations_left(), 0);
    let stop = req.as_stop().unwrap().content();
    assert!((stop.solution[0] - 0.5).abs() < 1e-3);
    assert!((stop.objective_vector[0] - 0.25).abs() < 1e-3);
    assert!((stop.objective_vector[1] - 0.25).abs() < 1e-3);

    // a stop request is returned unchanged
    let again = m.iterate(req).unwrap();
    assert!(again.is_stop());
}

#[test]
fn objectives_improve_monotonically() {
    let mut m = nautilus();
    let mut req = begin(&mut m, 4, Preference::Ranks(vec![1, 1]));
    while !req.is_stop() {
        req = answer(&mut m, req, IterationResponse::continue_previous());
    }
    for w in m.iteration_points().windows(2) {
        assert!(w[1][0] <= w[0][0] + TOL);
        assert!(w[1][1] <= w[0][1] + TOL);
    }
    assert_eq!(m.iteration_points()[0], vec![1.0, 1.0]);
}

#[test]
fn bounds_bracket_the_reachable_region() {
    let mut m = nautilus();
    let req = begin(&mut m, 5, Preference::Percentages(vec![50.0, 50.0]));
    let content = req.as_iteration().unwrap().content();

    // upper bounds are the iteration point
    assert_eq!(content.upper_bounds, m.iteration_points()[1]);
    assert!((content.upper_bounds[0] - 0.85).abs() < 1e-3);

    // min x^2 s.t. (x - 1)^2 <= 0.85
    let expected = (1.0 - 0.85f64.sqrt()).powi(2);
    for i in 0..2 {
        assert!(content.lower_bounds[i] <= content.upper_bounds[i]);
        assert!(content.lower_bounds[i] >= -TOL);
        assert!(
            (content.lower_bounds[i] - expected).abs() < 1e-3,
            "lower bound {i}: {}",
            content.lower_bounds[i]
        );
    }
    assert_eq!(m.reachable_bounds().0, content.lower_bounds.as_slice());
}

#[test]
fn short_step_halves_the_last_step() {
    let mut m = nautilus();
    let req = begin(&mut m, 5, Preference::Percentages(vec![50.0, 50.0]));
    assert!((distance(&req) - 20.0).abs() < TOL);

    let req = answer(&mut m, req, IterationResponse::short_step());
    assert!((distance(&req) - 10.0).abs() < TOL);
    assert_eq!(m.step_number(), 1);
    assert_eq!(m.n_iterations_left(), 5);

    // (3/4) * 10 + (1/4) * 100
    let req = answer(&mut m, req, IterationResponse::continue_previous());
    assert!((distance(&req) - 32.5).abs() < TOL);
}

#[test]
fn step_back_with_new_preferences_changes_direction() {
    let mut m = nautilus();
    let req = begin(&mut m, 5, Preference::Percentages(vec![50.0, 50.0]));
    let req = answer(&mut m, req, IterationResponse::continue_previous());
    assert_eq!(m.step_number(), 2);

    let req = answer(
        &mut m,
        req,
        IterationResponse::step_back().with_preference(Preference::Ranks(vec![1, 2])),
    );
    assert_eq!(m.step_number(), 2);
    assert!(req.as_iteration().is_some());

    // the objective ranked 2 is improved more
    let f = m.current_objectives().unwrap();
    assert!(f[1] < f[0], "expected f2 < f1, got {f:?}");
    assert_eq!(m.preference(), Some(&Preference::Ranks(vec![1, 2])));
    assert!((m.preference_factors()[0] - 1.0).abs() < TOL);
    assert!((m.preference_factors()[1] - 0.5).abs() < TOL);
}

#[test]
fn step_back_with_previous_preferences_retakes_the_step() {
    let mut m = nautilus();
    let req = begin(&mut m, 5, Preference::Percentages(vec![50.0, 50.0]));
    let req = answer(&mut m, req, IterationResponse::continue_previous());
    let before = m.iteration_points()[2].clone();

    let req = answer(&mut m, req, IterationResponse::step_back());
    assert_eq!(m.step_number(), 2);
    assert_eq!(m.n_iterations_left(), 4);
    assert_eq!(m.iteration_points()[2], before);
    assert!((distance(&req) - 40.0).abs() < TOL);
}

#[test]
fn new_preferences_without_stepping_back_advance() {
    let mut m = nautilus();
    let req = begin(&mut m, 5, Preference::Percentages(vec![50.0, 50.0]));
    let req = answer(
        &mut m,
        req,
        IterationResponse::new_preference(Preference::Percentages(vec![80.0, 20.0])),
    );
    assert_eq!(m.step_number(), 2);
    assert_eq!(m.n_iterations_left(), 4);
    let f = m.current_objectives().unwrap();
    assert!(f[0] < f[1], "expected f1 < f2, got {f:?}");
    assert!(distance(&req) > 0.0 && distance(&req) < 100.0);
}

#[test]
fn changing_iterations_resets_the_countdown() {
    let mut m = nautilus();
    let req = begin(&mut m, 10, Preference::Percentages(vec![50.0, 50.0]));
    assert!((distance(&req) - 10.0).abs() < TOL);

    // three iterations from here, two left after this step:
    // halfway from 10% to 100%
    let req = answer(
        &mut m,
        req,
        IterationResponse::continue_previous().with_n_iterations(3),
    );
    assert!((distance(&req) - 55.0).abs() < TOL);
    assert_eq!(m.n_iterations(), 3);
    assert_eq!(m.n_iterations_left(), 2);

    let req = answer(
        &mut m,
        req,
        IterationResponse::continue_previous().with_n_iterations(1),
    );
    assert!(req.is_stop());
}

#[test]
fn raising_iterations_extends_the_run() {
    let mut m = nautilus();
    let mut req = begin(&mut m, 2, Preference::Percentages(vec![50.0, 50.0]));
    let mut distances = vec![distance(&req)];

    req = answer(
        &mut m,
        req,
        IterationResponse::continue_previous().with_n_iterations(50),
    );
    assert_eq!(m.n_iterations(), 50);
    assert_eq!(m.n_iterations_left(), 49);
    while !req.is_stop() {
        distances.push(distance(&req));
        req = answer(&mut m, req, IterationResponse::continue_previous());
    }

    assert_eq!(m.step_number(), 50);
    assert_eq!(m.iteration_points().len(), 51);
    assert_eq!(distances.len(), 50);
    for w in distances.windows(2) {
        assert!(w[1] > w[0], "distance decreased: {} -> {}", w[0], w[1]);
    }
    assert!((distances[49] - 100.0).abs() < TOL);
}

#[test]
fn invalid_responses_are_rejected() {
    let mut m = nautilus();
    let mut req = m.start();
    let initial = req.as_initial_mut().unwrap();
    assert!(matches!(
        initial.set_response(InitialResponse::new(0, Preference::Ranks(vec![1, 2]))),
        Err(McdmError::InvalidResponse(_))
    ));
    assert!(matches!(
        initial.set_response(InitialResponse::new(3, Preference::Percentages(vec![60.0, 60.0]))),
        Err(McdmError::InvalidPreference(_))
    ));

    // iterating without an answer
    assert_eq!(m.iterate(req).unwrap_err(), McdmError::MissingResponse);

    let mut req = begin(&mut m, 3, Preference::Ranks(vec![1, 2]));
    let it = req.as_iteration_mut().unwrap();
    let missing = IterationResponse {
        use_previous_preference: false,
        ..IterationResponse::default()
    };
    assert!(it.set_response(missing).is_err());
    assert!(it
        .set_response(IterationResponse::new_preference(Preference::Ranks(vec![3, 1])))
        .is_err());
}

#[test]
fn construction_checks_dimensions() {
    let config = || NautilusConfig::default().with_method(method());
    assert!(matches!(
        Nautilus::new(schaffer(), vec![0.0], vec![1.0, 1.0], config()),
        Err(McdmError::DimensionMismatch { .. })
    ));
    assert!(Nautilus::new(schaffer(), vec![0.0; 3], vec![1.0; 3], config()).is_err());
    assert!(Nautilus::new(
        schaffer(),
        vec![0.0, 0.0],
        vec![1.0, 1.0],
        config().with_objective_names(vec!["only".into()])
    )
    .is_err());
    assert!(Nautilus::new(
        schaffer(),
        vec![0.0, 0.0],
        vec![1.0, 1.0],
        config().with_minimize(vec![1])
    )
    .is_err());
    assert!(Nautilus::new(schaffer(), vec![1.0, 0.0], vec![1.0, 1.0], config()).is_err());

    let m = Nautilus::new(schaffer(), vec![0.0, 0.0], vec![1.0, 1.0], config().with_epsilon(0.5))
        .unwrap();
    assert_eq!(m.utopian(), &[-0.5, -0.5]);
    assert_eq!(m.objective_names(), &["f1".to_string(), "f2".to_string()]);
    assert_eq!(m.minimize(), &[1, 1]);
    assert_eq!(m.step_number(), 0);
    assert!(m.current_solution().is_none());
}

#[test]
fn payoff_table_feeds_nautilus() {
    // cylinder: maximize volume (negated) and minimize surface area
    let vars = variable_builder(&["r", "h"], &[5.0, 20.0], &[2.5, 10.0], &[15.0, 50.0]).unwrap();
    let problem = FnProblem::new(vars, 2, |x| {
        let (r, h) = (x[0], x[1]);
        let pi = std::f64::consts::PI;
        vec![-(pi * r * r * h), 2.0 * pi * r * r + 2.0 * pi * r * h]
    })
    .unwrap()
    .with_constraint(|x, _| 1.618 - x[0] / x[1]);

    let table = payoff_table(&problem, &ScalarMinimizer::new(method())).unwrap();
    let ideal = table.ideal();
    let nadir = table.nadir();
    for i in 0..2 {
        assert!(nadir[i] > ideal[i]);
    }

    let config = NautilusConfig::default()
        .with_method(method())
        .with_objective_names(vec!["volume".into(), "area".into()])
        .with_minimize(vec![-1, 1]);
    let mut m = Nautilus::new(problem, ideal.clone(), nadir.clone(), config).unwrap();
    let mut req = begin(&mut m, 3, Preference::Percentages(vec![50.0, 50.0]));
    while !req.is_stop() {
        let content = req.as_iteration().unwrap().content();
        for i in 0..2 {
            assert!(
                content.lower_bounds[i] <= content.upper_bounds[i],
                "objective {i}: {} > {}",
                content.lower_bounds[i],
                content.upper_bounds[i]
            );
        }
        req = answer(&mut m, req, IterationResponse::continue_previous());
    }

    let stop = req.as_stop().unwrap().content();
    let eval = m.problem().evaluate(&stop.solution);
    assert!(eval.is_feasible());
    for i in 0..2 {
        assert!(stop.objective_vector[i] <= nadir[i] + 1e-6);
        assert!(stop.objective_vector[i] >= ideal[i] - 1e-3 * ideal[i].abs().max(1.0));
    }
}

#[test]
fn minimize_multipliers_do_not_change_the_run() {
    let run = |minimize: Vec<i8>| {
        let config = NautilusConfig::default()
            .with_method(method())
            .with_minimize(minimize);
        let mut m = Nautilus::new(schaffer(), vec![0.0, 0.0], vec![1.0, 1.0], config).unwrap();
        let req = begin(&mut m, 3, Preference::Ranks(vec![1, 2]));
        let content = req.as_iteration().unwrap().content().clone();
        (m.current_objectives().unwrap().to_vec(), content)
    };

    let (f_min, content_min) = run(vec![1, 1]);
    let (f_mixed, content_mixed) = run(vec![-1, 1]);
    assert_eq!(f_min, f_mixed);
    assert_eq!(content_min, content_mixed);
}
