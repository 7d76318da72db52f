use approx::assert_relative_eq;
use pksim::prelude::*;
use pksim::simulator::one_compartment::{bateman, bateman_limit, is_degenerate};

const C0: f64 = 20.0;
const KEL: f64 = 0.2;

fn direct_bateman(ka: f64, kel: f64, t: f64) -> f64 {
    C0 * (ka / (ka - kel)) * ((-kel * t).exp() - (-ka * t).exp())
}

#[test]
fn direct_formula_breaks_down_at_the_singularity() {
    let c = direct_bateman(KEL, KEL, 3.0);
    assert!(!c.is_finite());
}

#[test]
fn limit_is_continuous_with_nearby_rates() {
    for factor in [1.0 + 1e-5, 1.0 - 1e-5] {
        let ka = KEL * factor;
        assert!(!is_degenerate(ka, KEL));
        for t in [0.5, 1.0, 5.0, 12.0, 24.0] {
            let near = bateman(C0, ka, KEL, t);
            let limit = bateman_limit(C0, KEL, t);
            assert!(near.is_finite());
            assert_relative_eq!(near, limit, max_relative = 1e-4);
        }
    }
}

#[test]
fn engine_handles_equal_rates() {
    let params = SimulationParameters::builder(ModelKind::OralFirstOrder)
        .dose(500.0)
        .vd(25.0)
        .ka(KEL)
        .kel(KEL)
        .regimen(12.0, 3)
        .build()
        .unwrap();
    let grid = TimeGrid::for_regimen(12.0, 3, 24.0, 600).unwrap();
    let series = compute_concentration(&grid, &params).unwrap();

    assert!(series.concentrations().iter().all(|c| c.is_finite()));
    assert_eq!(series.concentrations()[0], 0.0);

    // single-dose peak of the limiting form is at 1/kel with C0/e
    let single = SimulationParameters::builder(ModelKind::OralFirstOrder)
        .dose(500.0)
        .vd(25.0)
        .ka(KEL)
        .kel(KEL)
        .build()
        .unwrap();
    let grid = TimeGrid::from_times(vec![0.0, 1.0 / KEL]).unwrap();
    let series = compute_concentration(&grid, &single).unwrap();
    assert_relative_eq!(
        series.concentrations()[1],
        C0 / std::f64::consts::E,
        max_relative = 1e-12
    );
}

#[test]
fn rates_within_tolerance_use_the_limit() {
    let ka = KEL * (1.0 + 1e-9);
    assert!(is_degenerate(ka, KEL));
    assert_eq!(bateman(C0, ka, KEL, 4.0), bateman_limit(C0, KEL, 4.0));
}

#[test]
fn parallel_engine_agrees_on_long_regimens() {
    let params = SimulationParameters::builder(ModelKind::OralFirstOrder)
        .dose(250.0)
        .vd(30.0)
        .ka(1.2)
        .kel(0.15)
        .regimen(6.0, 60)
        .build()
        .unwrap();
    let grid = TimeGrid::for_regimen(6.0, 60, 48.0, 5000).unwrap();
    let seq = compute_concentration(&grid, &params).unwrap();
    let par = compute_concentration_par(&grid, &params).unwrap();

    for (a, b) in seq.concentrations().iter().zip(par.concentrations()) {
        assert_relative_eq!(*a, *b, max_relative = 1e-10, epsilon = 1e-12);
    }
}
