extern crate pretty_env_logger as pel;
extern crate satgeom;

use rstest::rstest;
use satgeom::propagators::kepler::solve_kepler;
use satgeom::propagators::{KeplerianOrbit, SolverMethod, SolverOpts};
use satgeom::{ModifiedJulianDate, TwoBody};

fn orbit(ecc: f64, solver: SolverOpts) -> KeplerianOrbit {
    KeplerianOrbit::try_from_deg(
        3.0,
        ecc,
        30.0,
        40.0,
        50.0,
        0.0,
        ModifiedJulianDate::J2000,
        solver,
    )
    .unwrap()
}

#[rstest]
#[case(SolverMethod::Newton)]
#[case(SolverMethod::Halley)]
fn circular_identity(#[case] method: SolverMethod) {
    let circ = orbit(0.0, SolverOpts::builder().method(method).build());
    for mean_anomaly in [0.0, 0.5, 1.0, 3.0, 6.0] {
        assert_eq!(circ.keplers_equation(mean_anomaly), mean_anomaly);
    }
}

#[rstest]
#[case(SolverMethod::Newton)]
#[case(SolverMethod::Halley)]
fn high_eccentricity_periapsis(#[case] method: SolverMethod) {
    let _ = pel::try_init();
    let eccentric = orbit(0.9, SolverOpts::builder().method(method).build());
    let sol = eccentric.kepler_solution(0.0);
    assert!(sol.converged, "{sol:?}");
    assert!(sol.value.abs() < 1e-10, "{sol:?}");
}

#[rstest]
fn kepler_residual(
    #[values(SolverMethod::Newton, SolverMethod::Halley)] method: SolverMethod,
    #[values(0.01, 0.3, 0.79, 0.8, 0.95, 0.99)] ecc: f64,
    #[values(0.001, 0.5, 2.0, 3.14, 4.5, 6.28)] mean_anomaly: f64,
) {
    let opts = SolverOpts::builder().method(method).build();
    let sol = solve_kepler(&opts, mean_anomaly, ecc);
    assert!(sol.converged, "e = {ecc}, M = {mean_anomaly}: {sol:?}");
    let residual = sol.value - ecc * sol.value.sin() - mean_anomaly;
    assert!(residual.abs() < 1e-10, "e = {ecc}, M = {mean_anomaly}: {residual:e}");
}

#[test]
fn iteration_cap_is_not_an_error() {
    let _ = pel::try_init();
    let capped = orbit(
        0.95,
        SolverOpts::builder().max_iterations(2).tolerance(1e-15).build(),
    );
    let sol = capped.kepler_solution(1.0);
    assert!(!sol.converged);
    assert_eq!(sol.iterations, 2);
    // The last iterate is still used for propagation
    let r = capped.r_gei(ModifiedJulianDate::J2000.with_offset_s(1_000.0)).unwrap();
    assert!(r.norm().is_finite());
}
