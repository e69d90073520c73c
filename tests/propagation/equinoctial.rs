extern crate pretty_env_logger as pel;
extern crate satgeom;

use approx::assert_abs_diff_eq;
use rstest::rstest;
use satgeom::propagators::{EquinoctialOrbit, KeplerianOrbit, SolverMethod, SolverOpts};
use satgeom::{ModifiedJulianDate, Orbit, TwoBody};

#[rstest]
#[case::direct(2.0, 0.1, 30.0, SolverMethod::Newton)]
#[case::retrograde(1.3, 0.02, 150.0, SolverMethod::Newton)]
#[case::polar(1.1, 0.001, 90.0, SolverMethod::Halley)]
#[case::high_ecc(6.0, 0.85, 63.4, SolverMethod::Newton)]
#[case::high_ecc_retrograde(6.0, 0.85, 170.0, SolverMethod::Halley)]
fn matches_keplerian(
    #[case] sma_er: f64,
    #[case] ecc: f64,
    #[case] inc_deg: f64,
    #[case] method: SolverMethod,
) {
    let _ = pel::try_init();
    let epoch = ModifiedJulianDate::J2000;
    let kep = KeplerianOrbit::try_from_deg(
        sma_er,
        ecc,
        inc_deg,
        250.0,
        75.0,
        15.0,
        epoch,
        SolverOpts::builder().method(method).build(),
    )
    .unwrap();
    let eq = kep.to_equinoctial().unwrap();
    let expected_j = if inc_deg > 90.0 { -1 } else { 1 };
    assert_eq!(eq.retrograde_factor(), expected_j);
    assert_abs_diff_eq!(eq.eccentricity(), ecc, epsilon = 1e-15);
    assert_eq!(eq.mean_motion(), kep.mean_motion());

    for offset_s in [0.0, 600.0, 7_200.0, 86_400.0, -40_000.0] {
        let date = epoch.with_offset_s(offset_s);
        let r_kep = kep.r_gei(date).unwrap();
        let r_eq = eq.r_gei(date).unwrap();
        assert!(
            (r_kep - r_eq).norm() < 1e-10 * sma_er,
            "r at {offset_s} s: {r_kep} vs {r_eq}"
        );
        let v_kep = kep.v_gei(date).unwrap();
        let v_eq = eq.v_gei(date).unwrap();
        assert!(
            (v_kep - v_eq).norm() < 1e-10 * v_kep.norm(),
            "v at {offset_s} s: {v_kep} vs {v_eq}"
        );
    }

    // And back to the same Keplerian elements
    let back = eq.to_keplerian().unwrap();
    assert_abs_diff_eq!(back.sma_er(), kep.sma_er());
    assert_abs_diff_eq!(back.eccentricity(), kep.eccentricity(), epsilon = 1e-14);
    assert_abs_diff_eq!(back.inc_rad(), kep.inc_rad(), epsilon = 1e-12);
    assert_abs_diff_eq!(back.raan_rad(), kep.raan_rad(), epsilon = 1e-12);
    let date = epoch.with_offset_s(3_000.0);
    assert!((back.r_gei(date).unwrap() - kep.r_gei(date).unwrap()).norm() < 1e-10 * sma_er);
}

#[test]
fn equinoctial_kepler_equation() {
    let orbit = EquinoctialOrbit::try_new(
        1,
        4.0,
        0.5,
        -0.6,
        0.1,
        0.2,
        1.0,
        ModifiedJulianDate::J2000,
        SolverOpts::default(),
    )
    .unwrap();
    assert_abs_diff_eq!(orbit.eccentricity(), 0.6_f64.hypot(0.5), epsilon = 1e-15);
    for lambda in [0.0, 1.0, 2.5, 4.0, 6.0] {
        let sol = orbit.kepler_solution(lambda);
        assert!(sol.converged, "{sol:?}");
        let f = sol.value;
        let residual = f + orbit.h() * f.cos() - orbit.k() * f.sin() - lambda;
        assert!(residual.abs() < 1e-10, "λ = {lambda}: {residual:e}");
    }
    // Radius never reaches below the periapsis
    let date = ModifiedJulianDate::J2000.with_offset_s(5_000.0);
    let r = orbit.r_gei(date).unwrap().norm();
    assert!(r >= 4.0 * (1.0 - orbit.eccentricity()) - 1e-12);
    assert!(r <= 4.0 * (1.0 + orbit.eccentricity()) + 1e-12);
}

#[test]
fn orbit_enum_dispatch() {
    let epoch = ModifiedJulianDate::J2000;
    let kep =
        KeplerianOrbit::try_from_deg(1.5, 0.05, 45.0, 10.0, 20.0, 30.0, epoch, SolverOpts::default())
            .unwrap();
    let as_kep = Orbit::from(kep);
    let as_eq = Orbit::from(kep.to_equinoctial().unwrap());
    assert_eq!(as_kep.to_keplerian().unwrap(), kep);
    assert_eq!(as_eq.epoch(), epoch);
    assert_eq!(as_kep.orbital_period(), as_eq.orbital_period());

    let date = epoch.with_offset_s(1_234.0);
    assert!((as_kep.r_ger(date).unwrap() - as_eq.r_ger(date).unwrap()).norm() < 1e-10);
    assert!((as_kep.v_ger(date).unwrap() - as_eq.v_ger(date).unwrap()).norm() < 1e-13);
    assert!(format!("{as_eq}").contains("Equinoctial"));
}

#[test]
fn rebuilt_values() {
    let orbit = EquinoctialOrbit::try_new(
        -1,
        2.0,
        0.0,
        0.1,
        0.2,
        0.3,
        7.0,
        ModifiedJulianDate::J2000,
        SolverOpts::default(),
    )
    .unwrap();
    // Mean longitude is wrapped
    assert_abs_diff_eq!(orbit.mean_longitude_rad(), 7.0 - std::f64::consts::TAU, epsilon = 1e-15);

    let bigger = orbit.with_sma(4.0).unwrap();
    assert_eq!(orbit.sma_er(), 2.0);
    assert!((bigger.orbital_period() / orbit.orbital_period() - 8.0_f64.sqrt()).abs() < 1e-12);

    let halley = orbit.with_solver(SolverOpts::halley()).unwrap();
    assert_eq!(halley.solver().method, SolverMethod::Halley);
    assert!(orbit
        .with_solver(SolverOpts::builder().tolerance(-1.0).build())
        .is_err());
    assert!(orbit.with_mean_longitude(1.0).is_ok());
}
