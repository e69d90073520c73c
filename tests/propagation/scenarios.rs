extern crate pretty_env_logger as pel;
extern crate satgeom;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use satgeom::cosmic::frames::gei2lla;
use satgeom::propagators::{KeplerianOrbit, SolverOpts};
use satgeom::{EarthModel, ModifiedJulianDate, TwoBody};
use std::f64::consts::TAU;

/// A nearly circular, slightly inclined geostationary orbit
fn geo() -> KeplerianOrbit {
    KeplerianOrbit::try_from_deg(
        6.610,
        2.2e-16,
        1.0,
        45.0,
        45.0,
        45.0,
        ModifiedJulianDate::new(51_544.5),
        SolverOpts::default(),
    )
    .unwrap()
}

#[test]
fn geo_mean_motion_and_period() {
    let _ = pel::try_init();
    let orbit = geo();
    assert_relative_eq!(
        orbit.orbital_period(),
        EarthModel::SIDEREAL_DAY_S,
        max_relative = 1e-3
    );
    assert_relative_eq!(
        orbit.mean_motion(),
        EarthModel::theta_dot_rad_s(),
        max_relative = 1e-3
    );
    assert_abs_diff_eq!(orbit.mean_motion() * orbit.orbital_period(), TAU, epsilon = 1e-12);
}

#[test]
fn geo_stays_on_its_circle() {
    let _ = pel::try_init();
    let orbit = geo();
    let epoch = orbit.epoch();
    let speed = orbit.sma_er() * orbit.mean_motion();
    for hours in [0.0, 1.0, 6.0, 12.0, 23.9, 24.0, 240.0] {
        let date = epoch.with_offset_s(hours * 3_600.0);
        let r = orbit.r_gei(date).unwrap();
        let v = orbit.v_gei(date).unwrap();
        assert_relative_eq!(r.norm(), 6.610, max_relative = 1e-12);
        assert_relative_eq!(v.norm(), speed, max_relative = 1e-12);
        // Circular: velocity is perpendicular to position
        assert_abs_diff_eq!(r.dot(&v) / (r.norm() * v.norm()), 0.0, epsilon = 1e-12);
        // One degree of inclination bounds the latitude
        let lla = gei2lla(&r, date);
        assert!(lla.latitude_rad.abs() <= 1.0_f64.to_radians() + 1e-12);
    }
}

#[test]
fn geo_is_nearly_fixed_over_the_earth() {
    let _ = pel::try_init();
    let orbit = geo();
    let epoch = orbit.epoch();
    let start = gei2lla(&orbit.r_gei(epoch).unwrap(), epoch);
    let end_date = epoch.with_offset_s(EarthModel::SIDEREAL_DAY_S);
    let end = gei2lla(&orbit.r_gei(end_date).unwrap(), end_date);
    let drift = (end.longitude_rad - start.longitude_rad).abs();
    assert!(drift < 1e-2, "longitude drift of {drift} rad per day");
    assert_abs_diff_eq!(end.altitude_er, start.altitude_er, epsilon = 1e-10);

    // The Earth relative velocity is a small fraction of the inertial one
    for hours in [0.0, 3.0, 18.0] {
        let date = epoch.with_offset_s(hours * 3_600.0);
        let v_ger = orbit.v_ger(date).unwrap();
        let v_gei = orbit.v_gei(date).unwrap();
        assert!(v_ger.norm() < 0.05 * v_gei.norm(), "{v_ger} at {hours} h");
        assert_relative_eq!(
            orbit.r_ger(date).unwrap().norm(),
            6.610,
            max_relative = 1e-12
        );
    }
}

#[test]
fn geo_element_set_round_trip() {
    let _ = pel::try_init();
    let orbit = geo();
    let date = orbit.epoch().with_offset_s(5_000.0);
    let det = KeplerianOrbit::element_set(
        date,
        &orbit.r_gei(date).unwrap(),
        &orbit.v_gei(date).unwrap(),
        SolverOpts::default(),
    )
    .unwrap();
    // Near circular, so AOP and MA individually are not determined
    assert!(!det.diagnostics.is_empty());
    assert_relative_eq!(det.orbit.sma_er(), 6.610, max_relative = 1e-10);
    assert_abs_diff_eq!(det.orbit.inc_rad(), 1.0_f64.to_radians(), epsilon = 1e-10);
    assert_abs_diff_eq!(det.orbit.raan_rad(), 45.0_f64.to_radians(), epsilon = 1e-10);
    // But the position is recovered, up to the noise on the eccentricity
    assert!((det.orbit.r_gei(date).unwrap() - orbit.r_gei(date).unwrap()).norm() < 1e-6);
}
