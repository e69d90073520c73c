extern crate pretty_env_logger as pel;
extern crate satgeom;

use satgeom::io::{ConfigError, ConfigRepr, Configurable, OrbitSerde};
use satgeom::propagators::SolverMethod;
use satgeom::{Orbit, OrbitError, TwoBody};

use crate::config_path;

#[test]
fn load_named_orbits() {
    let _ = pel::try_init();
    let orbits = Orbit::from_yaml_named(config_path("orbits.yaml")).unwrap();
    assert_eq!(orbits.len(), 4);

    let geo = &orbits["geo"];
    assert!(matches!(geo, Orbit::Keplerian(_)));
    assert_eq!(geo.solver().method, SolverMethod::Newton);
    assert_eq!(geo.solver().max_iterations, 50);

    let molniya = &orbits["molniya"];
    assert_eq!(molniya.solver().method, SolverMethod::Halley);
    assert_eq!(molniya.solver().max_iterations, 30);
    assert!((molniya.eccentricity() - 0.74).abs() < f64::EPSILON);

    match orbits["polar_retrograde"] {
        Orbit::Equinoctial(eq) => {
            assert_eq!(eq.retrograde_factor(), -1);
            let kep = eq.to_keplerian().unwrap();
            assert!(kep.inc_rad().to_degrees() > 150.0);
        }
        _ => panic!("expected equinoctial elements"),
    }
    assert!(matches!(orbits["leo_equinoctial"], Orbit::Equinoctial(_)));

    for (name, orbit) in &orbits {
        let r = orbit.r_gei(orbit.epoch()).unwrap();
        assert!(r.norm() > 1.0, "{name} is inside the Earth: {r}");
    }
}

#[test]
fn raw_representation() {
    let cfgs = OrbitSerde::load_named(config_path("orbits.yaml")).unwrap();
    match &cfgs["molniya"] {
        OrbitSerde::Keplerian(kep) => {
            assert_eq!(kep.solver.solver.as_deref(), Some("halley"));
            assert_eq!(kep.solver.tolerance, Some(1e-13));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unknown_solver_method() {
    let _ = pel::try_init();
    assert_eq!(
        Orbit::from_yaml(config_path("bad_solver.yaml")),
        Err(OrbitError::UnknownSolverMethod {
            name: "secant".to_string()
        })
    );
}

#[test]
fn invalid_elements_are_rejected() {
    let data = r#"
- sma_er: 2.0
  ecc: 1.2
  inc_deg: 10.0
  raan_deg: 0.0
  aop_deg: 0.0
  ma_deg: 0.0
  epoch_mjd: 51544.5
- sma_er: 2.0
  ecc: 0.1
  inc_deg: 10.0
  raan_deg: 0.0
  aop_deg: 0.0
  ma_deg: 0.0
  epoch_mjd: 51544.5
  max_iterations: 0
"#;
    let cfgs = OrbitSerde::loads_many(data).unwrap();
    assert_eq!(
        Orbit::from_config(cfgs[0].clone()),
        Err(OrbitError::InvalidEccentricity { ecc: 1.2 })
    );
    assert!(matches!(
        Orbit::from_config(cfgs[1].clone()),
        Err(OrbitError::InvalidSolverOptions { .. })
    ));
}

#[test]
fn missing_file() {
    match OrbitSerde::load(config_path("does_not_exist.yaml")) {
        Err(ConfigError::ReadError { .. }) => {}
        other => panic!("expected a read error, got {other:?}"),
    }
    match Orbit::from_yaml(config_path("does_not_exist.yaml")) {
        Err(OrbitError::OrbitConfig { .. }) => {}
        other => panic!("expected a configuration error, got {other:?}"),
    }
}
