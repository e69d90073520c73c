/*
    satgeom, orbital geometry for satellite link analysis
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::cosmic::frames::{gei2ger, gei2ger_velocity};
use crate::cosmic::{EarthModel, ModifiedJulianDate};
use crate::linalg::Vector3;
use crate::utils::check_wrap;
use crate::OrbitError;
use std::f64::consts::TAU;
use std::fmt;

/// Provides the Kepler equation solver and its options.
pub mod kepler;
pub use kepler::{KeplerSolution, SolverMethod, SolverOpts};

// Re-Export
mod keplerian;
pub use keplerian::*;
mod equinoctial;
pub use equinoctial::*;

/// Mean motion in rad/s of an orbit whose semi-major axis is provided in Earth radii
pub fn mean_motion(sma_er: f64) -> f64 {
    (EarthModel::GM_KM3_S2 / EarthModel::er_to_km(sma_er).powi(3)).sqrt()
}

/// Orbital period in seconds of an orbit whose semi-major axis is provided in Earth radii
pub fn orbital_period(sma_er: f64) -> f64 {
    TAU * (EarthModel::er_to_km(sma_er).powi(3) / EarthModel::GM_KM3_S2).sqrt()
}

/// Something worth knowing about a computation that nonetheless produced a result.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// The Kepler equation solver hit its iteration cap
    KeplerNonConvergence { iterations: usize, last_step: f64 },
    /// Near circular orbit: the argument of periapsis and mean anomaly are poorly determined
    NearCircular { ecc: f64 },
    /// Near equatorial orbit: the right ascension of the ascending node is poorly determined.
    /// When exactly equatorial, the position is not recoverable from the Keplerian elements.
    NearEquatorial { inc_rad: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeplerNonConvergence {
                iterations,
                last_step,
            } => write!(
                f,
                "Kepler solver did not converge after {iterations} iterations (last step {last_step:e})"
            ),
            Self::NearCircular { ecc } => write!(
                f,
                "eccentricity of {ecc:e} is near circular: AOP and MA are ill-conditioned"
            ),
            Self::NearEquatorial { inc_rad } => write!(
                f,
                "inclination of {:e} deg is near equatorial: RAAN is ill-conditioned",
                inc_rad.to_degrees()
            ),
        }
    }
}

/// The two-body orbit contract shared by all element representations.
///
/// Frames are documented on each method: "GOI" is the inertial frame of the orbital plane,
/// "GEI" the geocentric equatorial inertial frame and "GER" the Earth fixed frame.
///
/// A propagator which may lose track of its object (e.g. SGP4) reports `OrbitError::ObjectDecayed`
/// from `r_gei` and `r_ger`. The two-body propagators of this crate never do.
pub trait TwoBody {
    /// Epoch of the elements
    fn epoch(&self) -> ModifiedJulianDate;

    /// Semi-major axis in Earth radii
    fn sma_er(&self) -> f64;

    fn eccentricity(&self) -> f64;

    fn solver(&self) -> &SolverOpts;

    /// Mean motion, in rad/s
    fn mean_motion(&self) -> f64;

    /// Orbital period, in seconds
    fn orbital_period(&self) -> f64;

    /// Mean anomaly (or mean longitude) at the epoch, in radians
    fn mean_position_at_epoch(&self) -> f64;

    /// Mean anomaly (or mean longitude) at the provided date, wrapped to [0, 2π)
    fn mean_position(&self, date: ModifiedJulianDate) -> f64 {
        check_wrap(
            self.mean_position_at_epoch() + self.mean_motion() * date.seconds_since(self.epoch()),
        )
    }

    /// Solves the Kepler equation of this representation and reports on convergence.
    fn kepler_solution(&self, mean_pos: f64) -> KeplerSolution;

    /// Eccentric anomaly (or eccentric longitude) matching the provided mean position
    fn keplers_equation(&self, mean_pos: f64) -> f64 {
        self.kepler_solution(mean_pos).value
    }

    /// Position in the orbital plane in Earth radii
    fn r_goi(&self, eccentric_pos: f64) -> Vector3<f64>;

    /// Velocity in the orbital plane in Earth radii per second
    fn v_goi(&self, eccentric_pos: f64) -> Vector3<f64>;

    /// Position in GEI in Earth radii
    fn r_gei(&self, date: ModifiedJulianDate) -> Result<Vector3<f64>, OrbitError>;

    /// Velocity in GEI in Earth radii per second
    fn v_gei(&self, date: ModifiedJulianDate) -> Result<Vector3<f64>, OrbitError>;

    /// Position in GER in Earth radii
    fn r_ger(&self, date: ModifiedJulianDate) -> Result<Vector3<f64>, OrbitError> {
        Ok(gei2ger(&self.r_gei(date)?, date))
    }

    /// Velocity relative to the rotating Earth, expressed in GER, in Earth radii per second
    fn v_ger(&self, date: ModifiedJulianDate) -> Result<Vector3<f64>, OrbitError> {
        Ok(gei2ger_velocity(
            &self.r_gei(date)?,
            &self.v_gei(date)?,
            date,
        ))
    }
}

/// Eccentric position at the date, logging if the solver did not converge.
pub(crate) fn eccentric_position<O: TwoBody + ?Sized>(orbit: &O, date: ModifiedJulianDate) -> f64 {
    let mean_pos = orbit.mean_position(date);
    let sol = orbit.kepler_solution(mean_pos);
    if !sol.converged {
        warn!(
            "{}",
            Diagnostic::KeplerNonConvergence {
                iterations: sol.iterations,
                last_step: sol.last_step
            }
        );
    }
    sol.value
}

/// An orbit in either of the supported element representations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Orbit {
    Keplerian(KeplerianOrbit),
    Equinoctial(EquinoctialOrbit),
}

impl Orbit {
    /// Returns this orbit as Keplerian elements, converting if needed.
    pub fn to_keplerian(&self) -> Result<KeplerianOrbit, OrbitError> {
        match self {
            Self::Keplerian(orbit) => Ok(*orbit),
            Self::Equinoctial(orbit) => orbit.to_keplerian(),
        }
    }

    /// Returns this orbit as Equinoctial elements, converting if needed.
    pub fn to_equinoctial(&self) -> Result<EquinoctialOrbit, OrbitError> {
        match self {
            Self::Keplerian(orbit) => orbit.to_equinoctial(),
            Self::Equinoctial(orbit) => Ok(*orbit),
        }
    }

    fn inner(&self) -> &dyn TwoBody {
        match self {
            Self::Keplerian(orbit) => orbit,
            Self::Equinoctial(orbit) => orbit,
        }
    }
}

impl From<KeplerianOrbit> for Orbit {
    fn from(orbit: KeplerianOrbit) -> Self {
        Self::Keplerian(orbit)
    }
}

impl From<EquinoctialOrbit> for Orbit {
    fn from(orbit: EquinoctialOrbit) -> Self {
        Self::Equinoctial(orbit)
    }
}

impl TwoBody for Orbit {
    fn epoch(&self) -> ModifiedJulianDate {
        self.inner().epoch()
    }

    fn sma_er(&self) -> f64 {
        self.inner().sma_er()
    }

    fn eccentricity(&self) -> f64 {
        self.inner().eccentricity()
    }

    fn solver(&self) -> &SolverOpts {
        match self {
            Self::Keplerian(orbit) => orbit.solver(),
            Self::Equinoctial(orbit) => orbit.solver(),
        }
    }

    fn mean_motion(&self) -> f64 {
        self.inner().mean_motion()
    }

    fn orbital_period(&self) -> f64 {
        self.inner().orbital_period()
    }

    fn mean_position_at_epoch(&self) -> f64 {
        self.inner().mean_position_at_epoch()
    }

    fn kepler_solution(&self, mean_pos: f64) -> KeplerSolution {
        self.inner().kepler_solution(mean_pos)
    }

    fn r_goi(&self, eccentric_pos: f64) -> Vector3<f64> {
        self.inner().r_goi(eccentric_pos)
    }

    fn v_goi(&self, eccentric_pos: f64) -> Vector3<f64> {
        self.inner().v_goi(eccentric_pos)
    }

    fn r_gei(&self, date: ModifiedJulianDate) -> Result<Vector3<f64>, OrbitError> {
        self.inner().r_gei(date)
    }

    fn v_gei(&self, date: ModifiedJulianDate) -> Result<Vector3<f64>, OrbitError> {
        self.inner().v_gei(date)
    }
}

impl fmt::Display for Orbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keplerian(orbit) => write!(f, "{orbit}"),
            Self::Equinoctial(orbit) => write!(f, "{orbit}"),
        }
    }
}

#[test]
fn test_mean_motion_period_identity() {
    for sma_er in [1.05, 1.2, 4.2, 6.61, 60.0] {
        assert!((mean_motion(sma_er) * orbital_period(sma_er) - TAU).abs() < 1e-12);
    }
}
