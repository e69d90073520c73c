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

use crate::cosmic::ModifiedJulianDate;
use crate::io::ConfigError;
use crate::time::HifitimeError;
use snafu::prelude::*;

/// Errors raised when building or evaluating an orbit.
///
/// Numerical non-convergence is deliberately absent: the Kepler solver returns its best
/// iterate along with a `converged` flag and never fails.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum OrbitError {
    #[snafu(display("unknown Kepler solver method `{name}` (expected `newton` or `halley`)"))]
    UnknownSolverMethod { name: String },
    #[snafu(display("solver options are invalid: {msg}"))]
    InvalidSolverOptions { msg: String },
    #[snafu(display("eccentricity must be in [0, 1) but got {ecc}"))]
    InvalidEccentricity { ecc: f64 },
    #[snafu(display("semi-major axis must be strictly positive but got {sma} Earth radii"))]
    InvalidSemiMajorAxis { sma: f64 },
    #[snafu(display("retrograde factor must be +1 or -1 but got {j}"))]
    InvalidRetrogradeFactor { j: i8 },
    #[snafu(display("equinoctial eccentricity components h={h}, k={k} are not elliptical"))]
    InvalidEquinoctialEccentricity { h: f64, k: f64 },
    #[snafu(display("invalid calendar date: {source}"))]
    InvalidDate { source: HifitimeError },
    #[snafu(display("seconds of a calendar date must be in [0, 60) but got {second}"))]
    InvalidSecond { second: f64 },
    #[snafu(display("state vector cannot be converted to elements: {msg}"))]
    DegenerateState { msg: String },
    #[snafu(display("object decayed before {epoch}"))]
    ObjectDecayed { epoch: ModifiedJulianDate },
    #[snafu(display("orbit configuration failed: {source}"))]
    OrbitConfig { source: ConfigError },
}

#[test]
fn test_error_display() {
    let err = OrbitError::UnknownSolverMethod {
        name: "secant".to_string(),
    };
    assert!(format!("{err}").contains("secant"));

    let err = OrbitError::ObjectDecayed {
        epoch: ModifiedJulianDate::new(51_544.5),
    };
    assert!(format!("{err}").contains("51544.5"));
}
