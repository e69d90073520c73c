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

/*! # satgeom

Orbital mechanics and reference frame transformations underlying satellite network
interference and coordination analysis: time representation, Earth constants, rotations
between the inertial (GEI), rotating (GER) and topocentric (LTP) frames, two-body propagation
from Keplerian or Equinoctial elements, and orbit determination from state vectors.

Unless noted otherwise, positions are in Earth radii, velocities in Earth radii per second,
angles in radians and time offsets in seconds.
*/

/// Provides the two-body propagators (Keplerian and Equinoctial) and the Kepler equation solver.
pub mod propagators;

/// Provides the time representation, the Earth model, the frame algebra and ground stations.
pub mod cosmic;

/// Utility functions shared by different modules, and which may be useful to engineers.
pub mod utils;

mod errors;
/// Functions which may fail will return an error instead of panicking.
pub use self::errors::OrbitError;

/// Configuration loading of orbits and stations from YAML.
pub mod io;

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

/// Re-export some useful things
pub use self::cosmic::{EarthModel, ModifiedJulianDate, Station};
pub use self::propagators::{EquinoctialOrbit, KeplerianOrbit, Orbit, TwoBody};
