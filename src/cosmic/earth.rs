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

use super::mjd::{ModifiedJulianDate, SECONDS_PER_DAY};

/// Physical constants of the Earth and its rotation.
///
/// Lengths are in km unless the name says otherwise. All orbit computations in this crate work in
/// Earth radii, hence the helpers to switch between the two.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EarthModel;

impl EarthModel {
    /// WGS-84 equatorial radius, in km
    pub const EQUATORIAL_RADIUS_KM: f64 = 6_378.137;
    /// WGS-84 flattening
    pub const FLATTENING: f64 = 1.0 / 298.257_223_563;
    /// Gravitational parameter, in km^3/s^2
    pub const GM_KM3_S2: f64 = 398_600.441_8;
    /// Second zonal harmonic
    pub const J2: f64 = 1.082_626_68e-3;
    /// Sidereal rotation period, in seconds
    pub const SIDEREAL_DAY_S: f64 = 86_164.090_5;
    /// Greenwich hour angle at `THETA_EPOCH`, in degrees
    pub const THETA0_DEG: f64 = 280.460_618_37;
    /// Greenwich hour angle rate, in degrees per day
    pub const THETA_DOT_DEG_DAY: f64 = 360.985_647_366_29;
    /// Reference date of the Greenwich hour angle
    pub const THETA_EPOCH: ModifiedJulianDate = ModifiedJulianDate::J2000;

    /// Greenwich hour angle in radians at the provided date.
    ///
    /// The angle is NOT wrapped to [0, 2π): it grows without bound from the reference date.
    pub fn theta(date: ModifiedJulianDate) -> f64 {
        let days = date.seconds_since(Self::THETA_EPOCH) / SECONDS_PER_DAY;
        (Self::THETA0_DEG + Self::THETA_DOT_DEG_DAY * days).to_radians()
    }

    /// Rotation rate of the Greenwich hour angle, in rad/s
    pub fn theta_dot_rad_s() -> f64 {
        Self::THETA_DOT_DEG_DAY.to_radians() / SECONDS_PER_DAY
    }

    /// Gravitational parameter in Earth radii^3/s^2
    pub fn gm_er3_s2() -> f64 {
        Self::GM_KM3_S2 / Self::EQUATORIAL_RADIUS_KM.powi(3)
    }

    /// Square of the first eccentricity of the reference ellipsoid
    pub fn ecc_sq() -> f64 {
        2.0 * Self::FLATTENING - Self::FLATTENING.powi(2)
    }

    pub fn er_to_km(value_er: f64) -> f64 {
        value_er * Self::EQUATORIAL_RADIUS_KM
    }

    pub fn km_to_er(value_km: f64) -> f64 {
        value_km / Self::EQUATORIAL_RADIUS_KM
    }
}

#[test]
fn test_theta() {
    use std::f64::consts::TAU;

    let theta0 = EarthModel::theta(ModifiedJulianDate::J2000);
    assert!((theta0 - 280.460_618_37_f64.to_radians()).abs() < 1e-15);

    // One sidereal day later, the Earth has made one full turn
    let one_turn = ModifiedJulianDate::J2000.with_offset_s(EarthModel::SIDEREAL_DAY_S);
    let delta = EarthModel::theta(one_turn) - EarthModel::theta(ModifiedJulianDate::J2000);
    assert!((delta - TAU).abs() < 1e-5);

    // Unwrapped: far from the epoch the angle keeps growing
    let later = ModifiedJulianDate::new(51_544.5 + 365.25);
    assert!(EarthModel::theta(later) > 100.0 * TAU);
    assert!((EarthModel::theta_dot_rad_s() - 7.292_115e-5).abs() < 1e-10);
}
