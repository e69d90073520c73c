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

//! Conversions between the inertial (GEI), Earth fixed (GEI rotating, GER) and topocentric (LTP)
//! frames.
//!
//! Frames are a convention of each function's signature: a `Vector3` does not carry its frame,
//! so callers must not mix vectors from different frames without going through one of these
//! functions.

use super::{EarthModel, ModifiedJulianDate, Station};
use crate::linalg::{Matrix3, Vector3};
use crate::utils::{check_wrap, r3, r3_dot};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Spherical coordinates with respect to the rotating Earth.
///
/// **Units:** radians, radians, Earth radii above a spherical Earth of radius 1
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLongAlt {
    pub latitude_rad: f64,
    pub longitude_rad: f64,
    pub altitude_er: f64,
}

/// Topocentric spherical coordinates.
///
/// The azimuth is counted from North through East in [0, 2π) and the elevation lies in
/// [-π/2, π/2].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeAzEl {
    pub range_er: f64,
    pub azimuth_rad: f64,
    pub elevation_rad: f64,
}

impl fmt::Display for RangeAzEl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "range = {:.6} ER\taz. = {:.6} deg\telev. = {:.6} deg",
            self.range_er,
            self.azimuth_rad.to_degrees(),
            self.elevation_rad.to_degrees()
        )
    }
}

/// Rotation from GEI to GER at the provided date
pub fn dcm_gei2ger(date: ModifiedJulianDate) -> Matrix3<f64> {
    r3(EarthModel::theta(date))
}

/// Time derivative of `dcm_gei2ger`, in 1/s
pub fn dcm_dot_gei2ger(date: ModifiedJulianDate) -> Matrix3<f64> {
    r3_dot(EarthModel::theta(date), EarthModel::theta_dot_rad_s())
}

pub fn gei2ger(r_gei: &Vector3<f64>, date: ModifiedJulianDate) -> Vector3<f64> {
    dcm_gei2ger(date) * r_gei
}

pub fn ger2gei(r_ger: &Vector3<f64>, date: ModifiedJulianDate) -> Vector3<f64> {
    dcm_gei2ger(date).transpose() * r_ger
}

/// Converts an inertial velocity to the rotating frame, accounting for the rotation of the frame
/// itself (transport theorem). Both vectors must be expressed in GEI.
pub fn gei2ger_velocity(
    r_gei: &Vector3<f64>,
    v_gei: &Vector3<f64>,
    date: ModifiedJulianDate,
) -> Vector3<f64> {
    dcm_gei2ger(date) * v_gei + dcm_dot_gei2ger(date) * r_gei
}

/// Converts a rotating frame velocity back to the inertial frame. Both vectors must be expressed
/// in GER.
pub fn ger2gei_velocity(
    r_ger: &Vector3<f64>,
    v_ger: &Vector3<f64>,
    date: ModifiedJulianDate,
) -> Vector3<f64> {
    dcm_gei2ger(date).transpose() * v_ger + dcm_dot_gei2ger(date).transpose() * r_ger
}

/// Returns the GER position and velocity of the provided GEI state
pub fn gei2ger_state(
    r_gei: &Vector3<f64>,
    v_gei: &Vector3<f64>,
    date: ModifiedJulianDate,
) -> (Vector3<f64>, Vector3<f64>) {
    (
        gei2ger(r_gei, date),
        gei2ger_velocity(r_gei, v_gei, date),
    )
}

/// Returns the GEI position and velocity of the provided GER state
pub fn ger2gei_state(
    r_ger: &Vector3<f64>,
    v_ger: &Vector3<f64>,
    date: ModifiedJulianDate,
) -> (Vector3<f64>, Vector3<f64>) {
    (
        ger2gei(r_ger, date),
        ger2gei_velocity(r_ger, v_ger, date),
    )
}

/// Latitude, longitude and altitude of a GEI position over a spherical Earth.
///
/// NOTE: this is NOT a geodetic conversion, the altitude is the radial distance minus one Earth
/// radius, unlike the station frames which use the geodetic latitude.
pub fn gei2lla(r_gei: &Vector3<f64>, date: ModifiedJulianDate) -> LatLongAlt {
    let r_ger = gei2ger(r_gei, date);
    let rmag = r_ger.norm();
    if rmag < f64::EPSILON {
        warn!("latitude and longitude undefined at the center of the Earth");
    }
    LatLongAlt {
        latitude_rad: r_ger.z.atan2((r_ger.x.powi(2) + r_ger.y.powi(2)).sqrt()),
        longitude_rad: r_ger.y.atan2(r_ger.x),
        altitude_er: rmag - 1.0,
    }
}

pub fn lla2gei(lla: &LatLongAlt, date: ModifiedJulianDate) -> Vector3<f64> {
    let radius = 1.0 + lla.altitude_er;
    let (sin_lat, cos_lat) = lla.latitude_rad.sin_cos();
    let (sin_long, cos_long) = lla.longitude_rad.sin_cos();
    let r_ger = radius * Vector3::new(cos_lat * cos_long, cos_lat * sin_long, sin_lat);
    ger2gei(&r_ger, date)
}

/// Rotation from the Earth fixed frame (GER) to the station's East-North-Zenith frame.
///
/// The rows are the East, North and Zenith unit vectors at the geodetic latitude and longitude
/// of the station.
#[allow(non_snake_case)]
pub fn E_e2t(station: &Station) -> Matrix3<f64> {
    let phi = station.latitude_deg.to_radians();
    let lambda = station.longitude_deg.to_radians();
    if station.latitude_deg.abs() > 90.0 {
        warn!(
            "{} latitude of {} deg is outside of [-90, 90]",
            station.name, station.latitude_deg
        );
    } else if (90.0 - station.latitude_deg.abs()) < 1e-9 {
        warn!("{} is at a pole: East and North are set by its longitude only", station.name);
    }
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_lambda, cos_lambda) = lambda.sin_cos();
    Matrix3::new(
        -sin_lambda,
        cos_lambda,
        0.0,
        -sin_phi * cos_lambda,
        -sin_phi * sin_lambda,
        cos_phi,
        cos_phi * cos_lambda,
        cos_phi * sin_lambda,
        sin_phi,
    )
}

/// Rotation from the station's East-North-Zenith frame to the Earth fixed frame (GER).
#[allow(non_snake_case)]
pub fn E_t2e(station: &Station) -> Matrix3<f64> {
    E_e2t(station).transpose()
}

/// Position of a GEI vector as seen from the station, in the station's local tangent plane.
pub fn gei2ltp(r_gei: &Vector3<f64>, station: &Station, date: ModifiedJulianDate) -> Vector3<f64> {
    E_e2t(station) * (gei2ger(r_gei, date) - station.r_ger())
}

pub fn ltp2gei(r_ltp: &Vector3<f64>, station: &Station, date: ModifiedJulianDate) -> Vector3<f64> {
    ger2gei(&(E_t2e(station) * r_ltp + station.r_ger()), date)
}

/// Range, azimuth and elevation of a local tangent plane vector.
pub fn ltp2rae(r_ltp: &Vector3<f64>) -> RangeAzEl {
    let (east, north, zenith) = (r_ltp.x, r_ltp.y, r_ltp.z);
    RangeAzEl {
        range_er: r_ltp.norm(),
        azimuth_rad: check_wrap(east.atan2(north)),
        elevation_rad: zenith.atan2((east.powi(2) + north.powi(2)).sqrt()),
    }
}

pub fn rae2ltp(rae: &RangeAzEl) -> Vector3<f64> {
    let (sin_az, cos_az) = rae.azimuth_rad.sin_cos();
    let (sin_el, cos_el) = rae.elevation_rad.sin_cos();
    rae.range_er * Vector3::new(cos_el * sin_az, cos_el * cos_az, sin_el)
}
