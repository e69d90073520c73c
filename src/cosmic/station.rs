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

use super::frames::{gei2ltp, ltp2rae, RangeAzEl};
use super::{EarthModel, ModifiedJulianDate};
use crate::io::ConfigRepr;
use crate::linalg::Vector3;
use crate::propagators::TwoBody;
use crate::OrbitError;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// A ground station, defined by its geodetic coordinates on the Earth ellipsoid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    pub name: String,
    /// in degrees
    #[serde(default)]
    pub elevation_mask_deg: f64,
    /// geodetic, in degrees
    pub latitude_deg: f64,
    /// in degrees, positive East
    pub longitude_deg: f64,
    /// above the ellipsoid, in km
    #[serde(default)]
    pub height_km: f64,
}

impl Station {
    /// Initializes a point on the surface of the Earth.
    pub fn from_point(name: String, latitude_deg: f64, longitude_deg: f64, height_km: f64) -> Self {
        Self {
            name,
            elevation_mask_deg: 0.0,
            latitude_deg,
            longitude_deg,
            height_km,
        }
    }

    /// Returns a copy of this station with the provided elevation mask
    pub fn with_elevation_mask(mut self, elevation_mask_deg: f64) -> Self {
        self.elevation_mask_deg = elevation_mask_deg;
        self
    }

    /// Position of this station in the Earth fixed frame (GER), in Earth radii.
    ///
    /// NOTE: This computation accounts for the flattening of the Earth.
    /// Reference: G. Xu and Y. Xu, "GPS", DOI 10.1007/978-3-662-50367-6_2, 2016
    pub fn r_ger(&self) -> Vector3<f64> {
        let flattening = EarthModel::FLATTENING;
        let e2 = EarthModel::ecc_sq();
        let (sin_long, cos_long) = self.longitude_deg.to_radians().sin_cos();
        let (sin_lat, cos_lat) = self.latitude_deg.to_radians().sin_cos();
        let height = EarthModel::km_to_er(self.height_km);
        // page 144, with the semi major radius being one Earth radius
        let c_body = 1.0 / ((1.0 - e2 * sin_lat.powi(2)).sqrt());
        let s_body = (1.0 - flattening).powi(2) / ((1.0 - e2 * sin_lat.powi(2)).sqrt());
        Vector3::new(
            (c_body + height) * cos_lat * cos_long,
            (c_body + height) * cos_lat * sin_long,
            (s_body + height) * sin_lat,
        )
    }

    /// Computes the range, azimuth and elevation of the provided orbit seen from this station.
    pub fn rae_of<O: TwoBody>(
        &self,
        orbit: &O,
        date: ModifiedJulianDate,
    ) -> Result<RangeAzEl, OrbitError> {
        let r_gei = orbit.r_gei(date)?;
        Ok(ltp2rae(&gei2ltp(&r_gei, self, date)))
    }

    /// Returns whether the orbit is above the elevation mask of this station at this date.
    pub fn is_visible<O: TwoBody>(
        &self,
        orbit: &O,
        date: ModifiedJulianDate,
    ) -> Result<bool, OrbitError> {
        let rae = self.rae_of(orbit, date)?;
        Ok(rae.elevation_rad >= self.elevation_mask_deg.to_radians())
    }
}

impl Default for Station {
    fn default() -> Self {
        Self::from_point("UNDEFINED".to_string(), 0.0, 0.0, 0.0)
    }
}

impl ConfigRepr for Station {}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (lat.: {:.4} deg    long.: {:.4} deg    alt.: {:.3} m)",
            self.name,
            self.latitude_deg,
            self.longitude_deg,
            self.height_km * 1e3,
        )
    }
}

#[test]
fn test_station_r_ger() {
    let equator = Station::from_point("EQ".to_string(), 0.0, 0.0, 0.0);
    assert!((equator.r_ger() - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-15);

    // At the pole, the radius is the polar radius
    let pole = Station::from_point("NP".to_string(), 90.0, 0.0, 0.0);
    let polar_radius = 1.0 - EarthModel::FLATTENING;
    assert!((pole.r_ger().z - polar_radius).abs() < 1e-12);
    assert!(pole.r_ger().x.abs() < 1e-12);

    let high = Station::from_point("H".to_string(), 0.0, 90.0, EarthModel::EQUATORIAL_RADIUS_KM);
    assert!((high.r_ger() - Vector3::new(0.0, 2.0, 0.0)).norm() < 1e-12);
}
