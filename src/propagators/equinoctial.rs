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

use super::kepler::initial_guess;
use super::{
    eccentric_position, mean_motion, orbital_period, KeplerSolution, KeplerianOrbit, SolverOpts,
    TwoBody,
};
use crate::cosmic::ModifiedJulianDate;
use crate::errors::{
    InvalidEquinoctialEccentricitySnafu, InvalidRetrogradeFactorSnafu, InvalidSemiMajorAxisSnafu,
};
use crate::linalg::Vector3;
use crate::utils::check_wrap;
use crate::OrbitError;
use snafu::ensure;
use std::f64::consts::PI;
use std::fmt;

/// Equinoctial orbital elements, which remain defined for circular and equatorial orbits.
///
/// With ϖ = ω + jΩ the longitude of periapsis:
/// - h = e sin(ϖ), k = e cos(ϖ)
/// - p = tan(i/2)^j sin(Ω), q = tan(i/2)^j cos(Ω)
/// - λ = M + ϖ, the mean longitude
///
/// The retrograde factor j is +1 for direct orbits and -1 for retrograde orbits.
///
/// This representation has no J2 secular rates and no orbit determination: convert to
/// `KeplerianOrbit` with `to_keplerian` for those.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EquinoctialOrbit {
    retrograde_factor: i8,
    sma_er: f64,
    h: f64,
    k: f64,
    p: f64,
    q: f64,
    mean_longitude_rad: f64,
    epoch: ModifiedJulianDate,
    solver: SolverOpts,
    mean_motion_rad_s: f64,
    period_s: f64,
}

impl EquinoctialOrbit {
    /// Creates a new orbit from its elements. The mean longitude is in radians and wrapped to
    /// [0, 2π).
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        retrograde_factor: i8,
        sma_er: f64,
        h: f64,
        k: f64,
        p: f64,
        q: f64,
        mean_longitude_rad: f64,
        epoch: ModifiedJulianDate,
        solver: SolverOpts,
    ) -> Result<Self, OrbitError> {
        ensure!(
            retrograde_factor == 1 || retrograde_factor == -1,
            InvalidRetrogradeFactorSnafu {
                j: retrograde_factor
            }
        );
        ensure!(
            sma_er.is_finite() && sma_er > 0.0,
            InvalidSemiMajorAxisSnafu { sma: sma_er }
        );
        ensure!(
            h.powi(2) + k.powi(2) < 1.0,
            InvalidEquinoctialEccentricitySnafu { h, k }
        );
        solver.validate()?;

        Ok(Self {
            retrograde_factor,
            sma_er,
            h,
            k,
            p,
            q,
            mean_longitude_rad: check_wrap(mean_longitude_rad),
            epoch,
            solver,
            mean_motion_rad_s: mean_motion(sma_er),
            period_s: orbital_period(sma_er),
        })
    }

    /// +1 for direct orbits, -1 for retrograde orbits
    pub fn retrograde_factor(&self) -> i8 {
        self.retrograde_factor
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    /// Mean longitude at the epoch
    pub fn mean_longitude_rad(&self) -> f64 {
        self.mean_longitude_rad
    }

    /// Longitude of periapsis ϖ
    pub fn lon_periapsis_rad(&self) -> f64 {
        check_wrap(self.h.atan2(self.k))
    }

    /// Auxiliary β = 1 / (1 + sqrt(1 - h^2 - k^2))
    pub fn beta(&self) -> f64 {
        1.0 / (1.0 + (1.0 - self.h.powi(2) - self.k.powi(2)).sqrt())
    }

    /// Distance to the Earth center at the provided eccentric longitude, in Earth radii
    pub fn radius(&self, eccentric_lon_rad: f64) -> f64 {
        let (sin_f, cos_f) = eccentric_lon_rad.sin_cos();
        self.sma_er * (1.0 - self.k * cos_f - self.h * sin_f)
    }

    /// First equinoctial basis vector, in GEI
    pub fn f_hat(&self) -> Vector3<f64> {
        let (p, q) = (self.p, self.q);
        let j = f64::from(self.retrograde_factor);
        Vector3::new(1.0 - p.powi(2) + q.powi(2), 2.0 * p * q, -2.0 * j * p)
            / (1.0 + p.powi(2) + q.powi(2))
    }

    /// Second equinoctial basis vector, in GEI
    pub fn g_hat(&self) -> Vector3<f64> {
        let (p, q) = (self.p, self.q);
        let j = f64::from(self.retrograde_factor);
        Vector3::new(2.0 * j * p * q, j * (1.0 + p.powi(2) - q.powi(2)), 2.0 * q)
            / (1.0 + p.powi(2) + q.powi(2))
    }

    /// Converts these elements to the classical Keplerian elements.
    pub fn to_keplerian(&self) -> Result<KeplerianOrbit, OrbitError> {
        let j = f64::from(self.retrograde_factor);
        let half_inc = self.p.hypot(self.q).atan();
        let inc = if self.retrograde_factor == 1 {
            2.0 * half_inc
        } else {
            PI - 2.0 * half_inc
        };
        let raan = self.p.atan2(self.q);
        let lon_peri = self.h.atan2(self.k);
        KeplerianOrbit::try_new(
            self.sma_er,
            self.eccentricity(),
            inc,
            raan,
            lon_peri - j * raan,
            self.mean_longitude_rad - lon_peri,
            self.epoch,
            self.solver,
        )
    }

    /// Returns a copy of this orbit with another mean longitude
    pub fn with_mean_longitude(self, mean_longitude_rad: f64) -> Result<Self, OrbitError> {
        Self::try_new(
            self.retrograde_factor,
            self.sma_er,
            self.h,
            self.k,
            self.p,
            self.q,
            mean_longitude_rad,
            self.epoch,
            self.solver,
        )
    }

    pub fn with_sma(self, sma_er: f64) -> Result<Self, OrbitError> {
        Self::try_new(
            self.retrograde_factor,
            sma_er,
            self.h,
            self.k,
            self.p,
            self.q,
            self.mean_longitude_rad,
            self.epoch,
            self.solver,
        )
    }

    /// Returns a copy of this orbit solved with other options
    pub fn with_solver(self, solver: SolverOpts) -> Result<Self, OrbitError> {
        solver.validate()?;
        Ok(Self { solver, ..self })
    }
}

impl TwoBody for EquinoctialOrbit {
    fn epoch(&self) -> ModifiedJulianDate {
        self.epoch
    }

    fn sma_er(&self) -> f64 {
        self.sma_er
    }

    fn eccentricity(&self) -> f64 {
        self.h.hypot(self.k)
    }

    fn solver(&self) -> &SolverOpts {
        &self.solver
    }

    fn mean_motion(&self) -> f64 {
        self.mean_motion_rad_s
    }

    fn orbital_period(&self) -> f64 {
        self.period_s
    }

    fn mean_position_at_epoch(&self) -> f64 {
        self.mean_longitude_rad
    }

    /// Solves F + h cos(F) - k sin(F) = λ for the eccentric longitude F.
    fn kepler_solution(&self, mean_pos: f64) -> KeplerSolution {
        let (h, k) = (self.h, self.k);
        // Apoapsis, in eccentric longitude
        let apoapsis = PI + self.lon_periapsis_rad();
        self.solver.solve(
            initial_guess(mean_pos, self.eccentricity(), apoapsis),
            |ecc_lon| {
                let (sin_f, cos_f) = ecc_lon.sin_cos();
                (
                    ecc_lon + h * cos_f - k * sin_f - mean_pos,
                    1.0 - h * sin_f - k * cos_f,
                    -h * cos_f + k * sin_f,
                )
            },
        )
    }

    /// Position in the equinoctial plane: [X1, Y1, 0]
    fn r_goi(&self, eccentric_pos: f64) -> Vector3<f64> {
        let (h, k, beta) = (self.h, self.k, self.beta());
        let (sin_f, cos_f) = eccentric_pos.sin_cos();
        self.sma_er
            * Vector3::new(
                (1.0 - h.powi(2) * beta) * cos_f + h * k * beta * sin_f - k,
                (1.0 - k.powi(2) * beta) * sin_f + h * k * beta * cos_f - h,
                0.0,
            )
    }

    fn v_goi(&self, eccentric_pos: f64) -> Vector3<f64> {
        let (h, k, beta) = (self.h, self.k, self.beta());
        let (sin_f, cos_f) = eccentric_pos.sin_cos();
        let factor =
            self.mean_motion_rad_s * self.sma_er.powi(2) / self.radius(eccentric_pos);
        factor
            * Vector3::new(
                h * k * beta * cos_f - (1.0 - h.powi(2) * beta) * sin_f,
                (1.0 - k.powi(2) * beta) * cos_f - h * k * beta * sin_f,
                0.0,
            )
    }

    /// Position in GEI: f X1 + g Y1
    fn r_gei(&self, date: ModifiedJulianDate) -> Result<Vector3<f64>, OrbitError> {
        let r_goi = self.r_goi(eccentric_position(self, date));
        Ok(self.f_hat() * r_goi.x + self.g_hat() * r_goi.y)
    }

    fn v_gei(&self, date: ModifiedJulianDate) -> Result<Vector3<f64>, OrbitError> {
        let v_goi = self.v_goi(eccentric_position(self, date));
        Ok(self.f_hat() * v_goi.x + self.g_hat() * v_goi.y)
    }
}

impl fmt::Display for EquinoctialOrbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Equinoctial j={}] {}\tsma = {:.6} ER\th = {:.6e}\tk = {:.6e}\tp = {:.6e}\tq = {:.6e}\tλ = {:.6} deg",
            self.retrograde_factor,
            self.epoch,
            self.sma_er,
            self.h,
            self.k,
            self.p,
            self.q,
            self.mean_longitude_rad.to_degrees(),
        )
    }
}
