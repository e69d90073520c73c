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

use super::kepler::solve_kepler;
use super::{
    eccentric_position, mean_motion, orbital_period, Diagnostic, EquinoctialOrbit, KeplerSolution,
    SolverOpts, TwoBody,
};
use crate::cosmic::{EarthModel, ModifiedJulianDate};
use crate::errors::{DegenerateStateSnafu, InvalidEccentricitySnafu, InvalidSemiMajorAxisSnafu};
use crate::linalg::{Matrix3, Vector3};
use crate::utils::{check_wrap, cross, r1, r3};
use crate::OrbitError;
use approx::abs_diff_eq;
use snafu::ensure;
use std::fmt;

/// Below this eccentricity, orbit determination warns that the argument of periapsis and the mean
/// anomaly are ill-conditioned.
pub const ECC_WARN_THRESHOLD: f64 = 1e-3;
/// Below this sine of the inclination, orbit determination warns that the RAAN is ill-conditioned.
pub const INC_WARN_THRESHOLD: f64 = 1e-9;

/// Classical Keplerian orbital elements around the Earth.
///
/// **Units:** Earth radii, none, and radians for all angles.
///
/// The mean motion, the period and the first order J2 secular rates are computed when the orbit
/// is built. Instances are immutable: the `with_*` methods return a new orbit whose derived values
/// are recomputed, so a partially updated orbit is never observable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeplerianOrbit {
    sma_er: f64,
    ecc: f64,
    inc_rad: f64,
    raan_rad: f64,
    aop_rad: f64,
    ma_rad: f64,
    epoch: ModifiedJulianDate,
    solver: SolverOpts,
    mean_motion_rad_s: f64,
    period_s: f64,
    raan_dot_rad_s: f64,
    aop_dot_rad_s: f64,
    ma_dot_rad_s: f64,
}

/// Result of an orbit determination, and whatever made it less accurate than usual.
#[derive(Clone, Debug, PartialEq)]
pub struct Determination {
    pub orbit: KeplerianOrbit,
    pub diagnostics: Vec<Diagnostic>,
}

impl KeplerianOrbit {
    /// Creates a new orbit from its elements, all angles in radians.
    ///
    /// Fails if the eccentricity is not in [0, 1), if the semi-major axis is not strictly positive,
    /// or if the solver options cannot terminate. Angles are wrapped to [0, 2π).
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        sma_er: f64,
        ecc: f64,
        inc_rad: f64,
        raan_rad: f64,
        aop_rad: f64,
        ma_rad: f64,
        epoch: ModifiedJulianDate,
        solver: SolverOpts,
    ) -> Result<Self, OrbitError> {
        ensure!(
            sma_er.is_finite() && sma_er > 0.0,
            InvalidSemiMajorAxisSnafu { sma: sma_er }
        );
        ensure!((0.0..1.0).contains(&ecc), InvalidEccentricitySnafu { ecc });
        solver.validate()?;

        let inc_rad = check_wrap(inc_rad);
        let n = mean_motion(sma_er);
        // First order J2 secular rates, with the semi-latus rectum in Earth radii
        let semi_latus = sma_er * (1.0 - ecc.powi(2));
        let j2_factor = EarthModel::J2 * n / semi_latus.powi(2);
        let cos_inc = inc_rad.cos();

        Ok(Self {
            sma_er,
            ecc,
            inc_rad,
            raan_rad: check_wrap(raan_rad),
            aop_rad: check_wrap(aop_rad),
            ma_rad: check_wrap(ma_rad),
            epoch,
            solver,
            mean_motion_rad_s: n,
            period_s: orbital_period(sma_er),
            raan_dot_rad_s: -1.5 * j2_factor * cos_inc,
            aop_dot_rad_s: 0.75 * j2_factor * (5.0 * cos_inc.powi(2) - 1.0),
            ma_dot_rad_s: 0.75
                * j2_factor
                * (1.0 - ecc.powi(2)).sqrt()
                * (3.0 * cos_inc.powi(2) - 1.0),
        })
    }

    /// Creates a new orbit from its elements, all angles in degrees.
    #[allow(clippy::too_many_arguments)]
    pub fn try_from_deg(
        sma_er: f64,
        ecc: f64,
        inc_deg: f64,
        raan_deg: f64,
        aop_deg: f64,
        ma_deg: f64,
        epoch: ModifiedJulianDate,
        solver: SolverOpts,
    ) -> Result<Self, OrbitError> {
        Self::try_new(
            sma_er,
            ecc,
            inc_deg.to_radians(),
            raan_deg.to_radians(),
            aop_deg.to_radians(),
            ma_deg.to_radians(),
            epoch,
            solver,
        )
    }

    /// Determines the osculating elements from a GEI state vector.
    ///
    /// **Units:** Earth radii and Earth radii per second
    ///
    /// This never fails on near circular or near equatorial states, but the undetermined angles
    /// are then unreliable: this is reported in the diagnostics and logged.
    ///
    /// For an exactly equatorial state, the argument of latitude is `atan2(0, 0)`, so the returned
    /// elements do not reproduce the input position even though the shape of the orbit is right.
    /// Such orbits should be described with an `EquinoctialOrbit`, which has no RAAN.
    pub fn element_set(
        epoch: ModifiedJulianDate,
        r_gei: &Vector3<f64>,
        v_gei: &Vector3<f64>,
        solver: SolverOpts,
    ) -> Result<Determination, OrbitError> {
        let gm = EarthModel::gm_er3_s2();
        let rmag = r_gei.norm();
        let hvec = cross(r_gei, v_gei);
        let hmag = hvec.norm();
        ensure!(
            hmag > f64::EPSILON && rmag > f64::EPSILON,
            DegenerateStateSnafu {
                msg: format!("angular momentum is zero (|r| = {rmag}, |h| = {hmag})")
            }
        );

        let w_hat = hvec / hmag;
        let inc = w_hat.x.hypot(w_hat.y).atan2(w_hat.z);
        let raan = w_hat.x.atan2(-w_hat.y);
        let semi_latus = hmag.powi(2) / gm;
        let sma = 1.0 / (2.0 / rmag - v_gei.norm_squared() / gm);
        ensure!(
            sma.is_finite() && sma > 0.0,
            DegenerateStateSnafu {
                msg: format!("state is not elliptical (sma = {sma} ER)")
            }
        );
        let ecc = (1.0 - semi_latus / sma).max(0.0).sqrt();
        let n = (gm / sma.powi(3)).sqrt();

        let ea = (r_gei.dot(v_gei) / (sma.powi(2) * n)).atan2(1.0 - rmag / sma);
        let ma = ea - ecc * ea.sin();
        let aol = r_gei.z.atan2(-r_gei.x * w_hat.y + r_gei.y * w_hat.x);
        let ta = ((1.0 - ecc.powi(2)).sqrt() * ea.sin()).atan2(ea.cos() - ecc);
        let aop = aol - ta;

        let mut diagnostics = Vec::new();
        // Round-off on an eccentricity of exactly the threshold is not reported
        if ecc < ECC_WARN_THRESHOLD * (1.0 - 1e-6) {
            diagnostics.push(Diagnostic::NearCircular { ecc });
        }
        if inc.sin().abs() < INC_WARN_THRESHOLD {
            diagnostics.push(Diagnostic::NearEquatorial { inc_rad: inc });
        }
        for diag in &diagnostics {
            warn!("orbit determination at {epoch}: {diag}");
        }

        Ok(Determination {
            orbit: Self::try_new(sma, ecc, inc, raan, aop, ma, epoch, solver)?,
            diagnostics,
        })
    }

    pub fn inc_rad(&self) -> f64 {
        self.inc_rad
    }

    pub fn raan_rad(&self) -> f64 {
        self.raan_rad
    }

    pub fn aop_rad(&self) -> f64 {
        self.aop_rad
    }

    /// Mean anomaly at the epoch
    pub fn ma_rad(&self) -> f64 {
        self.ma_rad
    }

    /// Secular drift rate of the RAAN due to J2, in rad/s
    pub fn raan_dot(&self) -> f64 {
        self.raan_dot_rad_s
    }

    /// Secular drift rate of the argument of periapsis due to J2, in rad/s
    pub fn aop_dot(&self) -> f64 {
        self.aop_dot_rad_s
    }

    /// Secular correction to the mean motion due to J2, in rad/s
    pub fn ma_dot(&self) -> f64 {
        self.ma_dot_rad_s
    }

    /// Returns whether this orbit is circular within numerical precision
    pub fn is_circular(&self) -> bool {
        abs_diff_eq!(self.ecc, 0.0, epsilon = f64::EPSILON)
    }

    /// Semi-latus rectum in Earth radii
    pub fn semi_latus_rectum(&self) -> f64 {
        self.sma_er * (1.0 - self.ecc.powi(2))
    }

    /// Distance to the Earth center at the provided eccentric anomaly, in Earth radii
    pub fn radius(&self, ea_rad: f64) -> f64 {
        self.sma_er * (1.0 - self.ecc * ea_rad.cos())
    }

    /// True anomaly at the provided eccentric anomaly, wrapped to [0, 2π)
    pub fn true_anomaly(&self, ea_rad: f64) -> f64 {
        let (sin_ea, cos_ea) = ea_rad.sin_cos();
        check_wrap(((1.0 - self.ecc.powi(2)).sqrt() * sin_ea).atan2(cos_ea - self.ecc))
    }

    /// Instantaneous speed from the vis-viva law at the provided eccentric anomaly, in Earth radii
    /// per second.
    pub fn vis_viva_law(&self, ea_rad: f64) -> f64 {
        (EarthModel::gm_er3_s2() * (2.0 / self.radius(ea_rad) - 1.0 / self.sma_er)).sqrt()
    }

    /// Rotation from the orbital plane (GOI) to GEI: R3(-Ω) R1(-i) R3(-ω)
    pub fn dcm_goi2gei(&self) -> Matrix3<f64> {
        r3(-self.raan_rad) * r1(-self.inc_rad) * r3(-self.aop_rad)
    }

    /// Returns the orbit at the provided date whose RAAN, argument of periapsis and mean anomaly
    /// have drifted with the first order J2 secular rates. All other elements are unchanged.
    pub fn secular_at(&self, date: ModifiedJulianDate) -> Result<Self, OrbitError> {
        let dt_s = date.seconds_since(self.epoch);
        Self::try_new(
            self.sma_er,
            self.ecc,
            self.inc_rad,
            self.raan_rad + self.raan_dot_rad_s * dt_s,
            self.aop_rad + self.aop_dot_rad_s * dt_s,
            self.ma_rad + (self.mean_motion_rad_s + self.ma_dot_rad_s) * dt_s,
            date,
            self.solver,
        )
    }

    /// Converts these elements to Equinoctial elements.
    ///
    /// Orbits inclined by more than 90 degrees use the retrograde factor j = -1 so that the
    /// equinoctial elements remain defined for inclinations close to 180 degrees.
    pub fn to_equinoctial(&self) -> Result<EquinoctialOrbit, OrbitError> {
        let j: i8 = if self.inc_rad.cos() < 0.0 { -1 } else { 1 };
        let jf = f64::from(j);
        let lon_peri = self.aop_rad + jf * self.raan_rad;
        let tan_half_inc = (self.inc_rad / 2.0).tan().powi(j.into());
        EquinoctialOrbit::try_new(
            j,
            self.sma_er,
            self.ecc * lon_peri.sin(),
            self.ecc * lon_peri.cos(),
            tan_half_inc * self.raan_rad.sin(),
            tan_half_inc * self.raan_rad.cos(),
            self.ma_rad + lon_peri,
            self.epoch,
            self.solver,
        )
    }

    pub fn with_sma(self, sma_er: f64) -> Result<Self, OrbitError> {
        Self::try_new(
            sma_er,
            self.ecc,
            self.inc_rad,
            self.raan_rad,
            self.aop_rad,
            self.ma_rad,
            self.epoch,
            self.solver,
        )
    }

    pub fn with_ecc(self, ecc: f64) -> Result<Self, OrbitError> {
        Self::try_new(
            self.sma_er,
            ecc,
            self.inc_rad,
            self.raan_rad,
            self.aop_rad,
            self.ma_rad,
            self.epoch,
            self.solver,
        )
    }

    pub fn with_inc(self, inc_rad: f64) -> Result<Self, OrbitError> {
        Self::try_new(
            self.sma_er,
            self.ecc,
            inc_rad,
            self.raan_rad,
            self.aop_rad,
            self.ma_rad,
            self.epoch,
            self.solver,
        )
    }

    pub fn with_raan(self, raan_rad: f64) -> Result<Self, OrbitError> {
        Self::try_new(
            self.sma_er,
            self.ecc,
            self.inc_rad,
            raan_rad,
            self.aop_rad,
            self.ma_rad,
            self.epoch,
            self.solver,
        )
    }

    pub fn with_aop(self, aop_rad: f64) -> Result<Self, OrbitError> {
        Self::try_new(
            self.sma_er,
            self.ecc,
            self.inc_rad,
            self.raan_rad,
            aop_rad,
            self.ma_rad,
            self.epoch,
            self.solver,
        )
    }

    pub fn with_ma(self, ma_rad: f64) -> Result<Self, OrbitError> {
        Self::try_new(
            self.sma_er,
            self.ecc,
            self.inc_rad,
            self.raan_rad,
            self.aop_rad,
            ma_rad,
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

impl TwoBody for KeplerianOrbit {
    fn epoch(&self) -> ModifiedJulianDate {
        self.epoch
    }

    fn sma_er(&self) -> f64 {
        self.sma_er
    }

    fn eccentricity(&self) -> f64 {
        self.ecc
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
        self.ma_rad
    }

    fn kepler_solution(&self, mean_pos: f64) -> KeplerSolution {
        solve_kepler(&self.solver, mean_pos, self.ecc)
    }

    /// Position in the orbital plane: a [cos(E) - e, sqrt(1 - e^2) sin(E), 0]
    fn r_goi(&self, eccentric_pos: f64) -> Vector3<f64> {
        let (sin_ea, cos_ea) = eccentric_pos.sin_cos();
        self.sma_er
            * Vector3::new(
                cos_ea - self.ecc,
                (1.0 - self.ecc.powi(2)).sqrt() * sin_ea,
                0.0,
            )
    }

    fn v_goi(&self, eccentric_pos: f64) -> Vector3<f64> {
        let (sin_ea, cos_ea) = eccentric_pos.sin_cos();
        let factor = self.mean_motion_rad_s * self.sma_er / (1.0 - self.ecc * cos_ea);
        factor * Vector3::new(-sin_ea, (1.0 - self.ecc.powi(2)).sqrt() * cos_ea, 0.0)
    }

    fn r_gei(&self, date: ModifiedJulianDate) -> Result<Vector3<f64>, OrbitError> {
        Ok(self.dcm_goi2gei() * self.r_goi(eccentric_position(self, date)))
    }

    fn v_gei(&self, date: ModifiedJulianDate) -> Result<Vector3<f64>, OrbitError> {
        Ok(self.dcm_goi2gei() * self.v_goi(eccentric_position(self, date)))
    }
}

impl fmt::Display for KeplerianOrbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Keplerian] {}\tsma = {:.6} ER\tecc = {:.6e}\tinc = {:.6} deg\traan = {:.6} deg\taop = {:.6} deg\tma = {:.6} deg",
            self.epoch,
            self.sma_er,
            self.ecc,
            self.inc_rad.to_degrees(),
            self.raan_rad.to_degrees(),
            self.aop_rad.to_degrees(),
            self.ma_rad.to_degrees(),
        )
    }
}
