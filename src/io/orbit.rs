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

use super::{ConfigRepr, Configurable, InvalidConfigSnafu};
use crate::cosmic::ModifiedJulianDate;
use crate::errors::OrbitConfigSnafu;
use crate::propagators::{EquinoctialOrbit, KeplerianOrbit, Orbit, SolverMethod, SolverOpts};
use crate::{OrbitError, TwoBody};
use serde_derive::{Deserialize, Serialize};
use snafu::ResultExt;
use std::convert::TryFrom;
use std::str::FromStr;

fn epoch_from_mjd(epoch_mjd: f64) -> Result<ModifiedJulianDate, OrbitError> {
    if epoch_mjd.is_finite() {
        Ok(ModifiedJulianDate::new(epoch_mjd))
    } else {
        InvalidConfigSnafu {
            msg: format!("epoch_mjd must be finite, got {epoch_mjd}"),
        }
        .fail()
        .context(OrbitConfigSnafu)
    }
}

/// Solver settings as written in a configuration file. Missing entries use the defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverSerde {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
}

impl SolverSerde {
    fn to_opts(&self) -> Result<SolverOpts, OrbitError> {
        let defaults = SolverOpts::default();
        let method = match &self.solver {
            Some(name) => SolverMethod::from_str(name)?,
            None => defaults.method,
        };
        let opts = SolverOpts::builder()
            .method(method)
            .tolerance(self.tolerance.unwrap_or(defaults.tolerance))
            .max_iterations(self.max_iterations.unwrap_or(defaults.max_iterations))
            .build();
        opts.validate()?;
        Ok(opts)
    }
}

impl From<&SolverOpts> for SolverSerde {
    fn from(opts: &SolverOpts) -> Self {
        Self {
            solver: Some(opts.method.to_string()),
            tolerance: Some(opts.tolerance),
            max_iterations: Some(opts.max_iterations),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeplerianSerde {
    pub sma_er: f64,
    pub ecc: f64,
    pub inc_deg: f64,
    pub raan_deg: f64,
    pub aop_deg: f64,
    pub ma_deg: f64,
    pub epoch_mjd: f64,
    #[serde(flatten)]
    pub solver: SolverSerde,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquinoctialSerde {
    /// Set for retrograde orbits, i.e. a retrograde factor of -1
    #[serde(default)]
    pub retrograde: bool,
    pub sma_er: f64,
    pub h: f64,
    pub k: f64,
    pub p: f64,
    pub q: f64,
    pub mean_longitude_deg: f64,
    pub epoch_mjd: f64,
    #[serde(flatten)]
    pub solver: SolverSerde,
}

/// Orbit as written in a configuration file, either in Keplerian or in Equinoctial elements.
/// Angles are in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrbitSerde {
    Keplerian(KeplerianSerde),
    Equinoctial(EquinoctialSerde),
}

impl ConfigRepr for OrbitSerde {}

impl TryFrom<OrbitSerde> for Orbit {
    type Error = OrbitError;

    fn try_from(cfg: OrbitSerde) -> Result<Self, Self::Error> {
        match cfg {
            OrbitSerde::Keplerian(kep) => Ok(KeplerianOrbit::try_from_deg(
                kep.sma_er,
                kep.ecc,
                kep.inc_deg,
                kep.raan_deg,
                kep.aop_deg,
                kep.ma_deg,
                epoch_from_mjd(kep.epoch_mjd)?,
                kep.solver.to_opts()?,
            )?
            .into()),
            OrbitSerde::Equinoctial(eq) => Ok(EquinoctialOrbit::try_new(
                if eq.retrograde { -1 } else { 1 },
                eq.sma_er,
                eq.h,
                eq.k,
                eq.p,
                eq.q,
                eq.mean_longitude_deg.to_radians(),
                epoch_from_mjd(eq.epoch_mjd)?,
                eq.solver.to_opts()?,
            )?
            .into()),
        }
    }
}

impl From<&Orbit> for OrbitSerde {
    fn from(orbit: &Orbit) -> Self {
        match orbit {
            Orbit::Keplerian(kep) => Self::Keplerian(KeplerianSerde {
                sma_er: kep.sma_er(),
                ecc: kep.eccentricity(),
                inc_deg: kep.inc_rad().to_degrees(),
                raan_deg: kep.raan_rad().to_degrees(),
                aop_deg: kep.aop_rad().to_degrees(),
                ma_deg: kep.ma_rad().to_degrees(),
                epoch_mjd: kep.epoch().mjd(),
                solver: kep.solver().into(),
            }),
            Orbit::Equinoctial(eq) => Self::Equinoctial(EquinoctialSerde {
                retrograde: eq.retrograde_factor() < 0,
                sma_er: eq.sma_er(),
                h: eq.h(),
                k: eq.k(),
                p: eq.p(),
                q: eq.q(),
                mean_longitude_deg: eq.mean_longitude_rad().to_degrees(),
                epoch_mjd: eq.epoch().mjd(),
                solver: eq.solver().into(),
            }),
        }
    }
}

impl Configurable for Orbit {
    type IntermediateRepr = OrbitSerde;

    fn from_config(cfg: Self::IntermediateRepr) -> Result<Self, OrbitError> {
        Self::try_from(cfg)
    }

    fn to_config(&self) -> Self::IntermediateRepr {
        self.into()
    }
}
