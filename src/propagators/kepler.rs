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

use crate::errors::{InvalidSolverOptionsSnafu, UnknownSolverMethodSnafu};
use crate::OrbitError;
use snafu::ensure;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use typed_builder::TypedBuilder;

/// Eccentricity above which the solver starts at apoapsis instead of at the mean position.
pub const HIGH_ECC_GUESS_THRESHOLD: f64 = 0.8;

/// Root finding method used to solve Kepler's equation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SolverMethod {
    /// Newton-Raphson, uses the first derivative (quadratic convergence)
    #[default]
    Newton,
    /// Halley, uses the first and second derivatives (cubic convergence)
    Halley,
}

impl FromStr for SolverMethod {
    type Err = OrbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newton" => Ok(Self::Newton),
            "halley" => Ok(Self::Halley),
            _ => UnknownSolverMethodSnafu { name: s }.fail(),
        }
    }
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Newton => write!(f, "newton"),
            Self::Halley => write!(f, "halley"),
        }
    }
}

/// SolverOpts stores the Kepler equation solver options: the method, the tolerance on the
/// correction step, and the maximum number of iterations after which the last iterate is returned.
#[derive(Copy, Clone, Debug, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct SolverOpts {
    #[builder(default)]
    pub method: SolverMethod,
    /// Stop once the correction step is smaller than this value, in radians
    #[builder(default = 1e-12)]
    pub tolerance: f64,
    #[builder(default = 50)]
    pub max_iterations: usize,
}

impl SolverOpts {
    /// Default options with Newton's method
    pub fn newton() -> Self {
        Self::default()
    }

    /// Default options with Halley's method
    pub fn halley() -> Self {
        Self::builder().method(SolverMethod::Halley).build()
    }

    /// Builds options from the name of the method, failing on unknown names.
    pub fn from_method_name(name: &str) -> Result<Self, OrbitError> {
        Ok(Self::builder().method(SolverMethod::from_str(name)?).build())
    }

    /// Ensures that the solver loop can terminate.
    pub fn validate(&self) -> Result<(), OrbitError> {
        ensure!(
            self.tolerance > 0.0 && self.tolerance.is_finite(),
            InvalidSolverOptionsSnafu {
                msg: format!("tolerance must be positive, got {}", self.tolerance)
            }
        );
        ensure!(
            self.max_iterations > 0,
            InvalidSolverOptionsSnafu {
                msg: "at least one iteration is required".to_string()
            }
        );
        Ok(())
    }

    /// Solves a Kepler-like equation `f(x) = 0` starting from `initial_guess`.
    ///
    /// The closure returns the residual and its first and second derivatives at `x`. The loop
    /// stops when the correction step is below the tolerance, or returns the last iterate once
    /// the iteration cap is reached: non-convergence is reported, never raised.
    pub fn solve<F>(&self, initial_guess: f64, residual: F) -> KeplerSolution
    where
        F: Fn(f64) -> (f64, f64, f64),
    {
        let mut x = initial_guess;
        let mut last_step = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            let (f, df, d2f) = residual(x);
            let step = match self.method {
                SolverMethod::Newton => f / df,
                SolverMethod::Halley => 2.0 * f * df / (2.0 * df.powi(2) - f * d2f),
            };

            if !step.is_finite() {
                warn!("Kepler solver ({}) stopped on a singular step at x = {x}", self.method);
                return KeplerSolution {
                    value: x,
                    iterations: iteration,
                    converged: false,
                    last_step,
                };
            }

            x -= step;
            last_step = step;
            trace!("Kepler {} #{iteration}: x = {x}, step = {step:e}", self.method);

            if step.abs() < self.tolerance {
                return KeplerSolution {
                    value: x,
                    iterations: iteration,
                    converged: true,
                    last_step,
                };
            }
        }

        warn!(
            "Kepler solver ({}) did not converge in {} iterations (last step {:e} > {:e})",
            self.method,
            self.max_iterations,
            last_step.abs(),
            self.tolerance
        );
        KeplerSolution {
            value: x,
            iterations: self.max_iterations,
            converged: false,
            last_step,
        }
    }
}

impl Default for SolverOpts {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Display for SolverOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (tol: {:e}, max iter: {})",
            self.method, self.tolerance, self.max_iterations
        )
    }
}

/// Outcome of the Kepler equation solver: the caller decides whether non-convergence matters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeplerSolution {
    /// Last iterate, i.e. the eccentric anomaly or eccentric longitude in radians
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
    /// Last correction step applied, in radians
    pub last_step: f64,
}

/// Starting point of the solver: the mean position for moderate eccentricities, and apoapsis
/// (`apoapsis_guess`) above `HIGH_ECC_GUESS_THRESHOLD` where Newton converges slowly from the
/// mean position.
pub fn initial_guess(mean_pos: f64, ecc: f64, apoapsis_guess: f64) -> f64 {
    if ecc < HIGH_ECC_GUESS_THRESHOLD {
        mean_pos
    } else {
        apoapsis_guess
    }
}

/// Solves the classical Kepler equation `E - e sin(E) = M` for the eccentric anomaly.
pub fn solve_kepler(opts: &SolverOpts, mean_anomaly: f64, ecc: f64) -> KeplerSolution {
    opts.solve(initial_guess(mean_anomaly, ecc, PI), |ea| {
        let (sin_ea, cos_ea) = ea.sin_cos();
        (ea - ecc * sin_ea - mean_anomaly, 1.0 - ecc * cos_ea, ecc * sin_ea)
    })
}
