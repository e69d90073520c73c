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

use crate::errors::{InvalidDateSnafu, InvalidSecondSnafu};
use crate::time::{Duration, Epoch};
use crate::OrbitError;
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fmt;

/// Number of seconds in one day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Calendar decomposition of a date: year, month, day, hour, minute and (fractional) second.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

/// A modified Julian date, i.e. a real number of days since 1858 November 17 at midnight.
///
/// The calendar decomposition is delegated to hifitime in the TAI time scale, which has no leap
/// seconds, so that the conversion between a date and its calendar fields is a pure bijection.
///
/// A date is a value: any offset returns (or replaces `self` with) a new date.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifiedJulianDate {
    mjd: f64,
}

impl ModifiedJulianDate {
    /// J2000 reference date, 2000 January 1 at noon.
    pub const J2000: Self = Self { mjd: 51_544.5 };

    pub const fn new(mjd: f64) -> Self {
        Self { mjd }
    }

    /// Builds a date from its calendar fields, in TAI.
    ///
    /// The second must be in [0, 60) and the other fields must form a valid Gregorian date.
    pub fn from_gregorian(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: f64,
    ) -> Result<Self, OrbitError> {
        ensure!((0.0..60.0).contains(&second), InvalidSecondSnafu { second });
        let whole_s = second.trunc();
        let nanos = (((second - whole_s) * 1e9).round() as u32).min(999_999_999);
        let epoch =
            Epoch::maybe_from_gregorian_tai(year, month, day, hour, minute, whole_s as u8, nanos)
                .context(InvalidDateSnafu)?;
        Ok(Self::from_epoch(epoch))
    }

    pub fn from_epoch(epoch: Epoch) -> Self {
        Self::new(epoch.to_mjd_tai_days())
    }

    pub fn to_epoch(self) -> Epoch {
        Epoch::from_mjd_tai(self.mjd)
    }

    /// Returns the raw number of days
    pub fn mjd(&self) -> f64 {
        self.mjd
    }

    /// Returns the calendar fields of this date
    pub fn calendar(&self) -> CalendarDate {
        let (year, month, day, hour, minute, second, nanos) = self.to_epoch().to_gregorian_tai();
        CalendarDate {
            year,
            month,
            day,
            hour,
            minute,
            second: f64::from(second) + f64::from(nanos) * 1e-9,
        }
    }

    /// Days elapsed since January 1st, 00:00 of the same year, plus one.
    /// January 1st at noon is 1.5, and the integer part is the day of year.
    pub fn fractional_day_of_year(&self) -> f64 {
        let jan1 = Epoch::from_gregorian_tai_at_midnight(self.calendar().year, 1, 1);
        1.0 + self.mjd - jan1.to_mjd_tai_days()
    }

    /// Day of the year, starting at 1 for January 1st.
    pub fn day_of_year(&self) -> u16 {
        self.fractional_day_of_year().floor() as u16
    }

    /// Signed offset in seconds from `other` to `self`, positive when `self` is later.
    pub fn seconds_since(&self, other: Self) -> f64 {
        (self.mjd - other.mjd) * SECONDS_PER_DAY
    }

    /// Returns a new date offset by the provided number of seconds (can be negative).
    pub fn with_offset_s(self, offset_s: f64) -> Self {
        Self::new(self.mjd + offset_s / SECONDS_PER_DAY)
    }

    /// Replaces this date by one offset by the provided number of seconds.
    pub fn shift_by_s(&mut self, offset_s: f64) {
        *self = self.with_offset_s(offset_s);
    }

    /// Replaces this date by one offset by the provided duration (can be negative).
    pub fn shift_by(&mut self, duration: Duration) {
        self.shift_by_s(duration.to_seconds());
    }
}

impl From<Epoch> for ModifiedJulianDate {
    fn from(epoch: Epoch) -> Self {
        Self::from_epoch(epoch)
    }
}

impl From<ModifiedJulianDate> for Epoch {
    fn from(mjd: ModifiedJulianDate) -> Self {
        mjd.to_epoch()
    }
}

impl fmt::Display for ModifiedJulianDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MJD {} ({})", self.mjd, self.to_epoch())
    }
}
