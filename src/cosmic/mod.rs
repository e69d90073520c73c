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

// Re-Export the modified Julian date
mod mjd;
pub use self::mjd::*;

// Re-Export the Earth model
mod earth;
pub use self::earth::*;

// Re-Export ground stations
mod station;
pub use self::station::*;

/// The frames module converts vectors between the inertial, rotating and topocentric frames.
pub mod frames;
pub use self::frames::{LatLongAlt, RangeAzEl};
