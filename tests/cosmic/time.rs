extern crate satgeom;

use satgeom::cosmic::{ModifiedJulianDate, SECONDS_PER_DAY};
use satgeom::time::{Epoch, Unit};

#[test]
fn j2000_calendar() {
    let cal = ModifiedJulianDate::J2000.calendar();
    assert_eq!(cal.year, 2000);
    assert_eq!(cal.month, 1);
    assert_eq!(cal.day, 1);
    assert_eq!(cal.hour, 12);
    assert_eq!(cal.minute, 0);
    assert!(cal.second.abs() < 1e-6);

    assert_eq!(ModifiedJulianDate::J2000.day_of_year(), 1);
    assert!((ModifiedJulianDate::J2000.fractional_day_of_year() - 1.5).abs() < 1e-9);
}

#[test]
fn gregorian_construction() {
    let date = ModifiedJulianDate::from_gregorian(2000, 1, 1, 12, 0, 0.0).unwrap();
    assert!((date.mjd() - 51_544.5).abs() < 1e-9);

    // Leap year: 31 days in January, 29 in February
    let march = ModifiedJulianDate::from_gregorian(2000, 3, 1, 12, 0, 0.0).unwrap();
    assert_eq!(march.day_of_year(), 61);
    let march = ModifiedJulianDate::from_gregorian(2001, 3, 1, 12, 0, 0.0).unwrap();
    assert_eq!(march.day_of_year(), 60);

    let date = ModifiedJulianDate::from_gregorian(2023, 6, 15, 6, 30, 15.5).unwrap();
    let cal = date.calendar();
    assert_eq!((cal.year, cal.month, cal.day), (2023, 6, 15));
    assert_eq!((cal.hour, cal.minute), (6, 30));
    assert!((cal.second - 15.5).abs() < 1e-3, "{cal:?}");
}

#[test]
fn offsets_and_ordering() {
    let start = ModifiedJulianDate::J2000;
    let later = start.with_offset_s(3_600.0);
    assert!(later > start);
    assert!((later.seconds_since(start) - 3_600.0).abs() < 1e-5);
    assert!((start.seconds_since(later) + 3_600.0).abs() < 1e-5);

    let earlier = start.with_offset_s(-SECONDS_PER_DAY);
    assert!((earlier.mjd() - 51_543.5).abs() < 1e-12);

    let mut date = start;
    date.shift_by(Unit::Day * 1.5);
    assert!((date.mjd() - 51_546.0).abs() < 1e-9);
    date.shift_by_s(-43_200.0);
    assert!((date.mjd() - 51_545.5).abs() < 1e-9);
    // The original value is untouched
    assert_eq!(start, ModifiedJulianDate::J2000);
}

#[test]
fn epoch_bridge() {
    let epoch = Epoch::from_gregorian_tai_at_noon(2010, 7, 4);
    let date = ModifiedJulianDate::from(epoch);
    let back: Epoch = date.into();
    assert!((back - epoch).abs() < Unit::Microsecond * 10);
    assert!((date.mjd() - 55_381.5).abs() < 1e-9);
    assert!(format!("{}", ModifiedJulianDate::J2000).starts_with("MJD 51544.5 ("));
}
