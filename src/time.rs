//! Julian date and sidereal time helpers.
//!
//! The propagator itself only consumes the epoch contract exposed by
//! [`crate::tle::Epoch`]; everything here exists to implement that
//! contract and to convert calendar instants for the convenience API.

use std::f64::consts::PI;

pub(crate) const TWOPI: f64 = 2.0 * PI;

/// Reduces an angle to the range [0, 2*pi).
pub fn fmod2p(x: f64) -> f64 {
    let r = x % TWOPI;
    if r < 0.0 {
        r + TWOPI
    } else {
        r
    }
}

/// Calculates the Julian date for a given point in time.
pub fn julian_date(date: chrono::DateTime<chrono::Utc>) -> f64 {
    use chrono::{Datelike, Timelike};

    let year = julian_date_of_year(date.year());
    let doy = julian_day_of_year(date.year(), date.month(), date.day());
    let f_day =
        julian_fraction_of_day(date.hour(), date.minute(), date.second(), date.nanosecond());
    year + doy as f64 + f_day
}

/// Julian date of day 0.0 of `year`.
///
/// Astronomical Formulae for Calculators, Jean Meeus, pages 23-25.
pub fn julian_date_of_year(year: i32) -> f64 {
    let year = year - 1;
    let a = year / 100;
    let b = 2 - a + (a / 4);
    (365.25 * year as f64).floor() + (30.6001f64 * 14.0).floor() + 1720994.5 + b as f64
}

const DAYS: [u16; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn julian_day_of_year(yr: i32, mo: u32, dy: u32) -> u16 {
    let mut day: u16 = 0;
    for i in 0..(mo - 1) as usize {
        day += DAYS[i];
    }

    let mut day = day + dy as u16;

    if ((yr % 4) == 0) && (((yr % 100) != 0) || ((yr % 400) == 0)) && (mo > 2) {
        day += 1;
    }

    day
}

pub fn julian_fraction_of_day(h: u32, m: u32, s: u32, ns: u32) -> f64 {
    (h as f64 / 24.0)
        + (m as f64 / (24.0 * 60.0))
        + (s as f64 / (24.0 * 3600.0))
        + (ns as f64 / (24.0 * 3600.0 * 1.0e+9))
}

/// Greenwich Mean Sidereal Time in radians for a Julian date.
///
/// Uses the 1970-referenced formulation common to SGP4 implementations
/// so that the resonance phase reference matches the published model.
pub fn sidereal_time(julian: f64) -> f64 {
    const C1: f64 = 1.72027916940703639e-2;
    const THGR70: f64 = 1.7321343856509374;
    const FK5R: f64 = 5.07551419432269442e-15;

    /* integer number of days from 0 jan 1970 */
    let ts70 = julian - 2433281.5 - 7305.0;
    let ds70 = (ts70 + 1.0e-8).floor();
    let tfrac = ts70 - ds70;

    let c1p2p = C1 + TWOPI;
    fmod2p(THGR70 + C1 * ds70 + c1p2p * tfrac + ts70 * ts70 * FK5R)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_julian_date() {
        use chrono::TimeZone;
        let date = chrono::Utc.ymd(1995, 10, 1).and_hms(9, 0, 0);
        let jd = julian_date(date);
        assert_approx_eq!(jd, 2449991.875);
    }

    #[test]
    fn test_sidereal_time() {
        use chrono::TimeZone;
        let date = chrono::Utc.ymd(1995, 10, 1).and_hms(9, 0, 0);
        let theta = sidereal_time(julian_date(date));
        assert_approx_eq!(theta, 2.524218, 1.0e-4);
    }

    #[test]
    fn test_fmod2p_wraps_into_range() {
        assert_approx_eq!(fmod2p(3.0 * TWOPI + 1.0), 1.0, 1.0e-12);
        assert_approx_eq!(fmod2p(-1.0), TWOPI - 1.0, 1.0e-12);
        assert!(fmod2p(-7.0 * TWOPI) >= 0.0);
    }
}
