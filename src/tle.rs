//! Mean orbital elements as consumed by the propagator.
//!
//! TLE text parsing is delegated to the `tle` crate; this module only
//! converts the parsed fields into the units the propagator works in
//! (radians, radians per minute) and carries the epoch.

use crate::sgdp4::consts::MIN_PER_DAY;
use crate::time;

/// Absolute epoch of an element set.
///
/// Stored as a Julian date; exposes the two queries the deep-space model
/// needs: sidereal time and the day count since the 1900 reference used
/// by the lunar/solar theory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epoch {
    julian: f64,
}

impl Epoch {
    /// Epoch from the TLE `YYDDD.DDDDDDDD` field.
    ///
    /// Two-digit years below 57 are taken as 20xx, per the usual
    /// NORAD convention (valid 1957 through 2056).
    pub fn from_tle_format(yyddd: f64) -> Epoch {
        let mut year = (yyddd * 1.0e-3).floor();
        let day = yyddd - year * 1.0e3;
        if year < 57.0 {
            year += 2000.0;
        } else {
            year += 1900.0;
        }

        Epoch {
            julian: time::julian_date_of_year(year as i32) + day,
        }
    }

    pub fn from_julian(julian: f64) -> Epoch {
        Epoch { julian }
    }

    pub fn from_datetime(date: chrono::DateTime<chrono::Utc>) -> Epoch {
        Epoch {
            julian: time::julian_date(date),
        }
    }

    pub fn julian(&self) -> f64 {
        self.julian
    }

    /// Greenwich Mean Sidereal Time at this epoch, radians.
    pub fn to_gmst(&self) -> f64 {
        time::sidereal_time(self.julian)
    }

    /// Fractional days since 1900 January 0.5 (1899 Dec 31 12h UT).
    pub fn days_since_1900(&self) -> f64 {
        self.julian - 2415020.0
    }
}

/// Brouwer mean elements at epoch, in propagator units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Inclination, radians.
    pub inclination: f64,
    /// Right ascension of the ascending node, radians.
    pub ascending_node: f64,
    pub eccentricity: f64,
    /// Argument of perigee, radians.
    pub argument_perigee: f64,
    /// Mean anomaly, radians.
    pub mean_anomaly: f64,
    /// Mean motion, radians per minute.
    pub mean_motion: f64,
    /// B* drag term, inverse Earth radii.
    pub bstar: f64,
    pub epoch: Epoch,
}

impl OrbitalElements {
    /// Extracts elements from TLE text (name line plus the two element
    /// lines), converting degrees to radians and revolutions per day to
    /// radians per minute.
    pub fn parse(text: &str) -> OrbitalElements {
        let mut lines = text.lines().rev();
        let line2 = lines.next().unwrap();
        let line1 = lines.next().unwrap();
        let parsed = tle::Tle::parse(line1.as_bytes(), line2.as_bytes()).unwrap();
        let yyddd = parsed.epoch_year as f64 * 1.0e3 + parsed.epoch_day_and_fractional_part;
        OrbitalElements {
            inclination: (parsed.inclination as f64).to_radians(),
            ascending_node: (parsed.right_ascension_of_ascending_node as f64).to_radians(),
            eccentricity: parsed.eccentricity as f64,
            argument_perigee: (parsed.argument_of_perigee as f64).to_radians(),
            mean_anomaly: (parsed.mean_anomaly as f64).to_radians(),
            mean_motion: parsed.mean_motion as f64 * time::TWOPI / MIN_PER_DAY,
            bstar: parsed.b_star as f64,
            epoch: Epoch::from_tle_format(yyddd),
        }
    }
}
