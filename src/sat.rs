//! Convenience facade binding a TLE to a propagator.

use crate::coords::TemeState;
use crate::error::Result;
use crate::sgdp4::{GravityModel, Propagator};
use crate::time;
use crate::tle::OrbitalElements;

/// A satellite tracked from a TLE, queried at calendar instants.
pub struct Satellite {
    propagator: Propagator,
    epoch_julian: f64,
}

impl Satellite {
    /// Binds the TLE text (name line plus the two element lines) using
    /// the default WGS72 constants.
    pub fn from_tle(text: &str) -> Result<Satellite> {
        let elements = OrbitalElements::parse(text);
        let mut propagator = Propagator::new(GravityModel::Wgs72);
        propagator.set_tle(&elements)?;
        Ok(Satellite {
            propagator,
            epoch_julian: elements.epoch.julian(),
        })
    }

    /// TEME state at a UTC instant.
    pub fn predict(&mut self, date: chrono::DateTime<chrono::Utc>) -> Result<TemeState> {
        let tsince = (time::julian_date(date) - self.epoch_julian) * 24.0 * 60.0;
        self.propagator.find_position(tsince)
    }

    pub fn propagator(&self) -> &Propagator {
        &self.propagator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TLE: &str = "TEST SAT SDP 001
1 11801U 88888A   80230.29629788  .01431103  00000-0  14311-1 0  5552
2 11801  46.7916 230.4354 7318036  47.4722  10.4117  2.28537848   102";

    #[test]
    fn test_predict_at_epoch() {
        use chrono::TimeZone;

        let mut sat = Satellite::from_tle(TLE).unwrap();
        assert_eq!(sat.propagator().uses_deep_space(), Some(true));

        /* day 230.29629788 of 1980 is Aug 17, 07:06:40.136832 UTC */
        let date = chrono::Utc
            .ymd(1980, 8, 17)
            .and_hms_nano(7, 6, 40, 136_832_000);
        let state = sat.predict(date).unwrap();
        assert_approx_eq!(state.position.x, 7473.37066650, 0.5);
        assert_approx_eq!(state.position.y, 428.95261765, 0.5);
        assert_approx_eq!(state.position.z, 5828.74786377, 0.5);
    }
}
