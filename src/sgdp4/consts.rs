//! Gravitational constant sets and the fixed deep-space tables.

use crate::error::{Error, Result};

pub const TWOTHIRDS: f64 = 2.0 / 3.0;
pub const MIN_PER_DAY: f64 = 1440.0;

/// Selectable Earth gravity model.
///
/// WGS72 is the set the published TLE ephemerides are fitted against and
/// is the default; WGS72-old carries the historical hard-coded XKE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityModel {
    Wgs72Old,
    #[default]
    Wgs72,
    Wgs84,
}

impl GravityModel {
    /// Selects a constant set by name (`"wgs72old"`, `"wgs72"`,
    /// `"wgs84"`).
    pub fn from_name(name: &str) -> Result<GravityModel> {
        match name {
            "wgs72old" => Ok(GravityModel::Wgs72Old),
            "wgs72" => Ok(GravityModel::Wgs72),
            "wgs84" => Ok(GravityModel::Wgs84),
            other => Err(Error::UnknownConstantSet(other.to_string())),
        }
    }
}

/// Earth and gravitational constants, with the values derived from them
/// once at selection time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constants {
    /// Distance unit: one Earth radius.
    pub ae: f64,
    /// Earth gravitational parameter, km^3/s^2.
    pub mu: f64,
    /// Earth equatorial radius, km.
    pub xkmper: f64,
    /// sqrt(GM) in Earth-radii^1.5 per minute.
    pub xke: f64,
    pub xj2: f64,
    pub xj3: f64,
    pub xj4: f64,
    pub j3oj2: f64,
    pub ck2: f64,
    pub ck4: f64,
    pub qoms2t: f64,
    /// Drag reference altitude parameter, Earth radii.
    pub s: f64,
}

impl Constants {
    pub fn new(model: GravityModel) -> Constants {
        let ae = 1.0;
        let (mu, xkmper, xke, xj2, xj3, xj4) = match model {
            GravityModel::Wgs72Old => (
                398600.79964,
                6378.135,
                0.0743669161,
                0.001082616,
                -0.00000253881,
                -0.00000165597,
            ),
            GravityModel::Wgs72 => {
                let mu = 398600.8;
                let xkmper: f64 = 6378.135;
                (
                    mu,
                    xkmper,
                    60.0 / (xkmper * xkmper * xkmper / mu).sqrt(),
                    0.001082616,
                    -0.00000253881,
                    -0.00000165597,
                )
            }
            GravityModel::Wgs84 => {
                let mu = 398600.5;
                let xkmper: f64 = 6378.137;
                (
                    mu,
                    xkmper,
                    60.0 / (xkmper * xkmper * xkmper / mu).sqrt(),
                    0.00108262998905,
                    -0.00000253215306,
                    -0.00000161098761,
                )
            }
        };

        Constants {
            ae,
            mu,
            xkmper,
            xke,
            xj2,
            xj3,
            xj4,
            j3oj2: xj3 / xj2,
            ck2: 0.5 * xj2 * ae * ae,
            ck4: -0.375 * xj4 * ae * ae * ae * ae,
            qoms2t: ((120.0 - 78.0) * ae / xkmper).powi(4),
            s: ae + 78.0 / xkmper,
        }
    }
}

impl Default for Constants {
    fn default() -> Constants {
        Constants::new(GravityModel::default())
    }
}

/* Lunar / solar perturbation table */
pub const ZNS: f64 = 1.19459E-5;
pub const C1SS: f64 = 2.9864797E-6;
pub const ZES: f64 = 0.01675;
pub const ZNL: f64 = 1.5835218E-4;
pub const C1L: f64 = 4.7968065E-7;
pub const ZEL: f64 = 0.05490;
pub const ZCOSIS: f64 = 0.91744867;
pub const ZSINIS: f64 = 0.39785416;
pub const ZSINGS: f64 = -0.98088458;
pub const ZCOSGS: f64 = 0.1945905;

/* Resonance table */
pub const Q22: f64 = 1.7891679E-6;
pub const Q31: f64 = 2.1460748E-6;
pub const Q33: f64 = 2.2123015E-7;
pub const G22: f64 = 5.7686396;
pub const G32: f64 = 0.95240898;
pub const G44: f64 = 1.8014998;
pub const G52: f64 = 1.0508330;
pub const G54: f64 = 4.4108898;
pub const ROOT22: f64 = 1.7891679E-6;
pub const ROOT32: f64 = 3.7393792E-7;
pub const ROOT44: f64 = 7.3636953E-9;
pub const ROOT52: f64 = 1.1428639E-7;
pub const ROOT54: f64 = 2.1765803E-9;
/* Earth rotation rate, radians per minute */
pub const THDT: f64 = 4.3752691E-3;
