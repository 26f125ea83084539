//! Satellite tracking with the SGP4/SDP4 orbital propagators.
//!
//! Takes the mean orbital elements of a NORAD two-line element set and
//! produces inertial (TEME) position and velocity at any offset from the
//! element epoch. Near-Earth orbits use the SGP4 model; orbits with
//! periods of 225 minutes and longer use the deep-space SDP4 model with
//! lunar/solar and Earth-resonance perturbations.
//!
//! ```no_run
//! use sattrack::{GravityModel, OrbitalElements, Propagator};
//!
//! let elements = OrbitalElements::parse(
//!     "ISS (ZARYA)
//! 1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
//! 2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
//! );
//!
//! let mut propagator = Propagator::new(GravityModel::Wgs72);
//! propagator.set_tle(&elements)?;
//! let state = propagator.find_position(90.0)?;
//! println!(
//!     "r = ({:.3}, {:.3}, {:.3}) km",
//!     state.position.x, state.position.y, state.position.z
//! );
//! # Ok::<(), sattrack::Error>(())
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

pub mod coords;
mod error;
pub mod sat;
pub mod sgdp4;
pub mod time;
pub mod tle;

pub use coords::{TemeState, Vector3};
pub use error::{Error, Result};
pub use sat::Satellite;
pub use sgdp4::{Constants, GravityModel, Propagator};
pub use tle::{Epoch, OrbitalElements};
