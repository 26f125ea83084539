use thiserror::Error;

/// Result type for propagation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while binding elements or propagating.
///
/// The set is closed: every failure of the three fallible entry points
/// (constant selection, element binding, propagation) is one of these
/// kinds. A propagation failure is terminal for that request only; the
/// propagator keeps its initialization state and may be queried again
/// at a different time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Gravitational constant set name not recognised.
    #[error("unknown gravitational constant set: {0}")]
    UnknownConstantSet(String),

    /// Element set rejected at binding time.
    #[error("invalid TLE: {0}")]
    InvalidTle(&'static str),

    /// The orbit has decayed below the Earth's surface.
    #[error("satellite decayed: {0}")]
    DecayedOrbit(&'static str),

    /// Perturbed eccentricity reached or exceeded 1.
    #[error("perturbed elements are hyperbolic (e^2 >= 1)")]
    HyperbolicState,
}
