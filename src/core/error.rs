//! Configuration errors raised when a sheet is constructed.
//!
//! The motion controller never fails at runtime; everything that could feed
//! NaN or garbage positions into the animation loop is rejected up front.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("snap point list is empty")]
    EmptySnapPoints,

    #[error("snap point #{index} = {value} is outside (0, 1]")]
    SnapPointOutOfRange { index: usize, value: f64 },

    #[error("snap point #{index} is not greater than the one before it")]
    SnapPointsNotAscending { index: usize },

    #[error("initial snap index {index} is out of range for {len} snap points")]
    InitialSnapOutOfRange { index: usize, len: usize },

    #[error("spring stiffness must be positive and finite (got {0})")]
    InvalidStiffness(f64),

    #[error("spring damping must lie strictly between 0 and 1 (got {0})")]
    InvalidDamping(f64),

    #[error("spring mass must be positive and finite (got {0})")]
    InvalidMass(f64),

    #[error(
        "spring would oscillate without settling: stiffness/mass = {ratio:.3} exceeds {limit:.3}"
    )]
    UnstableSpring { ratio: f64, limit: f64 },

    #[error("viewport height must be positive and finite (got {0})")]
    InvalidViewport(f64),
}
