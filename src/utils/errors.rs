use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building or stepping an asteroid field.
#[derive(Debug, Clone, PartialEq)]
pub enum AsteroidError {
    /// A bounding box whose edges do not satisfy `left < right` and `bottom < top`.
    /// NaN coordinates also end up here.
    InvalidGeometry {
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
    },
    /// `head` or `tail` was requested from the empty list.
    EmptyCollection,
    /// A quadrant or edge selector outside of `0..4`.
    OutOfRangeIndex(usize),
    /// Indicates an asteroid radius that is not strictly positive and finite.
    InvalidRadius,
    /// Simulation settings that cannot produce a usable field.
    InvalidConfiguration(String),
}

impl fmt::Display for AsteroidError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AsteroidError::InvalidGeometry { left, right, top, bottom } => write!(
                f,
                "Illegal bounding box: (left {}, right {}, top {}, bottom {})",
                left, right, top, bottom
            ),
            AsteroidError::EmptyCollection => write!(f, "Empty collection"),
            AsteroidError::OutOfRangeIndex(index) => write!(f, "Index {} out of range", index),
            AsteroidError::InvalidRadius => write!(f, "Invalid radius value"),
            AsteroidError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}


impl Error for AsteroidError {}
