#[cfg(feature = "simulation")]
mod field;

#[cfg(feature = "simulation")]
pub use field::*;
