mod vector_2d;
mod bounding_box;

pub use vector_2d::*;
pub use bounding_box::*;

#[cfg(test)]
mod geometry_tests;
