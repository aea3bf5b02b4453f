mod asteroid;

pub use asteroid::*;

#[cfg(test)]
mod asteroid_tests;
