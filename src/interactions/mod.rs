mod collisions;

pub use collisions::*;
