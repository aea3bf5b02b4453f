pub mod utils;
pub mod models;
pub mod collections;
pub mod spatial;
pub mod particles;
pub mod interactions;
pub mod simulation;
