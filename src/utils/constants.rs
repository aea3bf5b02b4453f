use crate::spatial::QuadTreeLimits;
use crate::utils;

/// Number of items a quadtree leaf holds before it splits.
pub const LEAF_CAPACITY: usize = 10;

/// Depth at which leaves stop splitting. A 1600 unit wide domain bottoms out
/// at cells of roughly one and a half units, below the default asteroid diameter.
pub const MAX_TREE_DEPTH: usize = 10;

pub const DEFAULT_QUADTREE_LIMITS: QuadTreeLimits = QuadTreeLimits {
    capacity: LEAF_CAPACITY,
    max_depth: MAX_TREE_DEPTH,
};

pub const DEFAULT_SIMULATION_CONFIG: utils::SimulationConfig = utils::SimulationConfig {
    width: 1600.0,
    height: 900.0,
    target_asteroids: 100_000,
    asteroid_radius: 2.0,
    max_speed: 1.0,
    seed: 0,
    report_interval: 100,
    limits: DEFAULT_QUADTREE_LIMITS,
};
