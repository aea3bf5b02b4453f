//! Headless asteroid field: spawning, moving, culling and replenishing asteroids
//! around the collision engine.
//!
//! Each call to [`AsteroidField::step`] runs one frame:
//!
//! 1. collisions are detected and resolved,
//! 2. every asteroid moves by its velocity (in parallel with Rayon),
//! 3. asteroids that left the domain are dropped,
//! 4. new asteroids enter from the domain edges until the target population is back.
//!
//! All randomness comes from one generator seeded from the configuration, so two
//! fields built from the same configuration evolve identically.
//!
//! # Example
//!
//! ```
//! use rs_asteroids::simulation::AsteroidField;
//! use rs_asteroids::utils::SimulationConfig;
//!
//! let config = SimulationConfig::new(Some(200.0), Some(100.0), Some(500), None, None, Some(42), None, None);
//! let mut field = AsteroidField::new(config).expect("Failed to create field");
//!
//! for _ in 0..10 {
//!     let report = field.step().expect("Step failed");
//!     assert_eq!(report.population, 500);
//! }
//! assert_eq!(field.frames(), 10);
//! ```
use std::f64::consts::PI;
use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::interactions::{CollisionEngine, CollisionReport};
use crate::models::{BoundingBox, Vector2D};
use crate::particles::Asteroid;
use crate::utils::{AsteroidError, SimulationConfig};

/// A side of the simulated domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Bottom,
    Right,
    Top,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Bottom, Edge::Right, Edge::Top, Edge::Left];

    pub fn index(self) -> usize {
        match self {
            Edge::Bottom => 0,
            Edge::Right => 1,
            Edge::Top => 2,
            Edge::Left => 3,
        }
    }

    /// A uniformly random point on this side of `domain`.
    pub fn random_point<R: Rng>(self, domain: &BoundingBox, rng: &mut R) -> Vector2D {
        match self {
            Edge::Bottom => Vector2D::new(rng.random::<f64>() * domain.width() + domain.left(), domain.bottom()),
            Edge::Right => Vector2D::new(domain.right(), rng.random::<f64>() * domain.height() + domain.bottom()),
            Edge::Top => Vector2D::new(rng.random::<f64>() * domain.width() + domain.left(), domain.top()),
            Edge::Left => Vector2D::new(domain.left(), rng.random::<f64>() * domain.height() + domain.bottom()),
        }
    }

    /// A random heading pointing into the domain from this side, in radians.
    pub fn random_inward_angle<R: Rng>(self, rng: &mut R) -> f64 {
        rng.random::<f64>() * PI + self.index() as f64 * PI / 2.0
    }
}

impl TryFrom<usize> for Edge {
    type Error = AsteroidError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Edge::ALL
            .get(index)
            .copied()
            .ok_or(AsteroidError::OutOfRangeIndex(index))
    }
}

/// What happened during one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// 1-based number of the frame just simulated.
    pub frame: u64,
    pub collisions: CollisionReport,
    /// Asteroids dropped because they left the domain.
    pub culled: usize,
    /// Asteroids spawned on the edges to refill the field.
    pub spawned: usize,
    /// Asteroids alive at the end of the frame.
    pub population: usize,
}

/// A population of asteroids drifting through a rectangular domain.
pub struct AsteroidField {
    config: SimulationConfig,
    domain: BoundingBox,
    asteroids: Vec<Asteroid>,
    rng: StdRng,
    engine: CollisionEngine,
    frames: u64,
    started: Instant,
}

impl AsteroidField {
    /// Creates a field filled with `config.target_asteroids` asteroids at random
    /// positions, headings and speeds.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not pass [`SimulationConfig::validate`].
    pub fn new(config: SimulationConfig) -> Result<Self, AsteroidError> {
        let mut field = AsteroidField::from_asteroids(config, Vec::with_capacity(config.target_asteroids))?;
        for _ in 0..config.target_asteroids {
            let asteroid = random_asteroid(&mut field.rng, &field.domain, &field.config)?;
            field.asteroids.push(asteroid);
        }
        Ok(field)
    }

    /// Creates a field holding exactly `asteroids`. Later steps still refill it
    /// up to `config.target_asteroids`.
    pub fn from_asteroids(config: SimulationConfig, asteroids: Vec<Asteroid>) -> Result<Self, AsteroidError> {
        config.validate()?;
        let domain = config.domain()?;
        Ok(AsteroidField {
            config,
            domain,
            asteroids,
            rng: StdRng::seed_from_u64(config.seed),
            engine: CollisionEngine::with_limits(config.limits),
            frames: 0,
            started: Instant::now(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn domain(&self) -> BoundingBox {
        self.domain
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame. See the module documentation for the order of operations.
    pub fn step(&mut self) -> Result<StepReport, AsteroidError> {
        let collisions = self.detect_collisions()?;
        self.move_asteroids();
        let culled = self.clear_asteroids()?;
        let spawned = self.complete_asteroids()?;
        self.frames += 1;

        debug!(
            "frame {}: {} collisions, {} culled, {} spawned",
            self.frames,
            collisions.collisions.len(),
            culled,
            spawned
        );
        if self.config.report_interval > 0 && self.frames % self.config.report_interval == 0 {
            let elapsed = self.started.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                info!("{} frames, {:.1} frames/s", self.frames, self.frames as f64 / elapsed);
            }
        }

        Ok(StepReport {
            frame: self.frames,
            collisions,
            culled,
            spawned,
            population: self.asteroids.len(),
        })
    }

    /// Resolves collisions between the current asteroids without moving them.
    pub fn detect_collisions(&mut self) -> Result<CollisionReport, AsteroidError> {
        self.engine.resolve_collisions(self.domain, &mut self.asteroids)
    }

    /// Moves every asteroid by its velocity.
    pub fn move_asteroids(&mut self) {
        self.asteroids.par_iter_mut().for_each(Asteroid::advance);
    }

    /// Drops the asteroids whose bounding box no longer intersects the domain
    /// and returns how many were dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AsteroidError::InvalidGeometry`] if an asteroid has a non-finite
    /// position. No asteroid is dropped in that case.
    pub fn clear_asteroids(&mut self) -> Result<usize, AsteroidError> {
        let mut keep = Vec::with_capacity(self.asteroids.len());
        for asteroid in self.asteroids.iter() {
            keep.push(asteroid.bounding_box()?.intersects(&self.domain));
        }
        let before = self.asteroids.len();
        let mut flags = keep.into_iter();
        self.asteroids.retain(|_| flags.next().unwrap_or(true));
        Ok(before - self.asteroids.len())
    }

    /// Spawns asteroids on the domain edges until the target population is
    /// reached and returns how many were added.
    pub fn complete_asteroids(&mut self) -> Result<usize, AsteroidError> {
        let missing = self.config.target_asteroids.saturating_sub(self.asteroids.len());
        for _ in 0..missing {
            let asteroid = random_edge_asteroid(&mut self.rng, &self.domain, &self.config)?;
            self.asteroids.push(asteroid);
        }
        Ok(missing)
    }
}

/// An asteroid anywhere in the domain, heading anywhere.
fn random_asteroid(rng: &mut StdRng, domain: &BoundingBox, config: &SimulationConfig) -> Result<Asteroid, AsteroidError> {
    let x = rng.random::<f64>() * domain.width() + domain.left();
    let y = rng.random::<f64>() * domain.height() + domain.bottom();
    let angle = rng.random::<f64>() * 2.0 * PI;
    let speed = rng.random::<f64>() * config.max_speed;
    Asteroid::new(Vector2D::new(x, y), speed, angle, config.asteroid_radius)
}

/// An asteroid on a random edge of the domain, heading inwards.
fn random_edge_asteroid(rng: &mut StdRng, domain: &BoundingBox, config: &SimulationConfig) -> Result<Asteroid, AsteroidError> {
    let edge = Edge::try_from(rng.random_range(0..Edge::ALL.len()))?;
    let angle = edge.random_inward_angle(rng);
    let position = edge.random_point(domain, rng);
    let speed = rng.random::<f64>() * config.max_speed;
    Asteroid::new(position, speed, angle, config.asteroid_radius)
}
