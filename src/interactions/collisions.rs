//! Broad and narrow phase collision handling for asteroid fields.
//!
//! Every step, [`CollisionEngine::resolve_collisions`] snapshots the asteroids,
//! indexes the snapshots in a quadtree built in a per-step arena, asks the
//! tree for the neighbours of each asteroid, keeps the pairs whose disks truly
//! overlap and applies [`Asteroid::collide`] to them.
//!
//! Only velocities change. Moving asteroids and discarding the ones that left
//! the domain is up to the caller.
//!
//! # Example
//!
//! ```
//! use rs_asteroids::interactions::CollisionEngine;
//! use rs_asteroids::models::{BoundingBox, Vector2D};
//! use rs_asteroids::particles::Asteroid;
//!
//! let domain = BoundingBox::new(-10.0, 10.0, 10.0, -10.0).unwrap();
//! let mut asteroids = vec![
//!     Asteroid::with_velocity(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0), 2.0).unwrap(),
//!     Asteroid::with_velocity(Vector2D::new(3.0, 0.0), Vector2D::new(-1.0, 0.0), 2.0).unwrap(),
//! ];
//!
//! let mut engine = CollisionEngine::new();
//! let report = engine.resolve_collisions(domain, &mut asteroids).expect("step failed");
//!
//! assert_eq!(report.collisions, vec![(0, 1)]);
//! assert_eq!(asteroids[0].velocity, Vector2D::new(-1.0, 0.0));
//! assert_eq!(asteroids[1].velocity, Vector2D::new(1.0, 0.0));
//! ```
use bumpalo::Bump;
use log::{debug, trace};

use crate::models::{BoundingBox, Vector2D};
use crate::particles::{Asteroid, ImpulseOutcome};
use crate::spatial::{Bounded, QuadTreeLimits, SpatialIndex};
use crate::utils::AsteroidError;

/// Frozen view of one asteroid for the duration of a step.
///
/// Positions do not change while collisions are resolved, so the broad phase
/// can index these while the asteroids' velocities are being updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Position of the asteroid in the slice handed to the engine.
    pub index: usize,
    pub position: Vector2D,
    pub radius: f64,
    bounds: BoundingBox,
}

impl Collider {
    /// # Errors
    ///
    /// Returns [`AsteroidError::InvalidGeometry`] if the asteroid's position is not finite.
    pub fn snapshot(index: usize, asteroid: &Asteroid) -> Result<Self, AsteroidError> {
        Ok(Collider {
            index,
            position: asteroid.position,
            radius: asteroid.radius(),
            bounds: asteroid.bounding_box()?,
        })
    }

    /// Narrow phase: true when the two disks overlap.
    pub fn touches(&self, other: &Collider) -> bool {
        (other.position - self.position).length() < self.radius + other.radius
    }
}

impl Bounded for Collider {
    fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }
}

/// Summary of one collision pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Number of asteroids examined.
    pub colliders: usize,
    /// Broad phase hits summed over all queries, false positives included.
    pub candidates: usize,
    /// Overlapping pairs `(i, j)` with `i < j`, each listed once.
    pub collisions: Vec<(usize, usize)>,
    pub impulses: usize,
    pub separating: usize,
    pub degenerate: usize,
}

impl CollisionReport {
    fn record(&mut self, i: usize, j: usize, outcome: ImpulseOutcome) {
        self.collisions.push((i, j));
        match outcome {
            ImpulseOutcome::Applied { .. } => self.impulses += 1,
            ImpulseOutcome::Separating => self.separating += 1,
            ImpulseOutcome::Degenerate => {
                trace!("asteroids {} and {} share a centre, impulse skipped", i, j);
                self.degenerate += 1;
            }
        }
    }
}

/// Detects and resolves collisions, one step at a time.
///
/// The engine keeps its arena and snapshot buffer between steps so their
/// memory is reused; nothing from a previous step is visible to the next.
pub struct CollisionEngine {
    arena: Bump,
    limits: QuadTreeLimits,
    colliders: Vec<Collider>,
}

impl Default for CollisionEngine {
    fn default() -> Self {
        CollisionEngine::new()
    }
}

impl CollisionEngine {
    pub fn new() -> Self {
        CollisionEngine::with_limits(QuadTreeLimits::default())
    }

    pub fn with_limits(limits: QuadTreeLimits) -> Self {
        CollisionEngine {
            arena: Bump::new(),
            limits,
            colliders: Vec::new(),
        }
    }

    pub fn limits(&self) -> QuadTreeLimits {
        self.limits
    }

    /// Updates the velocities of every pair of overlapping asteroids.
    ///
    /// Asteroids whose box lies outside `domain` are never indexed and so never
    /// collide.
    ///
    /// # Errors
    ///
    /// Returns [`AsteroidError::InvalidGeometry`] as soon as an asteroid with a
    /// non-finite position is met. Velocities are left untouched in that case.
    pub fn resolve_collisions(
        &mut self,
        domain: BoundingBox,
        asteroids: &mut [Asteroid],
    ) -> Result<CollisionReport, AsteroidError> {
        let CollisionEngine { arena, limits, colliders } = self;
        arena.reset();
        colliders.clear();
        for (index, asteroid) in asteroids.iter().enumerate() {
            colliders.push(Collider::snapshot(index, asteroid)?);
        }

        let index = SpatialIndex::build(&*arena, domain, *limits, colliders.iter());
        let mut report = CollisionReport {
            colliders: colliders.len(),
            ..CollisionReport::default()
        };

        for collider in colliders.iter() {
            let candidates = index.neighbours(collider);
            report.candidates += candidates.size();
            for other in candidates {
                // The pair is also found from the lower index; handle it there only.
                if other.index < collider.index {
                    continue;
                }
                if collider.touches(other) {
                    let (a, b) = pair_mut(asteroids, collider.index, other.index);
                    report.record(collider.index, other.index, a.collide(b));
                }
            }
        }

        debug!(
            "collision pass: {} asteroids, tree depth {}, {} stored entries, {} candidates, {} collisions ({} impulses, {} degenerate), arena {} bytes",
            report.colliders,
            index.depth(),
            index.stored_count(),
            report.candidates,
            report.collisions.len(),
            report.impulses,
            report.degenerate,
            arena.allocated_bytes(),
        );
        Ok(report)
    }
}

/// Brute-force variant of [`CollisionEngine::resolve_collisions`] testing every pair.
///
/// Quadratic in the number of asteroids; useful as a reference for small inputs.
pub fn detect_collisions_naive(asteroids: &mut [Asteroid]) -> CollisionReport {
    let mut report = CollisionReport {
        colliders: asteroids.len(),
        ..CollisionReport::default()
    };
    for i in 0..asteroids.len() {
        for j in (i + 1)..asteroids.len() {
            report.candidates += 1;
            let (a, b) = pair_mut(asteroids, i, j);
            if a.overlaps(b) {
                report.record(i, j, a.collide(b));
            }
        }
    }
    report
}

/// Two distinct mutable elements of a slice, `i < j`.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j, "pair_mut needs i < j, got {} and {}", i, j);
    let (head, tail) = items.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
