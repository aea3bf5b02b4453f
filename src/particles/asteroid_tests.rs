use approx::assert_relative_eq;
use proptest::prelude::*;
use std::f64::consts::FRAC_PI_2;

use crate::models::Vector2D;
use crate::particles::{Asteroid, ImpulseOutcome};
use crate::utils::AsteroidError;

fn asteroid(x: f64, y: f64, vx: f64, vy: f64) -> Asteroid {
    Asteroid::with_velocity(Vector2D::new(x, y), Vector2D::new(vx, vy), 2.0)
        .expect("Failed to create asteroid")
}

#[test]
fn test_new_valid() {
    let a = Asteroid::new(Vector2D::new(1.0, 2.0), 3.0, FRAC_PI_2, 2.0)
        .expect("Failed to create asteroid with valid parameters");
    assert_relative_eq!(a.velocity.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(a.velocity.y, 3.0, epsilon = 1e-12);
    assert_eq!(a.radius(), 2.0);
}

#[test]
fn test_new_invalid_radius() {
    for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = Asteroid::new(Vector2D::ZERO, 1.0, 0.0, radius);
        assert_eq!(result, Err(AsteroidError::InvalidRadius), "radius {}", radius);
    }
}

#[test]
fn test_bounding_box_follows_position() {
    let mut a = asteroid(0.0, 0.0, 1.0, 0.5);
    let before = a.bounding_box().expect("finite position");
    assert_eq!((before.left(), before.right(), before.top(), before.bottom()), (-2.0, 2.0, 2.0, -2.0));

    a.advance();
    let after = a.bounding_box().expect("finite position");
    assert_eq!((after.left(), after.right(), after.top(), after.bottom()), (-1.0, 3.0, 2.5, -1.5));
}

#[test]
fn test_bounding_box_of_non_finite_position_fails() {
    let a = asteroid(f64::NAN, 0.0, 0.0, 0.0);
    assert!(matches!(a.bounding_box(), Err(AsteroidError::InvalidGeometry { .. })));
}

#[test]
fn test_overlaps() {
    let a = asteroid(0.0, 0.0, 0.0, 0.0);
    assert!(a.overlaps(&asteroid(3.0, 0.0, 0.0, 0.0)));
    assert!(!a.overlaps(&asteroid(4.0, 0.0, 0.0, 0.0))); // touching
    assert!(!a.overlaps(&asteroid(5.0, 0.0, 0.0, 0.0)));
}

#[test]
fn test_head_on_collision_swaps_velocities() {
    let mut a = asteroid(0.0, 0.0, 1.0, 0.0);
    let mut b = asteroid(3.0, 0.0, -1.0, 0.0);
    let outcome = a.collide(&mut b);
    assert_eq!(outcome, ImpulseOutcome::Applied { closing_speed: 2.0 });
    assert_eq!(a.velocity, Vector2D::new(-1.0, 0.0));
    assert_eq!(b.velocity, Vector2D::new(1.0, 0.0));
}

#[test]
fn test_glancing_collision_keeps_tangential_components() {
    let mut a = asteroid(0.0, 0.0, 1.0, 1.0);
    let mut b = asteroid(0.0, 3.0, 0.5, -1.0);
    a.collide(&mut b);
    // Normal is the y axis: y components swap, x components stay.
    assert_relative_eq!(a.velocity.x, 1.0);
    assert_relative_eq!(a.velocity.y, -1.0);
    assert_relative_eq!(b.velocity.x, 0.5);
    assert_relative_eq!(b.velocity.y, 1.0);
}

#[test]
fn test_separating_pair_is_untouched() {
    let mut a = asteroid(0.0, 0.0, -1.0, 0.0);
    let mut b = asteroid(3.0, 0.0, 1.0, 0.0);
    assert_eq!(a.collide(&mut b), ImpulseOutcome::Separating);
    assert_eq!(a.velocity, Vector2D::new(-1.0, 0.0));
    assert_eq!(b.velocity, Vector2D::new(1.0, 0.0));
}

#[test]
fn test_coincident_centres_are_skipped() {
    let mut a = asteroid(5.0, 5.0, 1.0, 0.0);
    let mut b = asteroid(5.0, 5.0, -1.0, 0.0);
    assert_eq!(a.collide(&mut b), ImpulseOutcome::Degenerate);
    assert!(a.velocity.is_finite() && b.velocity.is_finite());
    assert_eq!(a.velocity, Vector2D::new(1.0, 0.0));
    assert_eq!(b.velocity, Vector2D::new(-1.0, 0.0));
}

proptest! {
    #[test]
    fn prop_impulse_conserves_momentum(
        dx in -4.0..4.0f64, dy in -4.0..4.0f64,
        avx in -2.0..2.0f64, avy in -2.0..2.0f64,
        bvx in -2.0..2.0f64, bvy in -2.0..2.0f64,
    ) {
        prop_assume!(dx.abs() > 1e-6 || dy.abs() > 1e-6);
        let mut a = asteroid(0.0, 0.0, avx, avy);
        let mut b = asteroid(dx, dy, bvx, bvy);
        let before = a.velocity + b.velocity;

        match a.collide(&mut b) {
            ImpulseOutcome::Applied { .. } => {
                let after = a.velocity + b.velocity;
                prop_assert!((after.x - before.x).abs() < 1e-9);
                prop_assert!((after.y - before.y).abs() < 1e-9);
            }
            ImpulseOutcome::Separating => {
                prop_assert_eq!(a.velocity, Vector2D::new(avx, avy));
                prop_assert_eq!(b.velocity, Vector2D::new(bvx, bvy));
            }
            ImpulseOutcome::Degenerate => prop_assert!(false, "centres differ"),
        }
    }
}
