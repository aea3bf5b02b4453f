use approx::assert_relative_eq;
use proptest::prelude::*;
use std::f64::consts::PI;

use crate::models::{BoundingBox, Quadrant, Vector2D};
use crate::utils::AsteroidError;

fn bounding_box() -> impl Strategy<Value = BoundingBox> {
    (-1.0e3..1.0e3f64, 1.0e-3..1.0e3f64, -1.0e3..1.0e3f64, 1.0e-3..1.0e3f64).prop_map(
        |(left, width, bottom, height)| {
            BoundingBox::new(left, left + width, bottom + height, bottom)
                .expect("generated box is valid")
        },
    )
}

#[test]
fn test_vector_arithmetic() {
    let a = Vector2D::new(1.0, 2.0);
    let b = Vector2D::new(3.0, -1.0);
    assert_eq!(a + b, Vector2D::new(4.0, 1.0));
    assert_eq!(a - b, Vector2D::new(-2.0, 3.0));
    assert_eq!(a * 2.0, Vector2D::new(2.0, 4.0));
    assert_eq!(-a, Vector2D::new(-1.0, -2.0));
    assert_eq!(a.dot(b), 1.0);
    assert_relative_eq!(Vector2D::new(3.0, 4.0).length(), 5.0);
}

#[test]
fn test_vector_from_polar() {
    let v = Vector2D::from_polar(PI, 2.0);
    assert_relative_eq!(v.x, -2.0, epsilon = 1e-12);
    assert_relative_eq!(v.y, 0.0, epsilon = 1e-12);
}

#[test]
fn test_vector_normalized() {
    let n = Vector2D::new(0.0, -5.0).normalized().expect("non-zero vector");
    assert_relative_eq!(n.length(), 1.0);
    assert_eq!(n, Vector2D::new(0.0, -1.0));
    assert!(Vector2D::ZERO.normalized().is_none());
}

#[test]
fn test_bounding_box_rejects_invalid_edges() {
    assert!(matches!(
        BoundingBox::new(2.0, 1.0, 1.0, 0.0),
        Err(AsteroidError::InvalidGeometry { .. })
    ));
    assert!(BoundingBox::new(0.0, 1.0, 1.0, 1.0).is_err());
    assert!(BoundingBox::new(f64::NAN, 1.0, 1.0, 0.0).is_err());
    assert!(BoundingBox::new(0.0, 1.0, f64::NAN, 0.0).is_err());
}

#[test]
fn test_bounding_box_around() {
    let bb = BoundingBox::around(Vector2D::new(5.0, -3.0), 2.0).expect("valid box");
    assert_eq!(bb.left(), 3.0);
    assert_eq!(bb.right(), 7.0);
    assert_eq!(bb.top(), -1.0);
    assert_eq!(bb.bottom(), -5.0);
    assert_eq!(bb.center(), Vector2D::new(5.0, -3.0));
}

#[test]
fn test_intersects_excludes_touching_corners() {
    let a = BoundingBox::new(0.0, 1.0, 1.0, 0.0).unwrap();
    let corner = BoundingBox::new(1.0, 2.0, 2.0, 1.0).unwrap();
    let inside = BoundingBox::new(0.25, 0.75, 0.75, 0.25).unwrap();
    assert!(!a.intersects(&corner));
    assert!(a.intersects(&inside));
    assert!(inside.intersects(&a));
}

#[test]
fn test_quadrants_of_unit_box() {
    let bb = BoundingBox::new(0.0, 2.0, 2.0, 0.0).unwrap();
    assert_eq!(bb.top_left_quarter(), BoundingBox::new(0.0, 1.0, 2.0, 1.0).unwrap());
    assert_eq!(bb.top_right_quarter(), BoundingBox::new(1.0, 2.0, 2.0, 1.0).unwrap());
    assert_eq!(bb.bottom_left_quarter(), BoundingBox::new(0.0, 1.0, 1.0, 0.0).unwrap());
    assert_eq!(bb.bottom_right_quarter(), BoundingBox::new(1.0, 2.0, 1.0, 0.0).unwrap());
}

#[test]
fn test_quadrant_selector() {
    assert_eq!(Quadrant::try_from(0), Ok(Quadrant::TopLeft));
    assert_eq!(Quadrant::try_from(3), Ok(Quadrant::BottomRight));
    assert_eq!(Quadrant::try_from(4), Err(AsteroidError::OutOfRangeIndex(4)));
    for (i, q) in Quadrant::ALL.iter().enumerate() {
        assert_eq!(q.index(), i);
    }
}

fn assert_quarters_are_valid(bb: &BoundingBox) {
    for q in bb.quadrants().iter() {
        assert!(q.left().is_finite() && q.right().is_finite(), "{:?} split into {:?}", bb, q);
        assert!(q.left() < q.right() && q.bottom() < q.top(), "{:?} split into {:?}", bb, q);
        assert!(q.left() >= bb.left() && q.right() <= bb.right());
        assert!(q.bottom() >= bb.bottom() && q.top() <= bb.top());
    }
}

#[test]
fn test_quadrants_of_huge_boxes() {
    // Sum of the bounds overflows.
    let far = BoundingBox::new(1.0e308, 1.5e308, 1.0, 0.0).unwrap();
    assert_quarters_are_valid(&far);
    assert_relative_eq!(far.top_right_quarter().left(), 1.25e308, max_relative = 1e-12);

    // Span of the bounds overflows.
    let wide = BoundingBox::new(-f64::MAX, f64::MAX, f64::MAX, -f64::MAX).unwrap();
    assert_quarters_are_valid(&wide);
    assert_eq!(wide.center(), Vector2D::ZERO);
}

fn huge_bounding_box() -> impl Strategy<Value = BoundingBox> {
    let bound = prop_oneof![-1.7e308..-1.0e300f64, -1.0e3..1.0e3f64, 1.0e300..1.7e308f64];
    (bound.clone(), bound.clone(), bound.clone(), bound).prop_filter_map(
        "bounds must differ",
        |(a, b, c, d)| {
            if a == b || c == d {
                return None;
            }
            BoundingBox::new(a.min(b), a.max(b), c.max(d), c.min(d)).ok()
        },
    )
}

proptest! {
    #[test]
    fn prop_quadrants_of_huge_boxes_are_valid(bb in huge_bounding_box()) {
        for q in bb.quadrants().iter() {
            prop_assert!(q.left().is_finite() && q.right().is_finite());
            prop_assert!(q.left() < q.right() && q.bottom() < q.top());
            prop_assert!(q.left() >= bb.left() && q.right() <= bb.right());
            prop_assert!(q.bottom() >= bb.bottom() && q.top() <= bb.top());
        }
    }

    #[test]
    fn prop_valid_boxes_have_positive_extent(bb in bounding_box()) {
        prop_assert!(bb.width() > 0.0);
        prop_assert!(bb.height() > 0.0);
    }

    #[test]
    fn prop_inverted_boxes_are_rejected(a in -1.0e3..1.0e3f64, b in -1.0e3..1.0e3f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(BoundingBox::new(hi, lo, 1.0, 0.0).is_err());
        prop_assert!(BoundingBox::new(0.0, 1.0, lo, hi).is_err());
    }

    #[test]
    fn prop_intersection_is_symmetric(a in bounding_box(), b in bounding_box()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn prop_quadrants_cover_the_box(bb in bounding_box()) {
        let quadrants = bb.quadrants();
        let total: f64 = quadrants.iter().map(|q| q.area()).sum();
        prop_assert!((total - bb.area()).abs() <= 1e-7 * bb.area());
        for q in quadrants.iter() {
            prop_assert!((q.width() - bb.width() / 2.0).abs() <= 1e-7 * bb.width());
            prop_assert!((q.height() - bb.height() / 2.0).abs() <= 1e-7 * bb.height());
            prop_assert!(q.left() >= bb.left() && q.right() <= bb.right());
            prop_assert!(q.bottom() >= bb.bottom() && q.top() <= bb.top());
        }
    }
}
