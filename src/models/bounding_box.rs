use crate::models::Vector2D;
use crate::utils::AsteroidError;

/// One of the four quarters of a [`BoundingBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// All quadrants, in the order children are stored in the quadtree.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }
}

impl TryFrom<usize> for Quadrant {
    type Error = AsteroidError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Quadrant::ALL
            .get(index)
            .copied()
            .ok_or(AsteroidError::OutOfRangeIndex(index))
    }
}

/// The smallest axis-aligned rectangle enclosing a 2D shape.
///
/// The y axis points up: `top` is always greater than `bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl BoundingBox {
    /// Creates a new bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`AsteroidError::InvalidGeometry`] unless `left < right` and
    /// `bottom < top`. NaN edges are rejected as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_asteroids::models::BoundingBox;
    ///
    /// let bb = BoundingBox::new(0.0, 4.0, 2.0, 0.0).expect("valid box");
    /// assert_eq!(bb.width(), 4.0);
    /// assert_eq!(bb.height(), 2.0);
    ///
    /// assert!(BoundingBox::new(1.0, 1.0, 2.0, 0.0).is_err());
    /// assert!(BoundingBox::new(0.0, 1.0, 0.0, 2.0).is_err());
    /// ```
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Result<Self, AsteroidError> {
        // Written as negated `<` so NaN fails too.
        if !(left < right) || !(bottom < top) {
            return Err(AsteroidError::InvalidGeometry { left, right, top, bottom });
        }
        Ok(BoundingBox { left, right, top, bottom })
    }

    /// The square of side `2 * radius` centred on `center`.
    pub fn around(center: Vector2D, radius: f64) -> Result<Self, AsteroidError> {
        BoundingBox::new(
            center.x - radius,
            center.x + radius,
            center.y + radius,
            center.y - radius,
        )
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(midpoint(self.left, self.right), midpoint(self.bottom, self.top))
    }

    /// Returns true when the interiors of the two rectangles overlap.
    ///
    /// Boxes that only share an edge or a corner do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_asteroids::models::BoundingBox;
    ///
    /// let a = BoundingBox::new(0.0, 2.0, 2.0, 0.0).unwrap();
    /// let b = BoundingBox::new(1.0, 3.0, 3.0, 1.0).unwrap();
    /// let c = BoundingBox::new(2.0, 4.0, 2.0, 0.0).unwrap();
    ///
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c)); // shared edge only
    /// ```
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.bottom < other.top
            && other.bottom < self.top
    }

    /// Returns the requested quarter of this box.
    ///
    /// Neighbouring quarters share the midlines, so the four of them cover the
    /// box exactly.
    pub fn quadrant(&self, quadrant: Quadrant) -> BoundingBox {
        let mid_x = midpoint(self.left, self.right);
        let mid_y = midpoint(self.bottom, self.top);
        let (left, right, top, bottom) = match quadrant {
            Quadrant::TopLeft => (self.left, mid_x, self.top, mid_y),
            Quadrant::TopRight => (mid_x, self.right, self.top, mid_y),
            Quadrant::BottomLeft => (self.left, mid_x, mid_y, self.bottom),
            Quadrant::BottomRight => (mid_x, self.right, mid_y, self.bottom),
        };
        debug_assert!(left < right && bottom < top, "quadrant of {:?} collapsed", self);
        BoundingBox { left, right, top, bottom }
    }

    pub fn top_left_quarter(&self) -> BoundingBox {
        self.quadrant(Quadrant::TopLeft)
    }

    pub fn top_right_quarter(&self) -> BoundingBox {
        self.quadrant(Quadrant::TopRight)
    }

    pub fn bottom_left_quarter(&self) -> BoundingBox {
        self.quadrant(Quadrant::BottomLeft)
    }

    pub fn bottom_right_quarter(&self) -> BoundingBox {
        self.quadrant(Quadrant::BottomRight)
    }

    /// All four quarters, indexed like [`Quadrant::ALL`].
    pub fn quadrants(&self) -> [BoundingBox; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }
}

/// Midpoint of `low < high` that stays finite for any finite bounds.
fn midpoint(low: f64, high: f64) -> f64 {
    let half_span = (high - low) / 2.0;
    if half_span.is_finite() {
        low + half_span
    } else {
        // The span itself overflowed, which needs bounds of opposite sign.
        low / 2.0 + high / 2.0
    }
}
