use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 2D vector of `f64` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Builds a cartesian vector from polar coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_asteroids::models::Vector2D;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let v = Vector2D::from_polar(FRAC_PI_2, 3.0);
    /// assert!(v.x.abs() < 1e-12);
    /// assert!((v.y - 3.0).abs() < 1e-12);
    /// ```
    pub fn from_polar(angle: f64, magnitude: f64) -> Self {
        Vector2D::new(angle.cos(), angle.sin()) * magnitude
    }

    pub fn dot(&self, other: Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Returns the unit vector pointing the same way, or `None` for a vector of
    /// zero length.
    pub fn normalized(&self) -> Option<Vector2D> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return None;
        }
        Some(Vector2D::new(self.x / length, self.y / length))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, other: Vector2D) -> Vector2D {
        self + -other
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, factor: f64) -> Vector2D {
        Vector2D::new(self.x * factor, self.y * factor)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Vector2D) {
        *self = *self + other;
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Vector2D) {
        *self = *self - other;
    }
}
