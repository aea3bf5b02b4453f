use crate::models::{BoundingBox, Vector2D};
use crate::utils::AsteroidError;

/// What happened when two touching asteroids exchanged momentum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpulseOutcome {
    /// The asteroids were closing; the normal components of their velocities
    /// changed by `closing_speed`.
    Applied { closing_speed: f64 },
    /// The asteroids were already moving apart; nothing changed.
    Separating,
    /// Both centres coincide so there is no contact normal; nothing changed.
    Degenerate,
}

/// A disk moving at constant velocity until it hits another one.
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    /// Centre of the disk.
    pub position: Vector2D,
    /// Displacement applied on every call to [`Asteroid::advance`].
    pub velocity: Vector2D,
    radius: f64,
}

impl Asteroid {
    /// Creates a new Asteroid heading at `angle` radians with the given speed.
    ///
    /// # Errors
    ///
    /// Returns [`AsteroidError::InvalidRadius`] if `radius` is not strictly positive and finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_asteroids::models::Vector2D;
    /// use rs_asteroids::particles::Asteroid;
    ///
    /// let asteroid = Asteroid::new(Vector2D::new(10.0, 10.0), 1.0, 0.0, 2.0)
    ///     .expect("Failed to create asteroid");
    /// assert_eq!(asteroid.velocity, Vector2D::new(1.0, 0.0));
    ///
    /// assert!(Asteroid::new(Vector2D::new(0.0, 0.0), 1.0, 0.0, 0.0).is_err());
    /// ```
    pub fn new(position: Vector2D, speed: f64, angle: f64, radius: f64) -> Result<Self, AsteroidError> {
        Asteroid::with_velocity(position, Vector2D::from_polar(angle, speed), radius)
    }

    /// Creates a new Asteroid from a cartesian velocity.
    pub fn with_velocity(position: Vector2D, velocity: Vector2D, radius: f64) -> Result<Self, AsteroidError> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(AsteroidError::InvalidRadius);
        }
        Ok(Asteroid {
            position,
            velocity,
            radius,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The square of side `2 * radius` around the current position.
    ///
    /// Computed from the position on every call.
    ///
    /// # Errors
    ///
    /// Returns [`AsteroidError::InvalidGeometry`] when the position is not finite.
    pub fn bounding_box(&self) -> Result<BoundingBox, AsteroidError> {
        BoundingBox::around(self.position, self.radius)
    }

    pub fn distance_to(&self, other: &Asteroid) -> f64 {
        (other.position - self.position).length()
    }

    /// Returns true when the two disks overlap (touching is not enough).
    pub fn overlaps(&self, other: &Asteroid) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }

    /// Moves the asteroid by one step of its velocity.
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Exchanges the velocity components along the line of centres, as two
    /// equal-mass disks colliding elastically without friction.
    ///
    /// Nothing happens if the asteroids are already moving apart along that
    /// line, or if their centres coincide.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_asteroids::models::Vector2D;
    /// use rs_asteroids::particles::{Asteroid, ImpulseOutcome};
    ///
    /// let mut a = Asteroid::with_velocity(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0), 2.0).unwrap();
    /// let mut b = Asteroid::with_velocity(Vector2D::new(3.0, 0.0), Vector2D::new(-1.0, 0.0), 2.0).unwrap();
    ///
    /// assert_eq!(a.collide(&mut b), ImpulseOutcome::Applied { closing_speed: 2.0 });
    /// assert_eq!(a.velocity, Vector2D::new(-1.0, 0.0));
    /// assert_eq!(b.velocity, Vector2D::new(1.0, 0.0));
    /// ```
    pub fn collide(&mut self, other: &mut Asteroid) -> ImpulseOutcome {
        let normal = match (other.position - self.position).normalized() {
            Some(normal) => normal,
            None => return ImpulseOutcome::Degenerate,
        };
        let relative_velocity = self.velocity - other.velocity;

        let closing_speed = relative_velocity.dot(normal);
        if closing_speed < 0.0 {
            return ImpulseOutcome::Separating;
        }
        let impulse = normal * closing_speed;
        self.velocity -= impulse;
        other.velocity += impulse;
        ImpulseOutcome::Applied { closing_speed }
    }
}
