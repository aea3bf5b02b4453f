// src/utils/constants_config.rs
use crate::models::BoundingBox;
use crate::spatial::QuadTreeLimits;
use crate::utils::{
    DEFAULT_SIMULATION_CONFIG,
    errors::AsteroidError
};

/// Settings for an asteroid field.
///
/// `width` and `height` describe the visible area; the simulated domain is a
/// little larger so asteroids can drift out of view before they are discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub width: f64,
    pub height: f64,
    pub target_asteroids: usize,
    pub asteroid_radius: f64,
    /// Initial speeds are drawn uniformly from `[0, max_speed)`.
    pub max_speed: f64,
    pub seed: u64,
    /// Number of frames between two frame rate log lines. Zero disables them.
    pub report_interval: u64,
    pub limits: QuadTreeLimits,
}


impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONFIG
    }
}

impl SimulationConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width: Option<f64>,
        height: Option<f64>,
        target_asteroids: Option<usize>,
        asteroid_radius: Option<f64>,
        max_speed: Option<f64>,
        seed: Option<u64>,
        report_interval: Option<u64>,
        limits: Option<QuadTreeLimits>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONFIG;
        Self {
            width: width.unwrap_or(default.width),
            height: height.unwrap_or(default.height),
            target_asteroids: target_asteroids.unwrap_or(default.target_asteroids),
            asteroid_radius: asteroid_radius.unwrap_or(default.asteroid_radius),
            max_speed: max_speed.unwrap_or(default.max_speed),
            seed: seed.unwrap_or(default.seed),
            report_interval: report_interval.unwrap_or(default.report_interval),
            limits: limits.unwrap_or(default.limits),
        }
    }

    /// Checks that the settings describe a usable field.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_asteroids::utils::{AsteroidError, SimulationConfig};
    ///
    /// assert!(SimulationConfig::default().validate().is_ok());
    ///
    /// let config = SimulationConfig::new(None, None, None, Some(0.0), None, None, None, None);
    /// assert_eq!(config.validate(), Err(AsteroidError::InvalidRadius));
    /// ```
    pub fn validate(&self) -> Result<(), AsteroidError> {
        if !(self.asteroid_radius > 0.0) || !self.asteroid_radius.is_finite() {
            return Err(AsteroidError::InvalidRadius);
        }
        if !(self.width > 0.0) || !(self.height > 0.0) || !self.width.is_finite() || !self.height.is_finite() {
            return Err(AsteroidError::InvalidConfiguration(format!(
                "field size must be positive and finite, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.max_speed >= 0.0) || !self.max_speed.is_finite() {
            return Err(AsteroidError::InvalidConfiguration(format!(
                "max speed must be finite and non-negative, got {}",
                self.max_speed
            )));
        }
        if self.limits.capacity == 0 {
            return Err(AsteroidError::InvalidConfiguration(
                "leaf capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The simulated domain: the visible area grown by one asteroid diameter on every side.
    pub fn domain(&self) -> Result<BoundingBox, AsteroidError> {
        let margin = 2.0 * self.asteroid_radius;
        BoundingBox::new(-margin, self.width + margin, self.height + margin, -margin)
    }
}
