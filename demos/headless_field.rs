// demos/headless_field.rs

use log::info;
use rs_asteroids::simulation::AsteroidField;
use rs_asteroids::utils::{AsteroidError, SimulationConfig};

const FRAMES: u64 = 500;

fn main() -> Result<(), AsteroidError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Same field as the defaults, with fewer asteroids so a debug build keeps up.
    let config = SimulationConfig::new(None, None, Some(20_000), None, None, None, Some(100), None);
    let mut field = AsteroidField::new(config)?;
    info!(
        "simulating {} asteroids in {:?}",
        field.asteroids().len(),
        field.domain()
    );

    let mut collisions = 0;
    let mut culled = 0;
    for _ in 0..FRAMES {
        let report = field.step()?;
        collisions += report.collisions.collisions.len();
        culled += report.culled;
    }

    info!(
        "{} frames: {} collisions resolved, {} asteroids left the field and were replaced",
        field.frames(),
        collisions,
        culled
    );
    Ok(())
}
