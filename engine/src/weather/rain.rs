//! Rain Particle Field
//!
//! A fixed-size pool of independent falling drops. Drops are never created
//! or destroyed after the pool is filled: a drop that falls below the lower
//! bound re-rolls a new column, and either starts falling again above the
//! terrain there or is parked out of view until its next re-roll.
//!
//! Respawn probability is `spawn_chance × elevation_bias`, so rain gathers
//! over low ground and thins out toward the peaks.

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::terrain::{HeightQuery, HeightSource, Terrain, TerrainId};

/// Rain field parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Pool size, fixed for the life of the field
    pub particle_count: usize,
    /// Spawn columns are drawn from `[-half_extent, half_extent]²`
    pub half_extent: f64,
    /// Respawn probability on the lowest ground
    pub spawn_chance: f64,
    /// Elevation at which the bias reaches zero
    pub bias_ceiling: f64,
    /// Fall speed range in units per frame
    pub min_fall_speed: f64,
    pub max_fall_speed: f64,
    /// Height above the ground at which respawned drops appear
    pub min_respawn_height: f64,
    pub max_respawn_height: f64,
    /// Height above the ground for the first fill, spread out so the field
    /// does not start as a single sheet
    pub min_initial_height: f64,
    pub max_initial_height: f64,
    /// Drops below this height re-roll
    pub lower_bound: f64,
    /// Where parked drops wait, well below the lower bound
    pub parked_height: f64,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            particle_count: 15_000,
            half_extent: 200.0,
            spawn_chance: 0.6,
            bias_ceiling: 8.0,
            min_fall_speed: 0.2,
            max_fall_speed: 0.6,
            min_respawn_height: 20.0,
            max_respawn_height: 70.0,
            min_initial_height: 50.0,
            max_initial_height: 250.0,
            lower_bound: 0.0,
            parked_height: -1000.0,
        }
    }
}

/// One drop in the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainParticle {
    pub position: DVec3,
    /// Per-frame vertical offset, always negative, fixed at creation
    pub vertical_velocity: f64,
    /// False while parked
    pub active: bool,
}

/// Weight in `[0, 1]` favouring low ground: 1 at or below elevation 0,
/// 0 at or above `ceiling`.
pub fn elevation_bias(elevation: f64, ceiling: f64) -> f64 {
    if !elevation.is_finite() || ceiling <= 0.0 {
        return 0.0;
    }
    (1.0 - elevation / ceiling).clamp(0.0, 1.0)
}

/// The rain pool.
#[derive(Debug, Clone)]
pub struct RainField {
    particles: Vec<RainParticle>,
    config: RainConfig,
    terrain_id: Option<TerrainId>,
}

impl RainField {
    /// Fill the pool over a generated terrain, using its analytic surface.
    pub fn new(config: RainConfig, terrain: &Terrain, rng: &mut impl Rng) -> Self {
        let mut field = Self::with_source(config, terrain.surface(), rng);
        field.terrain_id = Some(terrain.id());
        field
    }

    /// Fill the pool over an arbitrary height source.
    pub fn with_source(
        config: RainConfig,
        source: &(impl HeightSource + ?Sized),
        rng: &mut impl Rng,
    ) -> Self {
        let band = (config.min_initial_height, config.max_initial_height);
        let particles = (0..config.particle_count)
            .map(|_| {
                let mut particle = RainParticle {
                    position: DVec3::ZERO,
                    vertical_velocity: -rng
                        .random_range(config.min_fall_speed..=config.max_fall_speed),
                    active: false,
                };
                reroll(&mut particle, &config, source, band, rng);
                particle
            })
            .collect();

        Self {
            particles,
            config,
            terrain_id: None,
        }
    }

    /// Advance every drop by one frame.
    pub fn update(&mut self, source: &(impl HeightSource + ?Sized), rng: &mut impl Rng) {
        let band = (self.config.min_respawn_height, self.config.max_respawn_height);
        for particle in &mut self.particles {
            if particle.active {
                particle.position.y -= particle.vertical_velocity.abs();
            }
            if particle.position.y < self.config.lower_bound {
                reroll(particle, &self.config, source, band, rng);
            }
        }
    }

    pub fn particles(&self) -> &[RainParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drops currently falling.
    pub fn visible_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    /// Terrain the field was filled against, if built from one.
    pub fn terrain_id(&self) -> Option<TerrainId> {
        self.terrain_id
    }
}

/// Pick a new column for `particle` and decide whether it falls or parks.
fn reroll(
    particle: &mut RainParticle,
    config: &RainConfig,
    source: &(impl HeightSource + ?Sized),
    height_band: (f64, f64),
    rng: &mut impl Rng,
) {
    let extent = config.half_extent;
    let x = rng.random_range(-extent..=extent);
    let z = rng.random_range(-extent..=extent);

    let ground = HeightQuery::particle().resolve(source, x, z);
    let chance = config.spawn_chance * elevation_bias(ground, config.bias_ceiling);

    if rng.random_bool(chance) {
        let lift = rng.random_range(height_band.0..=height_band.1);
        particle.position = DVec3::new(x, ground + lift, z);
        particle.active = true;
    } else {
        particle.position = DVec3::new(x, config.parked_height, z);
        particle.active = false;
    }
}
