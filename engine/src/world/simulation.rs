//! World simulation.
//!
//! [`World`] owns one generated terrain and every component placed on it,
//! plus the RNG and simulated clock. A frame runs the components in a
//! fixed order:
//!
//! 1. Rain (analytic surface)
//! 2. Lightning (ambient light for this frame)
//! 3. Water animation
//! 4. Player locomotion (rendered mesh)
//! 5. Follow camera
//!
//! Regeneration builds a complete replacement world and swaps it in with a
//! single assignment, so nothing ever pairs old components with new terrain.

use glam::DVec3;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::camera::{CameraView, FollowCamera};
use crate::input::InputIntent;
use crate::physics::sanitize_delta;
use crate::player::{Avatar, PlayerMovementController, PlayerState};
use crate::terrain::{HeightSource, Terrain};
use crate::weather::{LightningManager, LightningStrike, RainField, RainParticle};

use super::config::{ConfigError, WorldConfig};
use super::water::{WaterField, WaterTile};

/// Everything the renderer needs for one frame.
///
/// Slices borrow the world; drop the outputs before stepping again.
#[derive(Debug, Clone, Copy)]
pub struct FrameOutputs<'a> {
    /// Frames stepped so far, including this one
    pub frame: u64,
    /// Simulated seconds since generation
    pub time: f64,
    pub rain: &'a [RainParticle],
    pub strikes: &'a [LightningStrike],
    pub water: &'a [WaterTile],
    /// Player after this frame, edge flags included
    pub player: PlayerState,
    pub avatar: Avatar,
    pub camera: CameraView,
    /// Global brightening from lightning
    pub ambient_light: f64,
}

/// One generated world and its simulation state.
#[derive(Debug)]
pub struct World {
    seed: u64,
    config: WorldConfig,
    rng: SmallRng,
    terrain: Terrain,
    rain: RainField,
    lightning: LightningManager,
    water: WaterField,
    player: PlayerMovementController,
    camera: FollowCamera,
    ambient_light: f64,
    time: f64,
    frame: u64,
}

impl World {
    /// Generates a world after validating `config`.
    pub fn generate(seed: u64, config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(seed, config, Avatar::default()))
    }

    /// Generates a world with the default configuration.
    pub fn with_defaults(seed: u64) -> Self {
        Self::build(seed, WorldConfig::default(), Avatar::default())
    }

    fn build(seed: u64, config: WorldConfig, avatar: Avatar) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let terrain = Terrain::generate(seed, &config.terrain);
        let rain = RainField::new(config.rain, &terrain, &mut rng);
        let water = WaterField::place(config.water, &terrain, &mut rng);

        info!(
            "Generated world: seed {}, {} rain particles, {} water tiles",
            seed,
            rain.len(),
            water.len()
        );
        if avatar.is_placeholder() {
            warn!("Player model not available, using placeholder");
        }
        let mut player = PlayerMovementController::new(config.player);
        player.set_avatar(avatar);

        Self {
            seed,
            config,
            rng,
            terrain,
            rain,
            lightning: LightningManager::new(config.lightning),
            water,
            player,
            camera: FollowCamera::new(config.camera),
            ambient_light: 0.0,
            time: 0.0,
            frame: 0,
        }
    }

    /// Replaces the whole world with a fresh one from `seed`.
    ///
    /// The avatar carries over; everything else starts over.
    pub fn regenerate(&mut self, seed: u64) {
        *self = Self::build(seed, self.config, self.player.avatar());
    }

    /// Replaces the whole world using a new configuration.
    pub fn regenerate_with(&mut self, seed: u64, config: WorldConfig) -> Result<(), ConfigError> {
        config.validate()?;
        *self = Self::build(seed, config, self.player.avatar());
        Ok(())
    }

    /// Advances every component by one frame.
    ///
    /// `delta` is the measured frame time in seconds. Non-finite or
    /// negative deltas step nothing time-based; long frames are capped.
    pub fn step_frame(&mut self, delta: f64, intent: &InputIntent) -> FrameOutputs<'_> {
        let dt = sanitize_delta(delta, self.config.player.max_delta);
        self.time += dt;
        self.frame += 1;

        self.rain.update(self.terrain.surface(), &mut self.rng);
        self.ambient_light = self.lightning.update(dt, &mut self.rng);
        self.water.update(self.time);
        self.player.update(intent, dt, self.time, self.terrain.mesh());
        self.camera.update(self.player.state(), self.time, intent.pointer_drag_active);

        let player = *self.player.state();
        self.player.end_frame();

        FrameOutputs {
            frame: self.frame,
            time: self.time,
            rain: self.rain.particles(),
            strikes: self.lightning.strikes(),
            water: self.water.tiles(),
            player,
            avatar: self.player.avatar(),
            camera: self.camera.view(),
            ambient_light: self.ambient_light,
        }
    }

    /// Terrain elevation under `(x, z)` on the rendered mesh, `None`
    /// outside the terrain footprint.
    pub fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        self.terrain.height_at(x, z)
    }

    /// Where a character standing at `(x, z)` puts its feet.
    pub fn ground_height(&self, x: f64, z: f64) -> f64 {
        self.config
            .player
            .ground_query()
            .resolve(&self.terrain, x, z)
    }

    /// Swaps the drawn player avatar. Locomotion is unaffected.
    pub fn set_avatar(&mut self, avatar: Avatar) {
        if avatar.is_placeholder() {
            warn!("Player model not available, using placeholder");
        }
        self.player.set_avatar(avatar);
    }

    /// Teleports the player, e.g. for a scripted spawn.
    pub fn place_player(&mut self, position: DVec3, grounded: bool) {
        let state = if grounded {
            PlayerState::grounded_at(position)
        } else {
            PlayerState::spawn_at(position)
        };
        let avatar = self.player.avatar();
        self.player = PlayerMovementController::with_state(self.config.player, state);
        self.player.set_avatar(avatar);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn rain(&self) -> &RainField {
        &self.rain
    }

    pub fn lightning(&self) -> &LightningManager {
        &self.lightning
    }

    pub fn water(&self) -> &WaterField {
        &self.water
    }

    pub fn player(&self) -> &PlayerState {
        self.player.state()
    }

    pub fn avatar(&self) -> Avatar {
        self.player.avatar()
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn ambient_light(&self) -> f64 {
        self.ambient_light
    }

    /// Simulated seconds since generation.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
