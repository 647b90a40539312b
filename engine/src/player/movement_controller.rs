//! Player Movement Controller
//!
//! Tank-style locomotion over a height field: turn intents ease the yaw
//! toward a target, forward walks along the facing, backward turns the
//! player around while creeping forward. Gravity, ground snapping and
//! jumping run on the frame delta; walking does not.
//!
//! # Frame Order
//!
//! 1. Turning (target yaw set by intents, eased each frame)
//! 2. Walking (fixed per-frame offset along the facing)
//! 3. Gravity and vertical integration
//! 4. Ground collision (snap, step-down, landing edge)
//! 5. Jump (only from the ground, after collision)
//! 6. Head-bob (cosmetic, never read back by physics)
//!
//! # Usage
//!
//! ```rust,ignore
//! use storm_valley_engine::player::PlayerMovementController;
//!
//! let mut controller = PlayerMovementController::new(PlayerPhysics::default());
//!
//! // Each frame:
//! let state = controller.update(&intent, delta_time, elapsed, terrain.mesh());
//! draw_player(state.render_position(), state.yaw);
//! controller.end_frame();
//! ```

use std::f64::consts::PI;

use glam::DVec3;
use log::debug;

use crate::input::InputIntent;
use crate::physics::{lerp, sanitize_delta};
use crate::terrain::HeightSource;

use super::avatar::Avatar;
use super::physics::PlayerPhysics;

/// Everything the renderer and camera need to know about the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Physics position (feet, including the ground stand-off)
    pub position: DVec3,
    /// Facing angle around +Y, radians. Yaw 0 faces +Z.
    pub yaw: f64,
    /// Pending turn destination, cleared once reached
    pub target_yaw: Option<f64>,
    /// Units per second, positive = up
    pub vertical_velocity: f64,
    pub is_grounded: bool,
    /// Set on the frame a jump starts
    pub just_jumped: bool,
    /// Set on the frame the player touches down
    pub just_landed: bool,
    /// Cosmetic vertical offset added on top of `position`
    pub bob_offset: f64,
}

impl PlayerState {
    /// Airborne at rest at `position`.
    pub fn spawn_at(position: DVec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            target_yaw: None,
            vertical_velocity: 0.0,
            is_grounded: false,
            just_jumped: false,
            just_landed: false,
            bob_offset: 0.0,
        }
    }

    /// Standing still on the ground at `position`.
    pub fn grounded_at(position: DVec3) -> Self {
        Self {
            is_grounded: true,
            ..Self::spawn_at(position)
        }
    }

    /// Horizontal unit vector the player walks along.
    pub fn forward(&self) -> DVec3 {
        DVec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// Position to draw the avatar at.
    pub fn render_position(&self) -> DVec3 {
        self.position + DVec3::Y * self.bob_offset
    }

    /// Clears the one-frame edge flags.
    pub fn end_frame(&mut self) {
        self.just_jumped = false;
        self.just_landed = false;
    }
}

/// Owns the player state and advances it one frame at a time.
#[derive(Debug, Clone)]
pub struct PlayerMovementController {
    state: PlayerState,
    physics: PlayerPhysics,
    avatar: Avatar,
}

impl Default for PlayerMovementController {
    fn default() -> Self {
        Self::new(PlayerPhysics::default())
    }
}

impl PlayerMovementController {
    /// Spawns a player at the configured spawn position with a placeholder avatar.
    pub fn new(physics: PlayerPhysics) -> Self {
        Self::with_state(physics, PlayerState::spawn_at(physics.spawn_position))
    }

    /// Starts from an explicit state.
    pub fn with_state(physics: PlayerPhysics, state: PlayerState) -> Self {
        Self {
            state,
            physics,
            avatar: Avatar::default(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn physics(&self) -> &PlayerPhysics {
        &self.physics
    }

    pub fn avatar(&self) -> Avatar {
        self.avatar
    }

    /// Swaps the drawn avatar. Physics state is untouched.
    pub fn set_avatar(&mut self, avatar: Avatar) {
        self.avatar = avatar;
    }

    /// Clears the one-frame edge flags after the frame has been consumed.
    pub fn end_frame(&mut self) {
        self.state.end_frame();
    }

    /// Advances the player one frame.
    ///
    /// # Arguments
    /// * `intent` - Directional and jump intents for this frame
    /// * `delta_time` - Frame delta in seconds (sanitized and capped)
    /// * `elapsed` - Simulated time since start, drives the head-bob
    /// * `ground` - Height source the feet are placed on
    pub fn update(
        &mut self,
        intent: &InputIntent,
        delta_time: f64,
        elapsed: f64,
        ground: &(impl HeightSource + ?Sized),
    ) -> &PlayerState {
        let dt = sanitize_delta(delta_time, self.physics.max_delta);
        let was_grounded = self.state.is_grounded;

        self.update_turning(intent);
        self.update_walking(intent);
        self.update_vertical(dt, ground, was_grounded);
        self.update_jump(intent);
        self.update_head_bob(intent, elapsed);

        &self.state
    }

    fn update_turning(&mut self, intent: &InputIntent) {
        let s = &mut self.state;

        if intent.turn_left {
            s.target_yaw = Some(s.yaw + self.physics.turn_step);
        }
        if intent.turn_right {
            s.target_yaw = Some(s.yaw - self.physics.turn_step);
        }

        if let Some(target) = s.target_yaw {
            s.yaw = lerp(s.yaw, target, self.physics.turn_lerp);
            if (s.yaw - target).abs() < self.physics.turn_snap {
                s.yaw = target;
                s.target_yaw = None;
            }
        }
    }

    fn update_walking(&mut self, intent: &InputIntent) {
        let forward = self.state.forward();

        if intent.forward {
            self.state.position += forward * self.physics.walk_offset(false);
        }

        // Backing off turns the player around instead of strafing
        if intent.backward {
            if self.state.target_yaw.is_none() {
                self.state.target_yaw = Some(self.state.yaw + PI);
            }
            self.state.position += forward * self.physics.walk_offset(true);
        }
    }

    fn update_vertical(
        &mut self,
        dt: f64,
        ground: &(impl HeightSource + ?Sized),
        was_grounded: bool,
    ) {
        let s = &mut self.state;
        // A paused frame keeps whatever jump or fall is in flight
        if dt == 0.0 && !was_grounded && s.position.y.is_finite() {
            return;
        }

        let start_y = s.position.y;
        s.vertical_velocity = self.physics.apply_gravity(s.vertical_velocity, dt);
        s.position.y += s.vertical_velocity * dt;

        let ground_height = self
            .physics
            .ground_query()
            .resolve(ground, s.position.x, s.position.z);

        // Walking downhill: stay on the ground while the drop fits in one step
        let stepped_down = was_grounded
            && s.vertical_velocity <= 0.0
            && start_y - ground_height <= self.physics.step_down;

        if !s.position.y.is_finite() || s.position.y <= ground_height || stepped_down {
            s.position.y = ground_height;
            s.vertical_velocity = 0.0;
            s.is_grounded = true;
            if !was_grounded {
                s.just_landed = true;
                debug!(
                    "Player landed at ({:.2}, {:.2}, {:.2})",
                    s.position.x, s.position.y, s.position.z
                );
            }
        } else {
            s.is_grounded = false;
        }
    }

    fn update_jump(&mut self, intent: &InputIntent) {
        if intent.jump && self.state.is_grounded {
            self.state.vertical_velocity = self.physics.jump_velocity;
            self.state.is_grounded = false;
            self.state.just_jumped = true;
        }
    }

    fn update_head_bob(&mut self, intent: &InputIntent, elapsed: f64) {
        self.state.bob_offset = if self.state.is_grounded && intent.any_direction() {
            self.physics.head_bob(elapsed)
        } else {
            0.0
        };
    }
}
