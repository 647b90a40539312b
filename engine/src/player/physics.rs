//! Player physics constants and configuration.
//!
//! This module defines the physics parameters for player locomotion:
//! walking, turning, gravity, jumping, ground placement and head-bob.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::physics::DEFAULT_MAX_DELTA;
use crate::terrain::{CHARACTER_FALLBACK, CHARACTER_STANDOFF, HeightQuery};

/// Physics constants for player character locomotion.
///
/// All values are configurable via struct fields, and every field falls
/// back to its default when missing from a config document.
///
/// # Example
///
/// ```ignore
/// use storm_valley_engine::player::PlayerPhysics;
///
/// // Floatier jumps
/// let moon = PlayerPhysics {
///     gravity: -5.0,
///     ..PlayerPhysics::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerPhysics {
    /// Forward offset per frame while walking, in units.
    /// Applied directly, not scaled by the frame delta.
    pub move_speed: f64,

    /// Fraction of `move_speed` used while backing off.
    pub reverse_speed_factor: f64,

    /// Yaw added to (or removed from) the current yaw by a turn intent, radians.
    pub turn_step: f64,

    /// Per-frame easing factor from current yaw toward the target yaw.
    pub turn_lerp: f64,

    /// The target yaw is reached (and cleared) within this many radians.
    pub turn_snap: f64,

    /// Vertical acceleration in units per second squared (negative = down).
    pub gravity: f64,

    /// Lowest vertical velocity gravity can reach, units per second.
    pub terminal_velocity: f64,

    /// Vertical velocity set by a jump, units per second.
    pub jump_velocity: f64,

    /// Feet rest this far above the sampled ground.
    pub ground_standoff: f64,

    /// Ground height where the terrain cannot be sampled.
    pub fallback_ground: f64,

    /// A grounded player follows the ground down drops up to this tall
    /// instead of going airborne.
    pub step_down: f64,

    /// Head-bob amplitude while walking on the ground.
    pub bob_amplitude: f64,

    /// Head-bob angular frequency in radians per second.
    pub bob_frequency: f64,

    /// Longest frame delta integrated in one step, seconds.
    pub max_delta: f64,

    /// Where a fresh player appears (airborne; it drops onto the ground).
    pub spawn_position: DVec3,
}

impl Default for PlayerPhysics {
    fn default() -> Self {
        Self {
            move_speed: 0.3,
            reverse_speed_factor: 0.6,
            turn_step: 0.5,
            turn_lerp: 0.15,
            turn_snap: 0.01,
            gravity: -30.0,
            terminal_velocity: -80.0,
            jump_velocity: 8.0,
            ground_standoff: CHARACTER_STANDOFF,
            fallback_ground: CHARACTER_FALLBACK,
            step_down: 0.5,
            bob_amplitude: 0.03,
            bob_frequency: 8.0,
            max_delta: DEFAULT_MAX_DELTA,
            spawn_position: DVec3::new(0.0, 3.0, 0.0),
        }
    }
}

impl PlayerPhysics {
    /// Creates a new PlayerPhysics with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the walking offset for this frame.
    pub fn walk_offset(&self, reversing: bool) -> f64 {
        if reversing {
            self.move_speed * self.reverse_speed_factor
        } else {
            self.move_speed
        }
    }

    /// Calculates new vertical velocity after applying gravity.
    ///
    /// # Arguments
    /// * `vertical_velocity` - Current vertical velocity (positive = up)
    /// * `delta_time` - Time elapsed since last frame in seconds
    ///
    /// # Returns
    /// The new vertical velocity, never below the terminal velocity.
    pub fn apply_gravity(&self, vertical_velocity: f64, delta_time: f64) -> f64 {
        (vertical_velocity + self.gravity * delta_time).max(self.terminal_velocity)
    }

    /// Ground query for foot placement.
    pub fn ground_query(&self) -> HeightQuery {
        HeightQuery::new(self.ground_standoff, self.fallback_ground)
    }

    /// Cosmetic vertical offset at `elapsed` seconds.
    pub fn head_bob(&self, elapsed: f64) -> f64 {
        (elapsed * self.bob_frequency).sin() * self.bob_amplitude
    }
}
