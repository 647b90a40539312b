//! Camera Controller Module
//!
//! Third-person follow camera that trails the player from behind and above.
//! The host may hand the camera to a manual orbit control (pointer drag);
//! following is suppressed while the drag lasts and for a short grace
//! window afterwards, then resumes on its own.
//!
//! This is window-system agnostic - it only manages camera state and transformations.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::player::PlayerState;

/// Follow camera tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowConfig {
    /// Horizontal distance behind the player
    pub behind_distance: f64,
    /// Height above the player
    pub height_offset: f64,
    /// Per-frame easing factor toward the desired position
    pub position_lerp: f64,
    /// The camera looks this far ahead of the player
    pub look_ahead: f64,
    /// Seconds of simulated time following stays off after a drag ends
    pub manual_override_secs: f64,
    /// Camera position before the first frame
    pub initial_position: DVec3,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            behind_distance: 18.0,
            height_offset: 14.0,
            position_lerp: 0.08,
            look_ahead: 3.0,
            manual_override_secs: 0.7,
            initial_position: DVec3::new(0.0, 20.0, 40.0),
        }
    }
}

/// Camera transform handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: DVec3,
    pub look_target: DVec3,
    pub orbit_target: DVec3,
    /// Following suppressed by manual control
    pub manual: bool,
}

/// Camera that follows the player unless manual control is active.
///
/// `position` and `look_target` define the view. `orbit_target` is the
/// pivot a manual orbit control should rotate around; it stays on the
/// player even while following is suppressed.
#[derive(Debug, Clone)]
pub struct FollowCamera {
    /// Camera position in world space
    pub position: DVec3,
    /// Point the camera looks at
    pub look_target: DVec3,
    /// Pivot for manual orbiting
    pub orbit_target: DVec3,
    config: FollowConfig,
    /// Simulated time of the last frame a drag was reported
    last_drag: Option<f64>,
    manual: bool,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(FollowConfig::default())
    }
}

impl FollowCamera {
    pub fn new(config: FollowConfig) -> Self {
        Self {
            position: config.initial_position,
            look_target: DVec3::ZERO,
            orbit_target: DVec3::ZERO,
            config,
            last_drag: None,
            manual: false,
        }
    }

    pub fn config(&self) -> &FollowConfig {
        &self.config
    }

    /// Whether following was suppressed on the last update.
    pub fn is_manual(&self) -> bool {
        self.manual
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.position,
            look_target: self.look_target,
            orbit_target: self.orbit_target,
            manual: self.manual,
        }
    }

    /// Where the camera wants to be for this player state.
    pub fn desired_position(&self, player: &PlayerState) -> DVec3 {
        player.position - player.forward() * self.config.behind_distance
            + DVec3::Y * self.config.height_offset
    }

    /// Advances the camera one frame.
    ///
    /// # Arguments
    /// * `player` - Player state after this frame's locomotion
    /// * `now` - Simulated time in seconds
    /// * `drag_active` - Whether the host reports a pointer drag this frame
    pub fn update(&mut self, player: &PlayerState, now: f64, drag_active: bool) {
        if drag_active {
            self.last_drag = Some(now);
        }
        self.manual = self
            .last_drag
            .is_some_and(|t| now - t < self.config.manual_override_secs);

        self.orbit_target = player.position;
        self.look_target = player.position + player.forward() * self.config.look_ahead;

        if !self.manual {
            let desired = self.desired_position(player);
            self.position = self.position.lerp(desired, self.config.position_lerp);
        }
    }
}
