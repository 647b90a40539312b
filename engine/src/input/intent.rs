//! Input Intent
//!
//! The only input the simulation consumes: a per-frame snapshot of what the
//! player wants to do, already derived from whatever devices the host reads.

/// Directional, jump and camera-drag intent for one frame.
///
/// Turning is expressed as intent to rotate, not as a strafe: `turn_left`
/// and `turn_right` set a target yaw that the player eases toward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    /// Walk along the facing direction
    pub forward: bool,
    /// Turn around and back off slowly
    pub backward: bool,
    /// Rotate counter-clockwise (seen from above)
    pub turn_left: bool,
    /// Rotate clockwise (seen from above)
    pub turn_right: bool,
    /// Jump when grounded
    pub jump: bool,
    /// A pointer drag is orbiting the camera manually
    pub pointer_drag_active: bool,
}

impl InputIntent {
    /// No intent at all.
    pub const IDLE: Self = Self {
        forward: false,
        backward: false,
        turn_left: false,
        turn_right: false,
        jump: false,
        pointer_drag_active: false,
    };

    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any of the four directional intents is set.
    pub fn any_direction(&self) -> bool {
        self.forward || self.backward || self.turn_left || self.turn_right
    }

    /// Builder: walk forward.
    pub fn with_forward(mut self) -> Self {
        self.forward = true;
        self
    }

    /// Builder: back off.
    pub fn with_backward(mut self) -> Self {
        self.backward = true;
        self
    }

    /// Builder: turn left.
    pub fn with_turn_left(mut self) -> Self {
        self.turn_left = true;
        self
    }

    /// Builder: turn right.
    pub fn with_turn_right(mut self) -> Self {
        self.turn_right = true;
        self
    }

    /// Builder: jump.
    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    /// Builder: pointer drag in progress.
    pub fn with_pointer_drag(mut self) -> Self {
        self.pointer_drag_active = true;
        self
    }
}
