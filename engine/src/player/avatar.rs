//! Player avatar description.
//!
//! The host loads the player model asynchronously; until (or unless) it
//! arrives the player is a placeholder box. Physics never depends on which
//! one is shown.

use glam::DVec3;

/// Uniform scale applied to a loaded player model.
pub const MODEL_SCALE: f64 = 1.5;

/// What the renderer should draw for the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Avatar {
    /// A loaded model drawn at `scale`
    Model { scale: f64 },
    /// Box drawn when no model is available
    Placeholder { half_extents: DVec3 },
}

impl Default for Avatar {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl Avatar {
    /// The 2 x 4 x 2 stand-in box.
    pub fn placeholder() -> Self {
        Self::Placeholder {
            half_extents: DVec3::new(1.0, 2.0, 1.0),
        }
    }

    /// A loaded model at the standard scale.
    pub fn model() -> Self {
        Self::Model { scale: MODEL_SCALE }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}
