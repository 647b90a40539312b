//! Player Module
//!
//! Provides player character locomotion over the terrain.
//!
//! # Components
//!
//! - [`PlayerMovementController`] - Per-frame turning, walking, gravity and jumping
//!   - Feet follow the rendered terrain mesh with a small stand-off
//!   - One-frame `just_jumped` / `just_landed` edges for animation hooks
//! - [`PlayerState`] - Snapshot handed to the camera and renderer
//! - [`PlayerPhysics`] - Tunable locomotion constants
//! - [`Avatar`] - Loaded model or placeholder box

pub mod avatar;
pub mod movement_controller;
pub mod physics;

pub use avatar::{Avatar, MODEL_SCALE};
pub use movement_controller::{PlayerMovementController, PlayerState};
pub use physics::PlayerPhysics;
