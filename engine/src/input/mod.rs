//! Input Module
//!
//! Platform-agnostic input for the simulation. Device polling and event
//! listeners belong to the host; the core only sees an [`InputIntent`]
//! value passed into each frame step.
//!
//! # Components
//!
//! - [`InputIntent`] - Directional, jump and pointer-drag intents for one frame
//! - [`KeyboardState`] - Owned key state a host feeds with key events
//!
//! # Example
//!
//! ```rust,ignore
//! use storm_valley_engine::input::InputIntent;
//!
//! let intent = InputIntent::new().with_forward().with_jump();
//! let outputs = world.step_frame(1.0 / 60.0, &intent);
//! ```

pub mod intent;
pub mod keyboard;

pub use intent::InputIntent;
pub use keyboard::{KeyCode, KeyboardState};
