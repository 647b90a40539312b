//! Storm Valley Engine Library
//!
//! A terrain-aware storm simulation: a procedurally generated valley with
//! rain, lightning, pooled water and a walking player followed by a camera.
//! Everything here is pure frame-stepped state; rendering, windowing and
//! input devices belong to the host.
//!
//! # Modules
//!
//! - [`terrain`] - Noise height surface, rendered mesh and height queries
//! - [`weather`] - Rain particle field and lightning strikes
//! - [`world`] - Water placement, configuration and the [`World`] frame driver
//! - [`player`] - Player locomotion, physics constants and avatar
//! - [`camera`] - Third-person follow camera with manual override
//! - [`input`] - Per-frame input intents
//! - [`physics`] - Shared math types and frame-step helpers
//!
//! # Example
//!
//! ```ignore
//! use storm_valley_engine::{InputIntent, World};
//!
//! let mut world = World::with_defaults(42);
//!
//! // Each frame:
//! let intent = InputIntent::new().with_forward();
//! let frame = world.step_frame(delta_time, &intent);
//! draw_rain(frame.rain);
//! draw_player(frame.player.render_position(), frame.player.yaw);
//! set_ambient(frame.ambient_light);
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod player;
pub mod terrain;
pub mod weather;
pub mod world;

pub use input::InputIntent;
pub use world::{ConfigError, FrameOutputs, World, WorldConfig};
