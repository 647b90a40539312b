//! World Module
//!
//! Ties the terrain, weather, water, player and camera together into one
//! frame-stepped simulation.
//!
//! # Components
//!
//! - [`World`] - Owns one generated world; `step_frame`, `regenerate`, `height_at`
//! - [`WorldConfig`] - Per-component configuration, loadable from JSON
//! - [`WaterField`] - Valley water tiles placed by elevation percentile
//! - [`SampleGrid`] - Regular cell-centre grid used for water sampling

pub mod config;
pub mod grid;
pub mod simulation;
pub mod water;

pub use config::{ConfigError, WorldConfig};
pub use grid::SampleGrid;
pub use simulation::{FrameOutputs, World};
pub use water::{WaterConfig, WaterField, WaterTile, percentile_threshold};
