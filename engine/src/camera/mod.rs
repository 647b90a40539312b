//! Camera Module
//!
//! Provides the third-person follow camera.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod controller;

pub use controller::{CameraView, FollowCamera, FollowConfig};
