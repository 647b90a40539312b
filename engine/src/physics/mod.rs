//! Physics module
//!
//! Shared numeric plumbing for the per-frame integrators. There is no
//! rigid-body solver here: the only collider in the world is the terrain
//! heightfield, answered by [`crate::terrain::HeightSource`].
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, time in seconds.
//!
//! - Vertical velocities in m/s
//! - Accelerations in m/s²
//! - Walking offsets in units per frame (not scaled by delta)
//!
//! # Submodules
//!
//! - [`types`] - f64 vector type re-exported from glam
//! - [`step`] - Delta sanitising and interpolation helpers

pub mod step;
pub mod types;

pub use step::{DEFAULT_MAX_DELTA, lerp, sanitize_delta};
pub use types::DVec3;
