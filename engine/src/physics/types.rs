//! Physics type re-exports from glam
//!
//! The simulation runs in double precision throughout; everything uses the
//! f64 vector type.

pub use glam::DVec3;
