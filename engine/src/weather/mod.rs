//! Weather Module
//!
//! Rain and lightning. Both are decorative: no failure modes, no coupling to
//! the player beyond sharing the terrain coordinate space.
//!
//! - [`RainField`] - Fixed pool of falling drops, biased toward valleys
//! - [`LightningManager`] - Bounded pool of timed flashes plus ambient boost

pub mod lightning;
pub mod rain;

pub use lightning::{
    LightningConfig, LightningManager, LightningStrike, StrikeState, intensity_envelope,
};
pub use rain::{RainConfig, RainField, RainParticle, elevation_bias};
