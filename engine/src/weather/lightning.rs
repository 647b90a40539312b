//! Lightning Strike Manager
//!
//! A bounded pool of transient flashes. Each strike follows a triangular
//! intensity envelope over its lifetime (fast attack, slower decay) and is
//! dropped from the pool once its age reaches its duration.
//!
//! The manager also folds the live strikes into one ambient brightening
//! value: the *strongest* current flash scaled by `ambient_scale`, never a
//! sum, so overlapping bolts cannot blow out the scene.
//!
//! # Strike lifecycle
//!
//! ```text
//! Pending --activate--> Active --age >= duration--> Expired (removed)
//! ```

use glam::DVec3;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lightning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightningConfig {
    /// Maximum concurrent strikes
    pub max_bolts: usize,
    /// Chance per frame of a new strike while below the cap
    pub spawn_probability: f64,
    /// Strikes are placed within `[-half_extent, half_extent]²`
    pub half_extent: f64,
    pub min_height: f64,
    pub max_height: f64,
    /// Strike lifetime range in seconds
    pub min_duration: f64,
    pub max_duration: f64,
    pub min_peak_intensity: f64,
    pub max_peak_intensity: f64,
    /// Fraction of the lifetime spent fading in
    pub attack_fraction: f64,
    /// Ambient brightening per unit of the strongest opacity
    pub ambient_scale: f64,
    /// Fixed aging step per frame; `None` ages by the measured frame delta
    pub fixed_step: Option<f64>,
}

impl Default for LightningConfig {
    fn default() -> Self {
        Self {
            max_bolts: 2,
            spawn_probability: 0.003,
            half_extent: 200.0,
            min_height: 200.0,
            max_height: 300.0,
            min_duration: 0.2,
            max_duration: 0.3,
            min_peak_intensity: 5.0,
            max_peak_intensity: 20.0,
            attack_fraction: 0.3,
            ambient_scale: 0.8,
            fixed_step: Some(0.016),
        }
    }
}

/// Lifecycle state of a strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrikeState {
    #[default]
    Pending,
    Active,
    Expired,
}

/// Normalised opacity for a strike at `progress = age / duration`.
///
/// Rises linearly to 1 at `attack`, falls linearly to 0 at 1. Clamped to
/// `[0, 1]` outside that window.
pub fn intensity_envelope(progress: f64, attack: f64) -> f64 {
    let opacity = if progress < attack {
        progress / attack
    } else {
        1.0 - (progress - attack) / (1.0 - attack)
    };
    opacity.clamp(0.0, 1.0)
}

/// One lightning flash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightningStrike {
    pub position: DVec3,
    /// Seconds since activation
    pub age: f64,
    /// Lifetime in seconds
    pub duration: f64,
    /// Light intensity at the top of the envelope
    pub peak_intensity: f64,
    pub state: StrikeState,
    attack_fraction: f64,
}

impl LightningStrike {
    /// A pending strike with the default 30% attack.
    pub fn new(position: DVec3, duration: f64, peak_intensity: f64) -> Self {
        Self::with_attack(position, duration, peak_intensity, 0.3)
    }

    pub fn with_attack(
        position: DVec3,
        duration: f64,
        peak_intensity: f64,
        attack_fraction: f64,
    ) -> Self {
        Self {
            position,
            age: 0.0,
            duration,
            peak_intensity,
            state: StrikeState::Pending,
            attack_fraction,
        }
    }

    /// Pending -> Active. No effect in any other state.
    pub fn activate(&mut self) {
        if self.state == StrikeState::Pending {
            self.state = StrikeState::Active;
        }
    }

    /// Age an active strike; it expires once `age >= duration`.
    pub fn advance(&mut self, step: f64) {
        if self.state != StrikeState::Active {
            return;
        }
        self.age += step;
        if self.age >= self.duration {
            self.state = StrikeState::Expired;
        }
    }

    /// `age / duration`, 1 for degenerate durations.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            self.age / self.duration
        } else {
            1.0
        }
    }

    /// Current opacity in `[0, 1]`; zero unless active.
    pub fn opacity(&self) -> f64 {
        match self.state {
            StrikeState::Active => intensity_envelope(self.progress(), self.attack_fraction),
            StrikeState::Pending | StrikeState::Expired => 0.0,
        }
    }

    /// Emitted light intensity.
    pub fn intensity(&self) -> f64 {
        self.peak_intensity * self.opacity()
    }

    pub fn is_active(&self) -> bool {
        self.state == StrikeState::Active
    }
}

/// Owns the live strikes and the ambient value they produce.
#[derive(Debug, Clone)]
pub struct LightningManager {
    strikes: Vec<LightningStrike>,
    config: LightningConfig,
    ambient: f64,
}

impl LightningManager {
    pub fn new(config: LightningConfig) -> Self {
        Self {
            strikes: Vec::with_capacity(config.max_bolts),
            config,
            ambient: 0.0,
        }
    }

    /// Advance all strikes by one frame, drop expired ones, maybe spawn a new
    /// one, and return the ambient brightening for the frame.
    ///
    /// `delta` is only used when no fixed aging step is configured.
    pub fn update(&mut self, delta: f64, rng: &mut impl Rng) -> f64 {
        let step = self.config.fixed_step.unwrap_or(delta);
        for strike in &mut self.strikes {
            strike.advance(step);
        }

        let before = self.strikes.len();
        self.strikes.retain(|s| s.state != StrikeState::Expired);
        if self.strikes.len() < before {
            debug!("lightning: {} strike(s) expired", before - self.strikes.len());
        }

        self.ambient = self.ambient_for_strikes();

        if self.strikes.len() < self.config.max_bolts
            && rng.random_bool(self.config.spawn_probability)
        {
            let strike = self.roll_strike(rng);
            debug!(
                "lightning: strike at ({:.1}, {:.1}, {:.1}) for {:.3}s peak {:.1}",
                strike.position.x,
                strike.position.y,
                strike.position.z,
                strike.duration,
                strike.peak_intensity
            );
            self.trigger(strike);
        }

        self.ambient
    }

    /// Activate `strike` and add it to the pool. Returns false at the cap.
    pub fn trigger(&mut self, mut strike: LightningStrike) -> bool {
        if self.strikes.len() >= self.config.max_bolts {
            return false;
        }
        strike.activate();
        self.strikes.push(strike);
        true
    }

    fn roll_strike(&self, rng: &mut impl Rng) -> LightningStrike {
        let c = &self.config;
        let position = DVec3::new(
            rng.random_range(-c.half_extent..=c.half_extent),
            rng.random_range(c.min_height..=c.max_height),
            rng.random_range(-c.half_extent..=c.half_extent),
        );
        LightningStrike::with_attack(
            position,
            rng.random_range(c.min_duration..=c.max_duration),
            rng.random_range(c.min_peak_intensity..=c.max_peak_intensity),
            c.attack_fraction,
        )
    }

    fn ambient_for_strikes(&self) -> f64 {
        let strongest = self
            .strikes
            .iter()
            .map(LightningStrike::opacity)
            .fold(0.0, f64::max);
        self.config.ambient_scale * strongest
    }

    pub fn strikes(&self) -> &[LightningStrike] {
        &self.strikes
    }

    pub fn active_count(&self) -> usize {
        self.strikes.len()
    }

    /// Ambient brightening computed by the last update.
    pub fn ambient(&self) -> f64 {
        self.ambient
    }

    pub fn config(&self) -> &LightningConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn quiet_config() -> LightningConfig {
        LightningConfig {
            spawn_probability: 0.0,
            ..LightningConfig::default()
        }
    }

    #[test]
    fn test_envelope_shape() {
        assert_eq!(intensity_envelope(0.0, 0.3), 0.0);
        assert!((intensity_envelope(0.15, 0.3) - 0.5).abs() < 1e-12);
        assert!((intensity_envelope(0.3, 0.3) - 1.0).abs() < 1e-12);
        assert!((intensity_envelope(0.65, 0.3) - 0.5).abs() < 1e-12);
        assert!(intensity_envelope(1.0, 0.3).abs() < 1e-12);
        assert_eq!(intensity_envelope(1.5, 0.3), 0.0);
    }

    #[test]
    fn test_strike_state_machine() {
        let mut strike = LightningStrike::new(DVec3::ZERO, 0.25, 10.0);
        assert_eq!(strike.state, StrikeState::Pending);

        // Pending strikes do not age
        strike.advance(0.125);
        assert_eq!(strike.age, 0.0);

        strike.activate();
        assert!(strike.is_active());
        strike.advance(0.125);
        assert!(strike.is_active());
        strike.advance(0.125);
        assert_eq!(strike.state, StrikeState::Expired);
        assert_eq!(strike.opacity(), 0.0);
    }

    #[test]
    fn test_pending_strike_is_dark() {
        let strike = LightningStrike::new(DVec3::ZERO, 0.25, 10.0);
        assert_eq!(strike.intensity(), 0.0);
    }

    #[test]
    fn test_trigger_respects_cap() {
        let mut manager = LightningManager::new(quiet_config());
        assert!(manager.trigger(LightningStrike::new(DVec3::ZERO, 0.25, 5.0)));
        assert!(manager.trigger(LightningStrike::new(DVec3::ZERO, 0.25, 5.0)));
        assert!(!manager.trigger(LightningStrike::new(DVec3::ZERO, 0.25, 5.0)));
        assert_eq!(manager.active_count(), 2);
    }

    #[test]
    fn test_spawning_never_exceeds_cap() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut manager = LightningManager::new(LightningConfig {
            spawn_probability: 1.0,
            ..LightningConfig::default()
        });
        for _ in 0..500 {
            manager.update(0.016, &mut rng);
            assert!(manager.active_count() <= 2);
        }
    }

    #[test]
    fn test_measured_delta_aging() {
        let mut rng = SmallRng::seed_from_u64(10);
        let mut manager = LightningManager::new(LightningConfig {
            fixed_step: None,
            ..quiet_config()
        });
        manager.trigger(LightningStrike::new(DVec3::ZERO, 1.0, 10.0));

        manager.update(0.5, &mut rng);
        assert_eq!(manager.strikes()[0].age, 0.5);
        manager.update(0.5, &mut rng);
        assert_eq!(manager.active_count(), 0);
    }
}
