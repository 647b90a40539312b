//! Height Surface
//!
//! Pure elevation function backed by seeded 2D simplex noise. A surface is
//! built once per world generation and never reseeded afterwards; the same
//! seed always yields the same surface.

use std::fmt;

use noise::{NoiseFn, Simplex};
use serde::{Deserialize, Serialize};

use super::query::HeightSource;

/// Terrain generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Planar coordinates are divided by this before sampling the noise
    pub frequency_divisor: f64,
    /// Noise output in [-1, 1] is multiplied by this
    pub amplitude: f64,
    /// Edge length of the square terrain footprint centred on the origin
    pub size: f64,
    /// Mesh segments along each edge of the footprint
    pub segments: u32,
    /// Height from which downward ground rays are cast
    pub ray_origin_height: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            frequency_divisor: 25.0,
            amplitude: 8.0,
            size: 120.0,
            segments: 200,
            ray_origin_height: 200.0,
        }
    }
}

/// Deterministic elevation function over all of R².
pub struct HeightSurface {
    noise: Simplex,
    seed: u32,
    frequency_divisor: f64,
    amplitude: f64,
}

impl HeightSurface {
    /// Build a surface from a noise seed and the terrain parameters.
    pub fn new(seed: u32, config: &TerrainConfig) -> Self {
        Self {
            noise: Simplex::new(seed),
            seed,
            frequency_divisor: config.frequency_divisor,
            amplitude: config.amplitude,
        }
    }

    /// Elevation at planar coordinates `(x, z)`.
    ///
    /// Always within `[-amplitude, amplitude]`.
    pub fn elevation(&self, x: f64, z: f64) -> f64 {
        let n = self
            .noise
            .get([x / self.frequency_divisor, z / self.frequency_divisor]);
        n.clamp(-1.0, 1.0) * self.amplitude
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl HeightSource for HeightSurface {
    fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        Some(self.elevation(x, z))
    }
}

impl fmt::Debug for HeightSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeightSurface")
            .field("seed", &self.seed)
            .field("frequency_divisor", &self.frequency_divisor)
            .field("amplitude", &self.amplitude)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_surface() {
        let config = TerrainConfig::default();
        let a = HeightSurface::new(7, &config);
        let b = HeightSurface::new(7, &config);

        for i in 0..50 {
            let x = i as f64 * 3.7 - 90.0;
            let z = i as f64 * -2.3 + 40.0;
            assert_eq!(a.elevation(x, z), b.elevation(x, z));
        }
    }

    #[test]
    fn test_different_seed_changes_surface() {
        let config = TerrainConfig::default();
        let a = HeightSurface::new(1, &config);
        let b = HeightSurface::new(2, &config);

        let differs = (0..50).any(|i| {
            let x = i as f64 * 5.1;
            a.elevation(x, -x) != b.elevation(x, -x)
        });
        assert!(differs);
    }

    #[test]
    fn test_zero_amplitude_is_flat() {
        let config = TerrainConfig {
            amplitude: 0.0,
            ..TerrainConfig::default()
        };
        let surface = HeightSurface::new(3, &config);
        assert_eq!(surface.elevation(12.0, -40.0), 0.0);
    }
}
