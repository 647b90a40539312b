//! Water Placement
//!
//! One-shot valley classification: sample the terrain at every cell of a
//! regular grid, find the elevation at the configured low percentile, and
//! flood a random subset of the cells at or below it. Tiles never move
//! horizontally; each frame they bob around their base elevation.
//!
//! Re-run only on world regeneration.

use glam::DVec3;
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::SampleGrid;
use crate::terrain::{HeightSource, Terrain, TerrainId};

/// Water placement and animation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    /// Grid spacing between sampled cell centres
    pub tile_size: f64,
    /// Edge length of the sampled square
    pub grid_size: f64,
    /// Fraction of samples classed as valley (lowest first)
    pub percentile: f64,
    /// Chance that an eligible cell actually gets a tile
    pub fill_probability: f64,
    /// Lift above the sampled surface so the tile does not z-fight it
    pub surface_offset: f64,
    /// Rendered quad edge relative to `tile_size`
    pub render_scale: f64,
    pub bob_amplitude: f64,
    /// Bob angular speed in radians per second
    pub bob_speed: f64,
    /// Bob phase offset between consecutive tiles
    pub bob_phase_step: f64,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            tile_size: 5.0,
            grid_size: 120.0,
            percentile: 0.3,
            fill_probability: 0.7,
            surface_offset: 0.02,
            render_scale: 1.2 * 0.95,
            bob_amplitude: 0.08,
            bob_speed: 1.5,
            bob_phase_step: 0.4,
        }
    }
}

/// Base emissive level of a tile; the shimmer oscillates around it.
const SHIMMER_BASE: f64 = 0.2;

/// Elevation at `percentile` of an ascending-sorted sample set.
///
/// Uses index `floor(n × percentile) - 1`, clamped to 0. `None` for an
/// empty set.
pub fn percentile_threshold(sorted: &[f64], percentile: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = (sorted.len() as f64 * percentile).floor() as usize;
    let index = rank.saturating_sub(1).min(sorted.len() - 1);
    Some(sorted[index])
}

/// A static water quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterTile {
    /// Current position; only `y` changes after placement
    pub position: DVec3,
    /// Rest elevation the tile bobs around
    pub base_elevation: f64,
    /// Rendered quad edge length
    pub size: f64,
    /// Emissive intensity for the frame
    pub shimmer: f64,
    /// Placement order, drives the bob phase
    pub index: usize,
}

/// Sampled grid cell with a defined height.
#[derive(Debug, Clone, Copy)]
struct CellSample {
    x: f64,
    z: f64,
    height: f64,
}

/// All water tiles of one world generation.
#[derive(Debug, Clone)]
pub struct WaterField {
    tiles: Vec<WaterTile>,
    config: WaterConfig,
    threshold: Option<f64>,
    terrain_id: Option<TerrainId>,
}

impl WaterField {
    /// Place tiles over a generated terrain, sampling its rendered mesh.
    pub fn place(config: WaterConfig, terrain: &Terrain, rng: &mut impl Rng) -> Self {
        let mut field = Self::place_on(config, terrain.mesh(), rng);
        field.terrain_id = Some(terrain.id());
        field
    }

    /// Place tiles over an arbitrary height source. Cells the source cannot
    /// answer are skipped.
    pub fn place_on(
        config: WaterConfig,
        source: &(impl HeightSource + ?Sized),
        rng: &mut impl Rng,
    ) -> Self {
        let grid = SampleGrid::new(config.tile_size, config.grid_size);
        let samples: Vec<CellSample> = grid
            .cell_centers()
            .filter_map(|(x, z)| {
                source
                    .height_at(x, z)
                    .filter(|h| h.is_finite())
                    .map(|height| CellSample { x, z, height })
            })
            .collect();

        let mut heights: Vec<f64> = samples.iter().map(|s| s.height).collect();
        heights.sort_by(f64::total_cmp);

        let Some(threshold) = percentile_threshold(&heights, config.percentile) else {
            warn!("water: no terrain samples available, placing no tiles");
            return Self {
                tiles: Vec::new(),
                config,
                threshold: None,
                terrain_id: None,
            };
        };

        let size = config.tile_size * config.render_scale;
        let mut tiles = Vec::new();
        for sample in samples.iter().filter(|s| s.height <= threshold) {
            if !rng.random_bool(config.fill_probability) {
                continue;
            }
            let base_elevation = sample.height + config.surface_offset;
            tiles.push(WaterTile {
                position: DVec3::new(sample.x, base_elevation, sample.z),
                base_elevation,
                size,
                shimmer: SHIMMER_BASE,
                index: tiles.len(),
            });
        }

        info!(
            "water: {} tile(s) from {} sample(s), threshold {:.3}",
            tiles.len(),
            samples.len(),
            threshold
        );

        Self {
            tiles,
            config,
            threshold: Some(threshold),
            terrain_id: None,
        }
    }

    /// Animate every tile for simulated time `time` (seconds).
    ///
    /// Positions are recomputed from the base each frame, so nothing
    /// accumulates.
    pub fn update(&mut self, time: f64) {
        let c = &self.config;
        for tile in &mut self.tiles {
            let phase = tile.index as f64;
            let bob = (time * c.bob_speed + phase * c.bob_phase_step).sin() * c.bob_amplitude;
            tile.position.y = tile.base_elevation + bob;

            let shimmer = (time * 2.0 + phase).sin() * 0.08;
            tile.shimmer = SHIMMER_BASE + shimmer * 0.05;
        }
    }

    pub fn tiles(&self) -> &[WaterTile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Valley threshold found at placement, `None` if nothing was sampled.
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    pub fn terrain_id(&self) -> Option<TerrainId> {
        self.terrain_id
    }
}
