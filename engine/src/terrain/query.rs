//! Height Query Service
//!
//! Answers "elevation at (x, z)" for the components that place things on
//! the terrain. Two sources exist with different cost/precision:
//!
//! - [`TerrainMesh`](super::TerrainMesh) - ray cast against the tessellated
//!   surface the renderer draws; used for the player and for water so feet
//!   and tiles sit on what is on screen
//! - [`HeightSurface`](super::HeightSurface) - direct noise evaluation; used
//!   for bulk rain placement where 15k ray casts per frame are unaffordable
//!
//! A source may have no answer (outside the mesh footprint). [`HeightQuery`]
//! turns that into a concrete height with a stand-off and a fallback.

/// Anything that can report a terrain elevation at planar coordinates.
pub trait HeightSource {
    /// Elevation at `(x, z)`, or `None` when undefined there.
    fn height_at(&self, x: f64, z: f64) -> Option<f64>;
}

impl<F> HeightSource for F
where
    F: Fn(f64, f64) -> Option<f64>,
{
    fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        self(x, z)
    }
}

/// Stand-off added above the ground for character placement.
pub const CHARACTER_STANDOFF: f64 = 0.9;

/// Ground height used for the character where the terrain is undefined.
pub const CHARACTER_FALLBACK: f64 = 0.5;

/// Resolves optional source heights into concrete ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightQuery {
    /// Added to every defined height
    pub standoff: f64,
    /// Returned when the source has no height
    pub fallback: f64,
}

impl HeightQuery {
    pub const fn new(standoff: f64, fallback: f64) -> Self {
        Self { standoff, fallback }
    }

    /// Query used for foot placement of the player.
    pub const fn character() -> Self {
        Self::new(CHARACTER_STANDOFF, CHARACTER_FALLBACK)
    }

    /// Query used for rain elevation bias.
    pub const fn particle() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Height plus stand-off, `None` when the source is undefined.
    pub fn sample(&self, source: &(impl HeightSource + ?Sized), x: f64, z: f64) -> Option<f64> {
        source.height_at(x, z).map(|h| h + self.standoff)
    }

    /// Height plus stand-off, or the fallback.
    pub fn resolve(&self, source: &(impl HeightSource + ?Sized), x: f64, z: f64) -> f64 {
        self.sample(source, x, z).unwrap_or(self.fallback)
    }
}
