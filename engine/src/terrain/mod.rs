//! Terrain Module
//!
//! Procedural height surface, its tessellated mesh, and the height query
//! service every placement system goes through.
//!
//! # Components
//!
//! - [`HeightSurface`] - Seeded simplex noise elevation function
//! - [`TerrainMesh`] - Grid mesh sampled from the surface, answers ray casts
//! - [`HeightSource`] / [`HeightQuery`] - Query seam with stand-off and fallback
//! - [`Terrain`] - Surface + mesh built together for one world generation

pub mod mesh;
pub mod query;
pub mod surface;

use std::sync::atomic::{AtomicU64, Ordering};

pub use mesh::{RayHit, TerrainMesh};
pub use query::{CHARACTER_FALLBACK, CHARACTER_STANDOFF, HeightQuery, HeightSource};
pub use surface::{HeightSurface, TerrainConfig};

static NEXT_TERRAIN_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one generated terrain instance.
///
/// Components built against a terrain record its id; a mismatch means
/// something survived a regeneration it should not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerrainId(u64);

impl TerrainId {
    fn next() -> Self {
        Self(NEXT_TERRAIN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Fold a 64-bit world seed into the 32-bit noise seed.
pub fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// The terrain for one world generation.
#[derive(Debug)]
pub struct Terrain {
    id: TerrainId,
    surface: HeightSurface,
    mesh: TerrainMesh,
}

impl Terrain {
    /// Build surface and mesh from a world seed.
    pub fn generate(seed: u64, config: &TerrainConfig) -> Self {
        let surface = HeightSurface::new(noise_seed(seed), config);
        let mesh = TerrainMesh::build(&surface, config);
        Self {
            id: TerrainId::next(),
            surface,
            mesh,
        }
    }

    pub fn id(&self) -> TerrainId {
        self.id
    }

    /// Analytic surface, for bulk placement.
    pub fn surface(&self) -> &HeightSurface {
        &self.surface
    }

    /// Rendered mesh, for placement that must match what is drawn.
    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }
}

impl HeightSource for Terrain {
    /// The mesh is the canonical ground; see [`TerrainMesh::raycast_down`].
    fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        self.mesh.height_at(x, z)
    }
}
