//! Terrain Mesh
//!
//! The tessellated surface the renderer draws: a regular grid over the
//! terrain footprint with one surface sample per vertex and two triangles
//! per cell. Ground queries cast a ray straight down through it and take
//! the first triangle hit, so answers match the drawn surface exactly
//! (flat-shaded facets included) rather than the smooth noise function.

use glam::DVec3;

use super::query::HeightSource;
use super::surface::{HeightSurface, TerrainConfig};

/// Determinant below which a ray is treated as parallel to a triangle.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Barycentric slack so rays through shared edges hit one of the two triangles.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Result of a ground ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space intersection point
    pub point: DVec3,
    /// Distance travelled along the ray
    pub distance: f64,
}

/// Heightfield mesh sampled from a [`HeightSurface`].
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    half_size: f64,
    segments: u32,
    cell_size: f64,
    ray_origin_height: f64,
    /// Row-major `(segments + 1)²` vertex elevations, rows along +Z
    heights: Vec<f64>,
}

impl TerrainMesh {
    /// Sample `surface` at every vertex of the footprint grid.
    pub fn build(surface: &HeightSurface, config: &TerrainConfig) -> Self {
        let segments = config.segments.max(1);
        let half_size = config.size * 0.5;
        let cell_size = config.size / segments as f64;
        let stride = segments as usize + 1;

        let mut heights = Vec::with_capacity(stride * stride);
        for j in 0..stride {
            let z = -half_size + j as f64 * cell_size;
            for i in 0..stride {
                let x = -half_size + i as f64 * cell_size;
                heights.push(surface.elevation(x, z));
            }
        }

        Self {
            half_size,
            segments,
            cell_size,
            ray_origin_height: config.ray_origin_height,
            heights,
        }
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Edge length of the footprint.
    pub fn size(&self) -> f64 {
        self.half_size * 2.0
    }

    /// Vertex elevations, row-major with rows along +Z.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Number of vertices in the grid.
    pub fn vertex_count(&self) -> usize {
        self.heights.len()
    }

    /// World-space position of grid vertex `(i, j)`.
    pub fn vertex(&self, i: u32, j: u32) -> DVec3 {
        let stride = self.segments as usize + 1;
        let y = self.heights[j as usize * stride + i as usize];
        DVec3::new(
            -self.half_size + i as f64 * self.cell_size,
            y,
            -self.half_size + j as f64 * self.cell_size,
        )
    }

    /// Whether `(x, z)` lies on the footprint (edges included).
    pub fn contains(&self, x: f64, z: f64) -> bool {
        x.abs() <= self.half_size && z.abs() <= self.half_size
    }

    /// Cast a ray straight down from the ray origin height at `(x, z)`.
    ///
    /// Returns `None` off the footprint, or when the surface lies above the
    /// ray origin.
    pub fn raycast_down(&self, x: f64, z: f64) -> Option<RayHit> {
        if !x.is_finite() || !z.is_finite() || !self.contains(x, z) {
            return None;
        }

        let last = self.segments - 1;
        let i = (((x + self.half_size) / self.cell_size).floor() as u32).min(last);
        let j = (((z + self.half_size) / self.cell_size).floor() as u32).min(last);

        let v00 = self.vertex(i, j);
        let v10 = self.vertex(i + 1, j);
        let v01 = self.vertex(i, j + 1);
        let v11 = self.vertex(i + 1, j + 1);

        let origin = DVec3::new(x, self.ray_origin_height, z);
        let direction = DVec3::NEG_Y;

        [(v00, v10, v11), (v00, v11, v01)]
            .into_iter()
            .filter_map(|(a, b, c)| ray_triangle(origin, direction, a, b, c))
            .min_by(|a, b| a.total_cmp(b))
            .map(|distance| RayHit {
                point: origin + direction * distance,
                distance,
            })
    }
}

impl HeightSource for TerrainMesh {
    fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        self.raycast_down(x, z).map(|hit| hit.point.y)
    }
}

/// Möller–Trumbore ray/triangle intersection; returns the hit distance.
fn ray_triangle(origin: DVec3, direction: DVec3, a: DVec3, b: DVec3, c: DVec3) -> Option<f64> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(-EDGE_TOLERANCE..=1.0 + EDGE_TOLERANCE).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = direction.dot(q) * inv_det;
    if v < -EDGE_TOLERANCE || u + v > 1.0 + EDGE_TOLERANCE {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}
