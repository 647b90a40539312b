//! Sample Grid Module
//!
//! Regular grid of cell centres laid over the terrain footprint, used for
//! one-shot spatial classification (water placement).
//!
//! ## Layout
//! - `extent = 120.0` covers -60m to +60m on both axes
//! - cells start at the negative corner and step by `cell_size`
//! - the last row/column may overhang the extent when it does not divide evenly
//! - 1 unit = 1 meter

/// Grid of square cells centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleGrid {
    /// Edge length of one cell
    pub cell_size: f64,
    /// Edge length of the covered square
    pub extent: f64,
}

impl SampleGrid {
    pub fn new(cell_size: f64, extent: f64) -> Self {
        Self { cell_size, extent }
    }

    /// Cells along one axis.
    pub fn cells_per_axis(&self) -> usize {
        if self.cell_size <= 0.0 || self.extent <= 0.0 {
            return 0;
        }
        (self.extent / self.cell_size).ceil() as usize
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells_per_axis() * self.cells_per_axis()
    }

    /// Centre of cell `(i, k)` as planar `(x, z)`.
    ///
    /// Computed from the index rather than accumulated, so centres carry no
    /// drift across the grid.
    pub fn cell_center(&self, i: usize, k: usize) -> (f64, f64) {
        let half = self.extent * 0.5;
        let offset = self.cell_size * 0.5;
        (
            -half + i as f64 * self.cell_size + offset,
            -half + k as f64 * self.cell_size + offset,
        )
    }

    /// All cell centres, X-major (the same column order the tiles are
    /// numbered in).
    pub fn cell_centers(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let n = self.cells_per_axis();
        (0..n).flat_map(move |i| (0..n).map(move |k| self.cell_center(i, k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_grid_dimensions() {
        let grid = SampleGrid::new(5.0, 120.0);
        assert_eq!(grid.cells_per_axis(), 24);
        assert_eq!(grid.cell_count(), 576);
        assert_eq!(grid.cell_centers().count(), 576);
    }

    #[test]
    fn test_first_and_last_centres() {
        let grid = SampleGrid::new(5.0, 120.0);
        assert_eq!(grid.cell_center(0, 0), (-57.5, -57.5));
        assert_eq!(grid.cell_center(23, 23), (57.5, 57.5));
    }

    #[test]
    fn test_uneven_extent_overhangs() {
        let grid = SampleGrid::new(7.0, 20.0);
        assert_eq!(grid.cells_per_axis(), 3);
    }

    #[test]
    fn test_centres_are_x_major() {
        let grid = SampleGrid::new(10.0, 20.0);
        let centres: Vec<_> = grid.cell_centers().collect();
        assert_eq!(centres, vec![(-5.0, -5.0), (-5.0, 5.0), (5.0, -5.0), (5.0, 5.0)]);
    }

    #[test]
    fn test_degenerate_grid_is_empty() {
        assert_eq!(SampleGrid::new(0.0, 120.0).cell_count(), 0);
        assert_eq!(SampleGrid::new(5.0, 0.0).cell_centers().count(), 0);
    }
}
