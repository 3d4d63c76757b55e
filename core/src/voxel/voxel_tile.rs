//! Private voxel accumulator

use super::{VoxelAccumulator, VoxelGrid};
use crate::base::*;
use crate::error::*;

/// Dense voxel accumulator owned by a single worker. Tiles from different
/// workers are combined with `merge`.
#[derive(Clone, Debug)]
pub struct VoxelTile {
    /// Grid layout.
    grid: VoxelGrid,

    /// Accumulated values, x-fastest.
    data: Vec<Float>,
}

impl VoxelTile {
    /// Allocates a zeroed tile for a grid.
    ///
    /// * `grid` - Grid layout.
    pub fn new(grid: VoxelGrid) -> Result<Self> {
        let data = grid.allocate::<Float>()?;
        Ok(Self { grid, data })
    }

    /// Wraps existing values in a tile. Returns `None` if the number of
    /// values does not match the grid.
    ///
    /// * `grid` - Grid layout.
    /// * `data` - Values in x-fastest order.
    pub fn from_values(grid: VoxelGrid, data: Vec<Float>) -> Option<Self> {
        if data.len() == grid.len() {
            Some(Self { grid, data })
        } else {
            None
        }
    }

    /// Wraps values whose length is known to match the grid.
    ///
    /// * `grid` - Grid layout.
    /// * `data` - Values in x-fastest order.
    pub(super) fn from_raw(grid: VoxelGrid, data: Vec<Float>) -> Self {
        debug_assert_eq!(data.len(), grid.len());
        Self { grid, data }
    }

    /// Adds another tile elementwise.
    ///
    /// * `other` - Tile with the same grid layout.
    pub fn merge(&mut self, other: &VoxelTile) {
        debug_assert_eq!(self.grid, other.grid);
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += *b;
        }
    }

    /// Returns the value of a voxel.
    ///
    /// * `idx` - Voxel index (i, j, k).
    pub fn get(&self, idx: [usize; 3]) -> Float {
        self.data[self.grid.offset(idx)]
    }

    /// Returns all values in x-fastest order.
    pub fn values(&self) -> &[Float] {
        &self.data
    }

    /// Consumes the tile and returns its values.
    pub fn into_values(self) -> Vec<Float> {
        self.data
    }

    /// Returns the sum over all voxels.
    pub fn sum(&self) -> Float {
        self.data.iter().sum()
    }

    /// Zeroes all voxels.
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|v| *v = 0.0);
    }
}

impl VoxelAccumulator for VoxelTile {
    fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    #[inline]
    fn add(&mut self, offset: usize, value: Float) {
        self.data[offset] += value;
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::*;
    use crate::voxel::SegmentEnd;
    use float_cmp::*;

    #[test]
    fn deposit_is_measured_in_pitches() {
        let grid = VoxelGrid::new([4, 4, 4], 2.0).unwrap();
        let mut tile = VoxelTile::new(grid).unwrap();
        let end = tile.accumulate_segment(
            &Point3f::new(0.5, 0.5, 0.0),
            &Vector3f::new(0.0, 0.0, 1.0),
            3.0,
            1.0,
        );
        assert_eq!(end, SegmentEnd::Inside);
        assert!(approx_eq!(f64, tile.get([2, 2, 2]), 1.0, ulps = 2));
        assert!(approx_eq!(f64, tile.get([2, 2, 3]), 0.5, ulps = 2));
        assert!(approx_eq!(f64, tile.sum() * 2.0, 3.0, epsilon = 1e-12));

        // Doubling the pitch of the same walk halves the deposit.
        let coarse = VoxelGrid::new([2, 2, 2], 4.0).unwrap();
        let mut tile = VoxelTile::new(coarse).unwrap();
        tile.accumulate_segment(
            &Point3f::new(0.5, 0.5, 0.0),
            &Vector3f::new(0.0, 0.0, 1.0),
            3.0,
            2.0,
        );
        assert!(approx_eq!(f64, tile.get([1, 1, 1]), 1.5, ulps = 2));
    }

    #[test]
    fn merge_sums_elementwise() {
        let grid = VoxelGrid::new([2, 1, 1], 1.0).unwrap();
        let mut a = VoxelTile::from_values(grid, vec![1.0, 2.0]).unwrap();
        let b = VoxelTile::from_values(grid, vec![0.5, -1.0]).unwrap();
        a.merge(&b);
        assert_eq!(a.values(), &[1.5, 1.0]);
        a.clear();
        assert_eq!(a.into_values(), vec![0.0, 0.0]);
        assert!(VoxelTile::from_values(grid, vec![1.0]).is_none());
    }
}
