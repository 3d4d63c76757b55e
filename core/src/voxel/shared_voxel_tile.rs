//! Shared voxel accumulator

use super::{VoxelAccumulator, VoxelGrid, VoxelTile};
use crate::base::*;
use crate::error::*;
use crate::parallel::AtomicFloat;
use std::sync::atomic::Ordering;

/// Voxel accumulator shared by all workers. Deposits use atomic adds, so a
/// single grid serves any number of threads at the cost of contention and
/// non-deterministic summation order.
#[derive(Debug)]
pub struct SharedVoxelTile {
    /// Grid layout.
    grid: VoxelGrid,

    /// Accumulated values, x-fastest.
    data: Vec<AtomicFloat>,
}

impl SharedVoxelTile {
    /// Allocates a zeroed shared tile for a grid.
    ///
    /// * `grid` - Grid layout.
    pub fn new(grid: VoxelGrid) -> Result<Self> {
        let data = grid.allocate::<AtomicFloat>()?;
        Ok(Self { grid, data })
    }

    /// Returns the grid layout.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Returns a snapshot of the accumulated values as a private tile.
    pub fn to_tile(&self) -> VoxelTile {
        let values = self.data.iter().map(|v| v.load(Ordering::Acquire)).collect();
        VoxelTile::from_raw(self.grid, values)
    }
}

impl VoxelAccumulator for &SharedVoxelTile {
    fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    #[inline]
    fn add(&mut self, offset: usize, value: Float) {
        self.data[offset].add(value);
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
