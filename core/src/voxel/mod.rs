//! Voxel grids and accumulators

use crate::base::*;
use crate::geometry::*;

mod grid;
mod shared_voxel_tile;
mod voxel_tile;

// Re-export
pub use grid::*;
pub use shared_voxel_tile::*;
pub use voxel_tile::*;

/// Outcome of depositing a path segment into a voxel grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SegmentEnd {
    /// The whole segment lies inside the grid.
    Inside,

    /// The segment leaves the grid after `distance` world units.
    Exited { distance: Float },
}

/// Accumulates visitation density of photon paths over a voxel grid.
pub trait VoxelAccumulator {
    /// Returns the grid layout.
    fn grid(&self) -> &VoxelGrid;

    /// Adds a value to the voxel at a linear offset.
    ///
    /// * `offset` - Linear voxel offset.
    /// * `value`  - Value to add.
    fn add(&mut self, offset: usize, value: Float);

    /// Ray-marches a straight segment through the grid and deposits
    /// `weight * sub_length / pitch` into every voxel it crosses, i.e. the
    /// weighted track length in voxel pitches.
    ///
    /// * `o`      - Start of the segment.
    /// * `d`      - Unit direction.
    /// * `length` - Segment length in world units.
    /// * `weight` - Photon weight.
    fn accumulate_segment(
        &mut self,
        o: &Point3f,
        d: &Vector3f,
        length: Float,
        weight: Float,
    ) -> SegmentEnd {
        let grid = *self.grid();
        let scale = weight / grid.pitch();
        grid.traverse(o, d, length, |offset, sub_length| {
            self.add(offset, scale * sub_length)
        })
    }
}
