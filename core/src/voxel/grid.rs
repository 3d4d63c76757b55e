//! Voxel grid layout

use super::SegmentEnd;
use crate::base::*;
use crate::error::*;
use crate::geometry::*;
use std::mem::size_of;

/// Dense regular grid layout. The grid is centred on the world origin (the
/// aperture centre) and voxels are stored x-fastest.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    /// Number of voxels along each axis.
    dims: [usize; 3],

    /// Voxel edge length in world units.
    pitch: Float,

    /// World space extent of the grid.
    bounds: Bounds3f,
}

impl VoxelGrid {
    /// Returns a new `VoxelGrid`.
    ///
    /// * `dims`  - Number of voxels along each axis.
    /// * `pitch` - Voxel edge length in world units.
    pub fn new(dims: [usize; 3], pitch: Float) -> Result<Self> {
        if dims.iter().any(|&n| n == 0) {
            return Err(FieldError::InvalidParameter(format!(
                "grid dimensions must be positive, got {:?}",
                dims
            )));
        }
        if !(pitch > 0.0 && pitch.is_finite()) {
            return Err(FieldError::InvalidParameter(format!(
                "pitch must be positive, got {}",
                pitch
            )));
        }

        let half = Vector3f::new(
            0.5 * pitch * dims[0] as Float,
            0.5 * pitch * dims[1] as Float,
            0.5 * pitch * dims[2] as Float,
        );
        let bounds = Bounds3f::new(Point3f::zero() - half, Point3f::zero() + half);

        Ok(Self {
            dims,
            pitch,
            bounds,
        })
    }

    /// Returns the number of voxels along each axis.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Returns the voxel edge length.
    pub fn pitch(&self) -> Float {
        self.pitch
    }

    /// Returns the world space extent.
    pub fn bounds(&self) -> &Bounds3f {
        &self.bounds
    }

    /// Returns the world position of the corner of voxel (0, 0, 0).
    pub fn origin(&self) -> Point3f {
        self.bounds.p_min
    }

    /// Returns the total number of voxels or `None` on overflow.
    pub fn checked_len(&self) -> Option<usize> {
        self.dims[0]
            .checked_mul(self.dims[1])
            .and_then(|n| n.checked_mul(self.dims[2]))
    }

    /// Returns the total number of voxels.
    pub fn len(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    /// Returns `true` if the grid has no voxels (never the case for a
    /// validated grid).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the linear offset of a voxel.
    ///
    /// * `idx` - Voxel index (i, j, k).
    #[inline]
    pub fn offset(&self, idx: [usize; 3]) -> usize {
        (idx[2] * self.dims[1] + idx[1]) * self.dims[0] + idx[0]
    }

    /// Returns the voxel index of a linear offset.
    ///
    /// * `offset` - Linear voxel offset.
    pub fn index(&self, offset: usize) -> [usize; 3] {
        let i = offset % self.dims[0];
        let j = (offset / self.dims[0]) % self.dims[1];
        let k = offset / (self.dims[0] * self.dims[1]);
        [i, j, k]
    }

    /// Returns the voxel containing a point using
    /// `floor((p - origin) / pitch)`, or `None` when it lies outside.
    ///
    /// * `p` - World space point.
    pub fn voxel_index(&self, p: &Point3f) -> Option<[usize; 3]> {
        let origin = self.origin();
        let mut idx = [0; 3];
        for axis in 0..3 {
            let v = ((p[axis] - origin[axis]) / self.pitch).floor();
            if !(v >= 0.0 && v < self.dims[axis] as Float) {
                return None;
            }
            idx[axis] = v as usize;
        }
        Some(idx)
    }

    /// Returns the world space centre of a voxel.
    ///
    /// * `idx` - Voxel index (i, j, k).
    pub fn voxel_center(&self, idx: [usize; 3]) -> Point3f {
        let origin = self.origin();
        Point3f::new(
            origin.x + (idx[0] as Float + 0.5) * self.pitch,
            origin.y + (idx[1] as Float + 0.5) * self.pitch,
            origin.z + (idx[2] as Float + 0.5) * self.pitch,
        )
    }

    /// Allocates a zeroed buffer with one value per voxel. Allocation
    /// failure is reported with the requested shape.
    pub fn allocate<T: Default + Clone>(&self) -> Result<Vec<T>> {
        let exhausted = || FieldError::ResourceExhaustion {
            dims: self.dims,
            bytes: self.checked_len().map_or(usize::MAX, |n| n.saturating_mul(size_of::<T>())),
        };

        let len = self.checked_len().ok_or_else(exhausted)?;
        let mut data: Vec<T> = Vec::new();
        data.try_reserve_exact(len).map_err(|_| exhausted())?;
        data.resize(len, T::default());
        Ok(data)
    }

    /// Walks the voxels crossed by a straight segment with a 3-D DDA and
    /// calls `visit(offset, sub_length)` for each one. Returns whether the
    /// segment stays inside the grid.
    ///
    /// * `o`      - Start of the segment.
    /// * `d`      - Unit direction.
    /// * `length` - Segment length in world units.
    /// * `visit`  - Called with the linear offset and the length of the
    ///              segment inside each crossed voxel.
    pub fn traverse<F>(&self, o: &Point3f, d: &Vector3f, length: Float, mut visit: F) -> SegmentEnd
    where
        F: FnMut(usize, Float),
    {
        let (t_enter, t_exit) = match self.bounds.intersect_p(&Ray::unbounded(*o, *d)) {
            Some(range) => range,
            None => return SegmentEnd::Exited { distance: 0.0 },
        };
        if t_enter > 0.0 {
            // Segments always start inside the grid.
            return SegmentEnd::Exited { distance: 0.0 };
        }

        let t_end = min(length, t_exit);
        let end = if length < t_exit {
            SegmentEnd::Inside
        } else {
            SegmentEnd::Exited { distance: t_exit }
        };

        // Set up the starting voxel and per-axis stepping.
        let origin = self.origin();
        let mut idx = [0_isize; 3];
        let mut step = [0_isize; 3];
        let mut t_max = [INFINITY; 3];
        let mut t_delta = [INFINITY; 3];
        for axis in 0..3 {
            let n = self.dims[axis] as isize;
            let v = ((o[axis] - origin[axis]) / self.pitch).floor() as isize;
            idx[axis] = v.clamp(0, n - 1);

            if d[axis] > 0.0 {
                step[axis] = 1;
                let next = origin[axis] + (idx[axis] + 1) as Float * self.pitch;
                t_max[axis] = (next - o[axis]) / d[axis];
                t_delta[axis] = self.pitch / d[axis];
            } else if d[axis] < 0.0 {
                step[axis] = -1;
                let next = origin[axis] + idx[axis] as Float * self.pitch;
                t_max[axis] = (next - o[axis]) / d[axis];
                t_delta[axis] = -self.pitch / d[axis];
            }
        }

        let mut t = 0.0;
        loop {
            let axis = if t_max[0] < t_max[1] {
                if t_max[0] < t_max[2] {
                    0
                } else {
                    2
                }
            } else if t_max[1] < t_max[2] {
                1
            } else {
                2
            };

            let t_next = min(t_max[axis], t_end);
            if t_next > t {
                let offset = self.offset([idx[0] as usize, idx[1] as usize, idx[2] as usize]);
                visit(offset, t_next - t);
                t = t_next;
            }
            if t >= t_end {
                break;
            }

            idx[axis] += step[axis];
            if idx[axis] < 0 || idx[axis] >= self.dims[axis] as isize {
                break;
            }
            t_max[axis] += t_delta[axis];
        }

        end
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
