//! 3-D Coordinate System

use super::{vector3, Vector3};
use crate::base::abs;
use num_traits::Float;

/// Returns two unit vectors that complete an orthonormal basis with the
/// given unit vector.
///
/// The second vector is built by zeroing the smaller of the x/y components,
/// swapping the remaining two and negating one. The third is the cross
/// product of the first two.
///
/// * `v1` - The first unit vector to form part of the coordinate system.
pub fn coordinate_system<T: Float>(v1: &Vector3<T>) -> (Vector3<T>, Vector3<T>) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        vector3(-v1.z, T::zero(), v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        vector3(T::zero(), v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };

    let v3 = v1.cross(&v2);

    (v2, v3)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
