//! 3-D Points

use super::{vector3, Vector3};
use crate::base::{Axis, Float};
use num_traits::{Num, Zero};
use std::ops;

/// A 3-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D point containing `Float` values.
pub type Point3f = Point3<Float>;

/// Creates a new 3-D point.
///
/// * `x`: X-coordinate.
/// * `y`: Y-coordinate.
/// * `z`: Z-coordinate.
pub fn point3<T>(x: T, y: T, z: T) -> Point3<T> {
    Point3 { x, y, z }
}

impl<T: Num> Point3<T> {
    /// Creates a new 3-D point.
    ///
    /// * `x`: X-coordinate.
    /// * `y`: Y-coordinate.
    /// * `z`: Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D zero point.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        point3(T::zero(), T::zero(), T::zero())
    }

    /// Returns true if any coordinate is NaN.
    pub fn has_nans(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

impl<T: Num> ops::Add<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offsets the point by the given vector.
    ///
    /// * `other` - The vector to add.
    fn add(self, other: Vector3<T>) -> Self::Output {
        point3(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num + Copy> ops::AddAssign<Vector3<T>> for Point3<T> {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The vector to add.
    fn add_assign(&mut self, other: Vector3<T>) {
        *self = point3(self.x + other.x, self.y + other.y, self.z + other.z);
    }
}

impl<T: Num> ops::Sub for Point3<T> {
    type Output = Vector3<T>;

    /// Subtracts the given point and returns the vector towards that point.
    ///
    /// * `other` - The point to subtract.
    fn sub(self, other: Self) -> Self::Output {
        vector3(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num> ops::Sub<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Subtracts the given vector and returns the result.
    ///
    /// * `other` - The vector to subtract.
    fn sub(self, other: Vector3<T>) -> Self::Output {
        point3(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T> ops::Index<Axis> for Point3<T> {
    type Output = T;

    /// Index the point by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis.
    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl<T> ops::Index<usize> for Point3<T> {
    type Output = T;

    /// Index the point by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis.
    fn index(&self, axis: usize) -> &Self::Output {
        &self[Axis::from(axis)]
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Point3<T> {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_point() {
        assert!(Point3::new(0.0, 0.0, 0.0) == Point3f::zero());
        assert!(Point3::new(0.0, Float::NAN, 0.0).has_nans());
    }

    crate::prop_point3!(
        point3_f64,
        f64,
        -100.0..100.0f64,
        -100.0..100.0f64,
        -100.0..100.0f64
    );

    proptest! {
        #[test]
        fn sub_then_add_returns_point(p1 in point3_f64(), p2 in point3_f64()) {
            let v = p1 - p2;
            let p = p2 + v;
            prop_assert!((p - p1).length() < 1e-9);
        }

        #[test]
        fn sub_vector_undoes_add(p in point3_f64(), q in point3_f64()) {
            let v = q - Point3f::zero();
            let r = (p + v) - v;
            prop_assert!((r - p).length() < 1e-9);
            let lo = Point3f::zero() - v;
            prop_assert!((lo + v - Point3f::zero()).length() < 1e-9);
        }
    }
}
