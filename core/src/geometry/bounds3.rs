//! 3-D Axis Aligned Bounding Boxes.

use super::{Point3, Ray};
use crate::base::{max, min, Float};
use num_traits::Num;
use std::fmt;

/// 3-D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds3<T> {
    /// Minimum bounds.
    pub p_min: Point3<T>,

    /// Maximum bounds.
    pub p_max: Point3<T>,
}

/// 3-D bounding box containing `Float` points.
pub type Bounds3f = Bounds3<Float>;

impl<T: Num + PartialOrd + Copy> Bounds3<T> {
    /// Creates a new 3-D bounding box from 2 points. The minimum and maximum
    /// bounds are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point3<T>, p2: Point3<T>) -> Self {
        Self {
            p_min: Point3::new(min(p1.x, p2.x), min(p1.y, p2.y), min(p1.z, p2.z)),
            p_max: Point3::new(max(p1.x, p2.x), max(p1.y, p2.y), max(p1.z, p2.z)),
        }
    }
}

impl Bounds3f {
    /// Returns the parametric range `[t0, t1]` of a ray's overlap with the
    /// box using the slab method, or `None` if it misses or the overlap lies
    /// outside `[0, ray.t_max]`.
    ///
    /// * `ray` - The ray.
    pub fn intersect_p(&self, ray: &Ray) -> Option<(Float, Float)> {
        let mut t0 = 0.0;
        let mut t1 = ray.t_max;

        for i in 0..3 {
            // Update interval for i^th bounding box slab. A zero direction
            // component divides to ±∞ which keeps the slab test well defined.
            let inv_ray_dir = 1.0 / ray.d[i];
            let mut t_near = (self.p_min[i] - ray.o[i]) * inv_ray_dir;
            let mut t_far = (self.p_max[i] - ray.o[i]) * inv_ray_dir;
            if t_near > t_far {
                std::mem::swap(&mut t_near, &mut t_far);
            }

            // Origin on a slab plane with a parallel direction gives NaN.
            if t_near.is_nan() || t_far.is_nan() {
                continue;
            }

            t0 = if t_near > t0 { t_near } else { t0 };
            t1 = if t_far < t1 { t_far } else { t1 };
            if t0 > t1 {
                return None;
            }
        }

        Some((t0, t1))
    }
}

impl<T: fmt::Display> fmt::Display for Bounds3<T> {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.p_min, self.p_max)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point3f, Vector3f};
    use float_cmp::*;

    fn unit_cube() -> Bounds3f {
        Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn new_orders_corners() {
        let b = Bounds3f::new(Point3f::new(1.0, -1.0, 2.0), Point3f::new(-1.0, 1.0, 0.0));
        assert_eq!(b.p_min, Point3f::new(-1.0, -1.0, 0.0));
        assert_eq!(b.p_max, Point3f::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn intersect_p_from_inside() {
        let r = Ray::unbounded(Point3f::zero(), Vector3f::new(1.0, 0.0, 0.0));
        let (t0, t1) = unit_cube().intersect_p(&r).unwrap();
        assert_eq!(t0, 0.0);
        assert!(approx_eq!(f64, t1, 1.0, ulps = 2));
    }

    #[test]
    fn intersect_p_oblique_exit() {
        let d = Vector3f::new(1.0, 1.0, 0.0).normalize();
        let r = Ray::unbounded(Point3f::zero(), d);
        let (_, t1) = unit_cube().intersect_p(&r).unwrap();
        assert!(approx_eq!(f64, t1, 2.0_f64.sqrt(), epsilon = 1e-12));
    }

    #[test]
    fn intersect_p_miss() {
        let r = Ray::unbounded(Point3f::new(0.0, 5.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        assert!(unit_cube().intersect_p(&r).is_none());
    }

    #[test]
    fn intersect_p_respects_t_max() {
        let r = Ray::new(Point3f::new(-5.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), 2.0);
        assert!(unit_cube().intersect_p(&r).is_none());
    }
}
