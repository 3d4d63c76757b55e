//! Rays

use super::{Point3f, Vector3f};
use crate::base::{Float, INFINITY};
use std::fmt;

/// A semi-infinite line specified by its origin and direction.
#[derive(Copy, Clone, Debug, Default)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Maximum extent of the ray.
    pub t_max: Float,
}

impl Ray {
    /// Returns a new ray.
    ///
    /// * `o`     - Origin.
    /// * `d`     - Direction.
    /// * `t_max` - Maximum extent of the ray.
    pub fn new(o: Point3f, d: Vector3f, t_max: Float) -> Self {
        Self { o, d, t_max }
    }

    /// Returns a ray with unbounded extent.
    ///
    /// * `o` - Origin.
    /// * `d` - Direction.
    pub fn unbounded(o: Point3f, d: Vector3f) -> Self {
        Self::new(o, d, INFINITY)
    }
}

impl fmt::Display for Ray {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[o={}, d={}, t_max={}]", self.o, self.d, self.t_max)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_has_infinite_extent() {
        let r = Ray::unbounded(Point3f::new(1.0, 2.0, 3.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(r.t_max.is_infinite());
        assert_eq!(r.to_string(), "[o=[1, 2, 3], d=[0, 0, 1], t_max=inf]");
    }
}
