//! Rectangular aperture

use photon_core::base::*;
use photon_core::geometry::*;

/// Planar rectangular aperture in the z = 0 plane centred on the origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectangularAperture {
    /// Extent along x.
    pub width: Float,

    /// Extent along y.
    pub height: Float,
}

impl RectangularAperture {
    /// Returns a new `RectangularAperture`.
    ///
    /// * `width`  - Extent along x.
    /// * `height` - Extent along y.
    pub fn new(width: Float, height: Float) -> Self {
        Self { width, height }
    }

    /// Returns the aperture area.
    pub fn area(&self) -> Float {
        self.width * self.height
    }

    /// Maps a sample in [0, 1)^2 uniformly onto
    /// `[-w/2, w/2) × [-h/2, h/2) × {0}`.
    ///
    /// * `u` - Sample value in [0, 1)^2.
    pub fn sample_point(&self, u: &[Float; 2]) -> Point3f {
        Point3f::new(
            lerp(u[0], -0.5 * self.width, 0.5 * self.width),
            lerp(u[1], -0.5 * self.height, 0.5 * self.height),
            0.0,
        )
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
    fn corners_and_area() {
        let a = RectangularAperture::new(10.0, 4.0);
        assert_eq!(a.area(), 40.0);
        assert_eq!(a.sample_point(&[0.0, 0.0]), Point3f::new(-5.0, -2.0, 0.0));
        assert_eq!(a.sample_point(&[0.5, 0.5]), Point3f::new(0.0, 0.0, 0.0));
    }

    proptest! {
        #[test]
        fn samples_stay_in_bounds(
            w in 0.1..50.0f64,
            h in 0.1..50.0f64,
            u0 in 0.0..1.0f64,
            u1 in 0.0..1.0f64,
        ) {
            let p = RectangularAperture::new(w, h).sample_point(&[u0, u1]);
            prop_assert!(p.x >= -0.5 * w && p.x <= 0.5 * w);
            prop_assert!(p.y >= -0.5 * h && p.y <= 0.5 * h);
            prop_assert_eq!(p.z, 0.0);
        }
    }
}
