//! Geometry utility functions

use super::Vector3f;
use crate::base::Float;

/// Returns a direction (x, y, z) for spherical coordinates (θ, Ø) with respect
/// to a coordinate frame.
///
/// * `sin_theta` - sin(θ).
/// * `cos_theta` - cos(θ).
/// * `phi`       - Ø.
/// * `x`         - Basis vector representing x-axis.
/// * `y`         - Basis vector representing y-axis.
/// * `z`         - Basis vector representing z-axis.
#[inline]
pub fn spherical_direction_in_coord_frame(
    sin_theta: Float,
    cos_theta: Float,
    phi: Float,
    x: &Vector3f,
    y: &Vector3f,
    z: &Vector3f,
) -> Vector3f {
    sin_theta * phi.cos() * x + sin_theta * phi.sin() * y + cos_theta * z
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::PI_OVER_TWO;
    use crate::geometry::coordinate_system;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn standard_frame() {
        let x = Vector3f::new(1.0, 0.0, 0.0);
        let y = Vector3f::new(0.0, 1.0, 0.0);
        let z = Vector3f::new(0.0, 0.0, 1.0);
        let v = spherical_direction_in_coord_frame(0.0, 1.0, 0.0, &x, &y, &z);
        assert_eq!(v, z);

        let v = spherical_direction_in_coord_frame(1.0, 0.0, PI_OVER_TWO, &x, &y, &z);
        assert!(approx_eq!(f64, v.y, 1.0, ulps = 2));
        assert!(v.x.abs() < 1e-15);
    }

    crate::prop_unit_vector3!(unit_vector3);

    proptest! {
        #[test]
        fn frame_direction_is_unit(
            z in unit_vector3(),
            cos_theta in -1.0..1.0f64,
            phi in 0.0..6.28f64,
        ) {
            let (x, y) = coordinate_system(&z);
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
            let w = spherical_direction_in_coord_frame(sin_theta, cos_theta, phi, &x, &y, &z);
            prop_assert!(approx_eq!(f64, w.length(), 1.0, epsilon = 1e-9));
            prop_assert!(approx_eq!(f64, crate::geometry::Dot::dot(&w, &z), cos_theta, epsilon = 1e-9));
        }
    }
}
