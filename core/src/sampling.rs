//! Common sampling functions.

use crate::base::*;
use crate::geometry::*;

/// Uniformly sample a direction from a sphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_sphere(u: &[Float; 2]) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Sample a point on a unit disk by mapping from a unit square to the unit
/// circle. The concentric mapping takes points in [-1, 1]^2 to unit disk by
/// uniformly mapping concentric squares to concentric circles.
///
/// * `u` - The random sample point.
pub fn concentric_sample_disk(u: &[Float; 2]) -> (Float, Float) {
    // Map uniform random numbers to [-1,1]^2.
    let ox = 2.0 * u[0] - 1.0;
    let oy = 2.0 * u[1] - 1.0;

    // Handle degeneracy at the origin.
    if ox == 0.0 && oy == 0.0 {
        return (0.0, 0.0);
    }

    // Apply concentric mapping to point.
    let (r, theta) = if abs(ox) > abs(oy) {
        (ox, PI_OVER_FOUR * (oy / ox))
    } else {
        (oy, PI_OVER_TWO - PI_OVER_FOUR * (ox / oy))
    };
    (r * theta.cos(), r * theta.sin())
}

/// Cosine-weighted sample of a direction on the +z hemisphere using Malley's
/// method.
///
/// * `u` - The random sample point.
#[inline]
pub fn cosine_sample_hemisphere(u: &[Float; 2]) -> Vector3f {
    let (x, y) = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - x * x - y * y).sqrt();
    Vector3f::new(x, y, z)
}

/// Returns a distance drawn from an exponential distribution by inverting its
/// CDF.
///
/// * `u`    - Uniform sample in [0, 1).
/// * `rate` - Rate parameter (inverse mean).
#[inline]
pub fn sample_exponential(u: Float, rate: Float) -> Float {
    -(1.0 - u).ln() / rate
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RNG;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn exponential_mean_matches_rate() {
        let mut rng = RNG::new(1);
        let n = 50_000;
        let rate = 0.25;
        let mean = (0..n)
            .map(|_| sample_exponential(rng.uniform_float(), rate))
            .sum::<Float>()
            / n as Float;
        assert!((mean - 4.0).abs() < 0.1, "mean = {}", mean);
    }

    #[test]
    fn exponential_at_zero() {
        assert_eq!(sample_exponential(0.0, 2.0), 0.0);
    }

    #[test]
    fn concentric_centre() {
        assert_eq!(concentric_sample_disk(&[0.5, 0.5]), (0.0, 0.0));
    }

    proptest! {
        #[test]
        fn sphere_samples_are_unit(u0 in 0.0..1.0f64, u1 in 0.0..1.0f64) {
            let v = uniform_sample_sphere(&[u0, u1]);
            prop_assert!(approx_eq!(f64, v.length(), 1.0, epsilon = 1e-12));
        }

        #[test]
        fn cosine_samples_face_up(u0 in 0.0..1.0f64, u1 in 0.0..1.0f64) {
            let c = cosine_sample_hemisphere(&[u0, u1]);
            prop_assert!(c.z >= 0.0);
            prop_assert!(approx_eq!(f64, c.length(), 1.0, epsilon = 1e-9));
        }

        #[test]
        fn disk_samples_inside_unit_circle(u0 in 0.0..1.0f64, u1 in 0.0..1.0f64) {
            let (x, y) = concentric_sample_disk(&[u0, u1]);
            prop_assert!(x * x + y * y <= 1.0 + 1e-12);
        }
    }
}
