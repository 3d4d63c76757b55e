//! Common

use num_traits::Num;
use std::ops::{Add, Mul, Neg};

/// Use 64-bit precision for floating point numbers. Free paths are long
/// compared to the voxel pitch and a run adds millions of small track lengths
/// into the same voxels.
pub type Float = f64;

/// Integer type used by parameter sets.
pub type Int = i64;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f64::consts::PI;

/// PI/2 (π/2)
pub const PI_OVER_TWO: Float = PI * 0.5;

/// PI/4 (π/4)
pub const PI_OVER_FOUR: Float = PI * 0.25;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// 4*PI (4π)
pub const FOUR_PI: Float = PI * 4.0;

/// 1/4*PI (1/4π)
pub const INV_FOUR_PI: Float = 1.0 / FOUR_PI;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Clamps a value to the closed interval [low, high].
///
/// * `x`    - The value.
/// * `low`  - Lower bound.
/// * `high` - Upper bound.
#[inline(always)]
pub fn clamp<T>(x: T, low: T, high: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if x < low {
        low
    } else if x > high {
        high
    } else {
        x
    }
}

/// Linearly interpolate between two points for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t` - Parameter.
/// * `p0` - Point at t=0.
/// * `p1` - Point at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

/// Convert degrees to radians.
///
/// * `deg` - Angle in degrees.
#[inline(always)]
pub fn radians(deg: Float) -> Float {
    (PI / 180.0) * deg
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn clamp_limits() {
        assert_eq!(clamp(-2.0, -1.0, 1.0), -1.0);
        assert_eq!(clamp(2.0, -1.0, 1.0), 1.0);
        assert_eq!(clamp(0.25, -1.0, 1.0), 0.25);
        assert_eq!(clamp(7, 0, 5), 5);
    }

    #[test]
    fn lerp_end_points() {
        assert_eq!(lerp(0.0, 2.0, 4.0), 2.0);
        assert_eq!(lerp(1.0, 2.0, 4.0), 4.0);
        assert_eq!(lerp(0.5, 2.0, 4.0), 3.0);
    }

    proptest! {
        #[test]
        fn radians_scale(deg in -720.0..720.0f64) {
            prop_assert!(approx_eq!(f64, radians(deg) * 180.0 / PI, deg, epsilon = 1e-9));
        }

        #[test]
        fn min_max_ordered(a in -100.0..100.0f64, b in -100.0..100.0f64) {
            prop_assert!(min(a, b) <= max(a, b));
            prop_assert_eq!(abs(a - b), max(a, b) - min(a, b));
        }
    }
}
