//! Henyey-Greenstein

use crate::base::*;
use crate::geometry::*;
use std::fmt;

/// Below this magnitude of `g` the closed form loses precision and the phase
/// function is sampled as isotropic.
const ISOTROPIC_THRESHOLD: Float = 1e-3;

/// Henyey-Greenstein phase function.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HenyeyGreenstein {
    /// The asymmetry parameter. It is the mean cosine of the deflection
    /// angle; 0 is isotropic and values near 1 are strongly forward
    /// scattering.
    pub g: Float,
}

impl HenyeyGreenstein {
    /// Returns a new `HenyeyGreenstein`.
    ///
    /// * `g` - The asymmetry parameter in [-1, 1].
    pub fn new(g: Float) -> Self {
        Self { g }
    }

    /// Returns the value of the phase function for a deflection angle.
    ///
    /// * `cos_theta` - Cosine of the angle between the direction of travel
    ///                 before and after scattering.
    pub fn p(&self, cos_theta: Float) -> Float {
        phase_hg(cos_theta, self.g)
    }

    /// Samples the cosine of the deflection angle. Returns `None` when the
    /// result is not a finite value in [-1, 1] (only possible for |g| = 1 at
    /// the ends of the sample range).
    ///
    /// * `u` - Sample value in [0, 1).
    pub fn sample_cos_theta(&self, u: Float) -> Option<Float> {
        let g = self.g;
        let cos_theta = if abs(g) < ISOTROPIC_THRESHOLD {
            1.0 - 2.0 * u
        } else {
            let sqr_term = (1.0 - g * g) / (1.0 + g - 2.0 * g * u);
            (1.0 + g * g - sqr_term * sqr_term) / (2.0 * g)
        };

        if cos_theta.is_finite() {
            Some(clamp(cos_theta, -1.0, 1.0))
        } else {
            None
        }
    }

    /// Returns the phase function value and the new direction of travel
    /// given the current direction and a sample value in [0, 1)^2.
    ///
    /// * `w` - Current unit direction of travel.
    /// * `u` - Sample value in [0, 1)^2.
    pub fn sample_p(&self, w: &Vector3f, u: &[Float; 2]) -> Option<(Float, Vector3f)> {
        let cos_theta = self.sample_cos_theta(u[0])?;

        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        let phi = TWO_PI * u[1];

        let (v1, v2) = coordinate_system(w);
        let wi = spherical_direction_in_coord_frame(sin_theta, cos_theta, phi, &v1, &v2, w);
        let len = wi.length();
        if len == 0.0 || !len.is_finite() {
            return None;
        }

        Some((self.p(cos_theta), wi / len))
    }
}

impl fmt::Display for HenyeyGreenstein {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HenyeyGreenstein g: {}", self.g)
    }
}

/// Computes the Henyey-Greenstein density for a deflection angle. Positive
/// `g` favours `cos_theta` near 1 (forward scattering).
///
/// * `cos_theta` - Cosine of the deflection angle.
/// * `g`         - Asymmetry parameter.
#[inline]
pub fn phase_hg(cos_theta: Float, g: Float) -> Float {
    let denom = 1.0 + g * g - 2.0 * g * cos_theta;
    INV_FOUR_PI * (1.0 - g * g) / (denom * denom.sqrt())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
