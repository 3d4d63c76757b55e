//! Phase Function

use super::HenyeyGreenstein;
use crate::base::*;
use crate::geometry::*;
use std::fmt;

/// Models the angular distribution of scattering in volumetric media.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PhaseFunction {
    HenyeyGreenstein(HenyeyGreenstein),
}

impl PhaseFunction {
    /// Returns the density of the phase function for a deflection angle.
    ///
    /// * `cos_theta` - Cosine of the deflection angle.
    pub fn p(&self, cos_theta: Float) -> Float {
        match self {
            PhaseFunction::HenyeyGreenstein(f) => f.p(cos_theta),
        }
    }

    /// Returns the phase function value and sampled direction of travel
    /// given the current direction and a sample value in [0, 1)^2, or `None`
    /// if the sample hit a singularity and should be redrawn.
    ///
    /// * `w` - Current unit direction of travel.
    /// * `u` - Sample value in [0, 1)^2.
    pub fn sample_p(&self, w: &Vector3f, u: &[Float; 2]) -> Option<(Float, Vector3f)> {
        match self {
            PhaseFunction::HenyeyGreenstein(f) => f.sample_p(w, u),
        }
    }
}

impl From<HenyeyGreenstein> for PhaseFunction {
    fn from(hg: HenyeyGreenstein) -> Self {
        PhaseFunction::HenyeyGreenstein(hg)
    }
}

impl fmt::Display for PhaseFunction {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[PhaseFunction ")?;
        match self {
            Self::HenyeyGreenstein(h) => write!(f, "{}", h)?,
        }
        write!(f, "]")
    }
}
