//! Beam shaping

use crate::base::*;
use crate::error::*;
use crate::geometry::*;

/// Anisotropic narrowing and tilt applied to an isotropic direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BeamShape {
    /// Divisor applied to the transverse components. Values above 1 narrow
    /// the beam around the z axis.
    pub compression: Float,

    /// Additional divisor for the y component relative to x.
    pub xy_aspect: Float,

    /// Rotation about the x axis in degrees. Positive values tilt +z
    /// towards +y.
    pub y_steer: Float,
}

impl BeamShape {
    /// Returns a validated `BeamShape`.
    ///
    /// * `compression` - Transverse compression factor (> 0).
    /// * `xy_aspect`   - y/x compression ratio (> 0).
    /// * `y_steer`     - Tilt about the x axis in degrees.
    pub fn new(compression: Float, xy_aspect: Float, y_steer: Float) -> Result<Self> {
        if !(compression > 0.0 && compression.is_finite()) {
            return Err(FieldError::InvalidParameter(format!(
                "beam_compression must be positive, got {}",
                compression
            )));
        }
        if !(xy_aspect > 0.0 && xy_aspect.is_finite()) {
            return Err(FieldError::InvalidParameter(format!(
                "beam_xy_aspect must be positive, got {}",
                xy_aspect
            )));
        }
        if !y_steer.is_finite() {
            return Err(FieldError::InvalidParameter(format!(
                "y_steer must be finite, got {}",
                y_steer
            )));
        }
        Ok(Self {
            compression,
            xy_aspect,
            y_steer,
        })
    }

    /// Shapes an isotropic unit direction. Returns `None` when the
    /// compressed vector has no usable length and a new direction should be
    /// drawn.
    ///
    /// * `w` - Isotropic unit direction.
    pub fn shape(&self, w: &Vector3f) -> Option<Vector3f> {
        let v = Vector3f::new(
            w.x / self.compression,
            w.y / (self.compression * self.xy_aspect),
            w.z,
        );
        let len = v.length();
        if !(len > 0.0 && len.is_finite()) {
            return None;
        }
        let v = v / len;

        let (sin_a, cos_a) = radians(self.y_steer).sin_cos();
        Some(Vector3f::new(
            v.x,
            v.y * cos_a + v.z * sin_a,
            -v.y * sin_a + v.z * cos_a,
        ))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
