//! Validated simulation parameters

use super::{BeamShape, DetectorType, EmitterSpread};
use crate::base::*;
use crate::error::*;
use std::fmt;

/// Default voxel pitch.
pub const DEFAULT_PITCH: Float = 2.2;

/// Default Henyey-Greenstein asymmetry factor.
pub const DEFAULT_ANISOTROPY: Float = 0.88;

/// Default mean free path before absorption.
pub const DEFAULT_ABSORPTION_LENGTH: Float = 14000.0;

/// Default mean free path before scattering.
pub const DEFAULT_SCATTER_LENGTH: Float = 100.0;

/// Default aperture width and height.
pub const DEFAULT_EMITTER_SIZE: [Float; 3] = [10.0, 10.0, 0.0];

/// Immutable, validated parameters of one field simulation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationParameters {
    pitch: Float,
    anisotropy: Float,
    absorption_length: Float,
    scatter_length: Float,
    dims: [usize; 3],
    emitter_size: [Float; 3],
    emitter_spread: EmitterSpread,
    detector_type: DetectorType,
    beam: Option<BeamShape>,
}

impl SimulationParameters {
    /// Returns a builder for a grid of the given shape with all other
    /// parameters at their defaults.
    ///
    /// * `dims` - Number of voxels along each axis.
    pub const fn builder(dims: [usize; 3]) -> SimulationParametersBuilder {
        SimulationParametersBuilder {
            pitch: DEFAULT_PITCH,
            anisotropy: DEFAULT_ANISOTROPY,
            absorption_length: DEFAULT_ABSORPTION_LENGTH,
            scatter_length: DEFAULT_SCATTER_LENGTH,
            dims,
            emitter_size: DEFAULT_EMITTER_SIZE,
            emitter_spread: EmitterSpread::Spherical,
            detector_type: DetectorType::OneSided,
            beam: None,
        }
    }

    /// Voxel edge length in world units.
    pub fn pitch(&self) -> Float {
        self.pitch
    }

    /// Henyey-Greenstein asymmetry factor g.
    pub fn anisotropy(&self) -> Float {
        self.anisotropy
    }

    /// Mean free path before absorption.
    pub fn absorption_length(&self) -> Float {
        self.absorption_length
    }

    /// Mean free path before scattering.
    pub fn scatter_length(&self) -> Float {
        self.scatter_length
    }

    /// Number of voxels along each axis.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Aperture size (width, height, 0).
    pub fn emitter_size(&self) -> [Float; 3] {
        self.emitter_size
    }

    /// Aperture area (width × height).
    pub fn emitter_area(&self) -> Float {
        self.emitter_size[0] * self.emitter_size[1]
    }

    /// Angular distribution of emitted directions.
    pub fn emitter_spread(&self) -> EmitterSpread {
        self.emitter_spread
    }

    /// Half-spaces the aperture faces.
    pub fn detector_type(&self) -> DetectorType {
        self.detector_type
    }

    /// Beam shaping of the emitter variant.
    pub fn beam(&self) -> Option<&BeamShape> {
        self.beam.as_ref()
    }
}

impl fmt::Display for SimulationParameters {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dims {:?}, pitch {}, g {}, scatter {}, absorption {}, aperture {}x{}, {} {}",
            self.dims,
            self.pitch,
            self.anisotropy,
            self.scatter_length,
            self.absorption_length,
            self.emitter_size[0],
            self.emitter_size[1],
            self.emitter_spread,
            self.detector_type,
        )?;
        if let Some(beam) = &self.beam {
            write!(
                f,
                ", beam compression {} aspect {} steer {}°",
                beam.compression, beam.xy_aspect, beam.y_steer
            )?;
        }
        Ok(())
    }
}

/// Collects simulation parameters and validates them in `build`.
#[derive(Copy, Clone, Debug)]
pub struct SimulationParametersBuilder {
    pitch: Float,
    anisotropy: Float,
    absorption_length: Float,
    scatter_length: Float,
    dims: [usize; 3],
    emitter_size: [Float; 3],
    emitter_spread: EmitterSpread,
    detector_type: DetectorType,
    beam: Option<BeamShape>,
}

impl SimulationParametersBuilder {
    pub const fn with_pitch(self, pitch: Float) -> Self {
        Self { pitch, ..self }
    }

    pub const fn with_anisotropy(self, anisotropy: Float) -> Self {
        Self { anisotropy, ..self }
    }

    pub const fn with_absorption_length(self, absorption_length: Float) -> Self {
        Self {
            absorption_length,
            ..self
        }
    }

    pub const fn with_scatter_length(self, scatter_length: Float) -> Self {
        Self {
            scatter_length,
            ..self
        }
    }

    pub const fn with_emitter_size(self, emitter_size: [Float; 3]) -> Self {
        Self {
            emitter_size,
            ..self
        }
    }

    pub const fn with_emitter_spread(self, emitter_spread: EmitterSpread) -> Self {
        Self {
            emitter_spread,
            ..self
        }
    }

    pub const fn with_detector_type(self, detector_type: DetectorType) -> Self {
        Self {
            detector_type,
            ..self
        }
    }

    pub const fn with_beam(self, beam: BeamShape) -> Self {
        Self {
            beam: Some(beam),
            ..self
        }
    }

    /// Validates the parameters.
    pub fn build(self) -> Result<SimulationParameters> {
        if !(self.pitch > 0.0 && self.pitch.is_finite()) {
            return Err(invalid(format!("pitch must be positive, got {}", self.pitch)));
        }
        if !(-1.0..=1.0).contains(&self.anisotropy) {
            return Err(invalid(format!(
                "anisotropy must lie in [-1, 1], got {}",
                self.anisotropy
            )));
        }
        // Infinite lengths disable the corresponding interaction.
        if !(self.absorption_length > 0.0) {
            return Err(invalid(format!(
                "absorption_length must be positive, got {}",
                self.absorption_length
            )));
        }
        if !(self.scatter_length > 0.0) {
            return Err(invalid(format!(
                "scatter_length must be positive, got {}",
                self.scatter_length
            )));
        }
        if self.dims.iter().any(|&n| n == 0) {
            return Err(invalid(format!(
                "dims must be positive, got {:?}",
                self.dims
            )));
        }

        let [width, height, depth] = self.emitter_size;
        if !(width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite()) {
            return Err(invalid(format!(
                "emitter_size width and height must be positive, got {:?}",
                self.emitter_size
            )));
        }
        if depth != 0.0 {
            return Err(invalid(format!(
                "emitter_size must describe a planar aperture (w h 0), got {:?}",
                self.emitter_size
            )));
        }
        let extent_x = self.dims[0] as Float * self.pitch;
        let extent_y = self.dims[1] as Float * self.pitch;
        if width > extent_x || height > extent_y {
            return Err(invalid(format!(
                "aperture {}x{} does not fit the grid extent {}x{}",
                width, height, extent_x, extent_y
            )));
        }

        if let Some(beam) = &self.beam {
            BeamShape::new(beam.compression, beam.xy_aspect, beam.y_steer)?;
        }

        Ok(SimulationParameters {
            pitch: self.pitch,
            anisotropy: self.anisotropy,
            absorption_length: self.absorption_length,
            scatter_length: self.scatter_length,
            dims: self.dims,
            emitter_size: self.emitter_size,
            emitter_spread: self.emitter_spread,
            detector_type: self.detector_type,
            beam: self.beam,
        })
    }
}

fn invalid(msg: String) -> FieldError {
    FieldError::InvalidParameter(msg)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = SimulationParameters::builder([100, 100, 100]).build().unwrap();
        assert_eq!(p.pitch(), 2.2);
        assert_eq!(p.anisotropy(), 0.88);
        assert_eq!(p.absorption_length(), 14000.0);
        assert_eq!(p.scatter_length(), 100.0);
        assert_eq!(p.emitter_size(), [10.0, 10.0, 0.0]);
        assert_eq!(p.emitter_area(), 100.0);
        assert_eq!(p.emitter_spread(), EmitterSpread::Spherical);
        assert_eq!(p.detector_type(), DetectorType::OneSided);
        assert!(p.beam().is_none());
    }

    #[test]
    fn rejects_out_of_range() {
        let b = SimulationParameters::builder([10, 10, 10]);
        let cases = [
            b.with_anisotropy(1.5),
            b.with_anisotropy(Float::NAN),
            b.with_pitch(0.0),
            b.with_scatter_length(-1.0),
            b.with_absorption_length(0.0),
            b.with_absorption_length(Float::NAN),
            b.with_emitter_size([0.0, 10.0, 0.0]),
            b.with_emitter_size([10.0, 10.0, 1.0]),
            b.with_emitter_size([100.0, 10.0, 0.0]),
            SimulationParameters::builder([10, 0, 10]),
        ];
        for case in cases.iter() {
            assert!(
                matches!(case.build(), Err(FieldError::InvalidParameter(_))),
                "{:?}",
                case
            );
        }
    }

    #[test]
    fn accepts_extreme_values() {
        let p = SimulationParameters::builder([10, 10, 10])
            .with_anisotropy(-1.0)
            .with_scatter_length(Float::INFINITY)
            .with_absorption_length(1e30)
            .build()
            .unwrap();
        assert_eq!(p.anisotropy(), -1.0);
    }

    #[test]
    fn beam_is_kept() {
        let beam = BeamShape::new(4.0, 2.0, 15.0).unwrap();
        let p = SimulationParameters::builder([10, 10, 10])
            .with_beam(beam)
            .build()
            .unwrap();
        assert_eq!(p.beam(), Some(&beam));
        assert!(p.to_string().contains("steer 15"));
    }
}
