//! Emission policies

use crate::error::*;
use std::fmt;
use std::str::FromStr;

/// Angular distribution of directions leaving the aperture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EmitterSpread {
    /// Isotropic emission over the full sphere.
    #[default]
    Spherical,

    /// Cosine-weighted emission about the aperture normal.
    Lambertian,
}

impl FromStr for EmitterSpread {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "spherical" => Ok(Self::Spherical),
            "lambertian" => Ok(Self::Lambertian),
            _ => Err(FieldError::InvalidParameter(format!(
                "unknown emitter_spread '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for EmitterSpread {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spherical => write!(f, "spherical"),
            Self::Lambertian => write!(f, "lambertian"),
        }
    }
}

/// Which half-spaces the aperture faces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DetectorType {
    /// The aperture only faces +z.
    #[default]
    OneSided,

    /// The aperture faces both +z and -z.
    TwoSided,
}

impl FromStr for DetectorType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "one-sided" => Ok(Self::OneSided),
            "two-sided" => Ok(Self::TwoSided),
            _ => Err(FieldError::InvalidParameter(format!(
                "unknown detector_type '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for DetectorType {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneSided => write!(f, "one-sided"),
            Self::TwoSided => write!(f, "two-sided"),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        for s in ["spherical", "lambertian"] {
            assert_eq!(s.parse::<EmitterSpread>().unwrap().to_string(), s);
        }
        for s in ["one-sided", "two-sided"] {
            assert_eq!(s.parse::<DetectorType>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn unknown_values_rejected() {
        assert!(matches!(
            "conical".parse::<EmitterSpread>(),
            Err(FieldError::InvalidParameter(_))
        ));
        assert!(matches!(
            "One-Sided".parse::<DetectorType>(),
            Err(FieldError::InvalidParameter(_))
        ));
    }
}
