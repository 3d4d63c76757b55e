//! Field descriptions built from parameter sets

use super::*;
use crate::base::*;
use crate::error::*;
use crate::paramset::ParamSet;
use std::fmt;

/// Default number of photon walks per field.
pub const DEFAULT_HOPS: u64 = 500_000;

/// The two field variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Probability that a photon emitted in a voxel is captured by the
    /// aperture.
    Detector,

    /// Probability that a photon emitted by the aperture reaches a voxel.
    Emitter,
}

impl fmt::Display for FieldKind {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detector => write!(f, "DetectorField"),
            Self::Emitter => write!(f, "EmitterField"),
        }
    }
}

/// A named, validated field simulation job.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescription {
    /// Name used for output files.
    pub name: String,

    /// Field variant.
    pub kind: FieldKind,

    /// Validated parameters.
    pub params: SimulationParameters,

    /// Number of photon walks.
    pub hops: u64,

    /// Run-level seed.
    pub seed: u64,
}

impl FieldDescription {
    /// Builds a detector field description.
    ///
    /// * `name`   - Field name.
    /// * `params` - Parameter set from the description file.
    pub fn detector(name: &str, params: &ParamSet) -> Result<Self> {
        let builder = common_parameters(params)?;
        let detector_type = find_one_string(params, "detector_type")?
            .map(|s| s.parse::<DetectorType>())
            .transpose()?
            .unwrap_or_default();
        let (hops, seed) = run_budget(params)?;

        reject_unused(params)?;
        Ok(Self {
            name: name.to_owned(),
            kind: FieldKind::Detector,
            params: builder.with_detector_type(detector_type).build()?,
            hops,
            seed,
        })
    }

    /// Builds an emitter field description.
    ///
    /// * `name`   - Field name.
    /// * `params` - Parameter set from the description file.
    pub fn emitter(name: &str, params: &ParamSet) -> Result<Self> {
        let builder = common_parameters(params)?;
        let compression = find_one_float(params, "beam_compression")?
            .ok_or_else(|| FieldError::MissingParameter("beam_compression".into()))?;
        let y_steer = find_one_float(params, "y_steer")?
            .ok_or_else(|| FieldError::MissingParameter("y_steer".into()))?;
        let xy_aspect = find_one_float(params, "beam_xy_aspect")?.unwrap_or(1.0);
        let beam = BeamShape::new(compression, xy_aspect, y_steer)?;
        let (hops, seed) = run_budget(params)?;

        reject_unused(params)?;
        Ok(Self {
            name: name.to_owned(),
            kind: FieldKind::Emitter,
            params: builder
                .with_detector_type(DetectorType::TwoSided)
                .with_beam(beam)
                .build()?,
            hops,
            seed,
        })
    }
}

/// Reads the parameters shared by both variants.
fn common_parameters(params: &ParamSet) -> Result<SimulationParametersBuilder> {
    let dims = find_ints::<3>(params, "dims")?
        .ok_or_else(|| FieldError::MissingParameter("dims".into()))?;
    let mut dims_usize = [0_usize; 3];
    for (d, &n) in dims_usize.iter_mut().zip(dims.iter()) {
        *d = usize::try_from(n)
            .map_err(|_| FieldError::InvalidParameter(format!("dims must be positive, got {:?}", dims)))?;
    }

    let mut builder = SimulationParameters::builder(dims_usize);
    if let Some(pitch) = find_one_float(params, "pitch")? {
        builder = builder.with_pitch(pitch);
    }
    if let Some(g) = find_one_float(params, "anisotropy")? {
        builder = builder.with_anisotropy(g);
    }
    if let Some(l) = find_one_float(params, "absorption_length")? {
        builder = builder.with_absorption_length(l);
    }
    if let Some(l) = find_one_float(params, "scatter_length")? {
        builder = builder.with_scatter_length(l);
    }
    if let Some(size) = find_floats::<3>(params, "emitter_size")? {
        builder = builder.with_emitter_size(size);
    }
    if let Some(spread) = find_one_string(params, "emitter_spread")? {
        builder = builder.with_emitter_spread(spread.parse()?);
    }
    Ok(builder)
}

/// Reads the photon budget and seed.
fn run_budget(params: &ParamSet) -> Result<(u64, u64)> {
    let hops = match find_ints::<1>(params, "hops")? {
        Some([n]) if n > 0 => n as u64,
        Some([n]) => {
            return Err(FieldError::InvalidParameter(format!(
                "hops must be positive, got {}",
                n
            )))
        }
        None => DEFAULT_HOPS,
    };
    let seed = match find_ints::<1>(params, "seed")? {
        Some([n]) if n >= 0 => n as u64,
        Some([n]) => {
            return Err(FieldError::InvalidParameter(format!(
                "seed must be non-negative, got {}",
                n
            )))
        }
        None => 0,
    };
    Ok((hops, seed))
}

/// Fails if any parameter was never looked up.
fn reject_unused(params: &ParamSet) -> Result<()> {
    let unused = params.unused();
    if unused.is_empty() {
        Ok(())
    } else {
        Err(FieldError::UnrecognizedParameter(unused))
    }
}

/// Reports a parameter declared with a different type than expected.
fn check_type(params: &ParamSet, name: &str, expected: &str) -> Result<()> {
    match params.declared_type(name) {
        Some(t) if t != expected => Err(FieldError::InvalidParameter(format!(
            "'{}' must be {}, got {}",
            name, expected, t
        ))),
        _ => Ok(()),
    }
}

fn arity_error(name: &str, expected: usize, got: usize) -> FieldError {
    FieldError::InvalidParameter(format!(
        "'{}' expects {} value(s), got {}",
        name, expected, got
    ))
}

/// Returns exactly `N` float values, accepting integers in their place.
fn find_floats<const N: usize>(params: &ParamSet, name: &str) -> Result<Option<[Float; N]>> {
    let values = match params.find_float(name) {
        Some(v) => v,
        None => match params.find_int(name) {
            Some(v) => v.into_iter().map(|n| n as Float).collect(),
            None => {
                check_type(params, name, "float")?;
                return Ok(None);
            }
        },
    };
    let n = values.len();
    values
        .try_into()
        .map(Some)
        .map_err(|_| arity_error(name, N, n))
}

fn find_one_float(params: &ParamSet, name: &str) -> Result<Option<Float>> {
    Ok(find_floats::<1>(params, name)?.map(|[v]| v))
}

/// Returns exactly `N` integer values.
fn find_ints<const N: usize>(params: &ParamSet, name: &str) -> Result<Option<[Int; N]>> {
    check_type(params, name, "integer")?;
    match params.find_int(name) {
        Some(values) => {
            let n = values.len();
            values
                .try_into()
                .map(Some)
                .map_err(|_| arity_error(name, N, n))
        }
        None => Ok(None),
    }
}

fn find_one_string(params: &ParamSet, name: &str) -> Result<Option<String>> {
    check_type(params, name, "string")?;
    match params.find_string(name) {
        Some(values) => {
            let n = values.len();
            let [s]: [String; 1] = values.try_into().map_err(|_| arity_error(name, 1, n))?;
            Ok(Some(s))
        }
        None => Ok(None),
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn detector_params() -> ParamSet {
        let mut ps = ParamSet::new();
        ps.add_int("dims", &[100, 100, 100]);
        ps
    }

    #[test]
    fn detector_defaults() {
        let ps = detector_params();
        let d = FieldDescription::detector("d0", &ps).unwrap();
        assert_eq!(d.kind, FieldKind::Detector);
        assert_eq!(d.hops, DEFAULT_HOPS);
        assert_eq!(d.seed, 0);
        assert_eq!(d.params.pitch(), 2.2);
        assert_eq!(d.params.detector_type(), DetectorType::OneSided);
        assert_eq!(d.params.emitter_area(), 100.0);
    }

    #[test]
    fn detector_overrides() {
        let mut ps = detector_params();
        ps.add_float("pitch", &[1.0]);
        ps.add_int("emitter_size", &[4, 6, 0]);
        ps.add_string("detector_type", &["two-sided".into()]);
        ps.add_string("emitter_spread", &["lambertian".into()]);
        ps.add_int("hops", &[1000]);
        ps.add_int("seed", &[7]);
        let d = FieldDescription::detector("d1", &ps).unwrap();
        assert_eq!(d.params.pitch(), 1.0);
        assert_eq!(d.params.emitter_size(), [4.0, 6.0, 0.0]);
        assert_eq!(d.params.detector_type(), DetectorType::TwoSided);
        assert_eq!(d.params.emitter_spread(), EmitterSpread::Lambertian);
        assert_eq!((d.hops, d.seed), (1000, 7));
    }

    #[test]
    fn missing_dims() {
        let ps = ParamSet::new();
        assert!(matches!(
            FieldDescription::detector("d", &ps),
            Err(FieldError::MissingParameter(ref p)) if p == "dims"
        ));
    }

    #[test]
    fn unrecognized_keys() {
        let mut ps = detector_params();
        ps.add_float("y_steer", &[10.0]);
        ps.add_string("colour", &["red".into()]);
        match FieldDescription::detector("d", &ps) {
            Err(FieldError::UnrecognizedParameter(names)) => {
                assert_eq!(names.len(), 2);
                assert!(names.iter().any(|n| n.contains("y_steer")));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn wrong_type_and_arity() {
        let mut ps = ParamSet::new();
        ps.add_float("dims", &[10.0, 10.0, 10.0]);
        assert!(matches!(
            FieldDescription::detector("d", &ps),
            Err(FieldError::InvalidParameter(_))
        ));

        let mut ps = ParamSet::new();
        ps.add_int("dims", &[10, 10]);
        assert!(matches!(
            FieldDescription::detector("d", &ps),
            Err(FieldError::InvalidParameter(_))
        ));

        let mut ps = detector_params();
        ps.add_int("dims", &[10, -10, 10]);
        assert!(matches!(
            FieldDescription::detector("d", &ps),
            Err(FieldError::InvalidParameter(_))
        ));
    }

    #[test]
    fn emitter_requires_beam_keys() {
        let mut ps = detector_params();
        ps.add_float("beam_compression", &[2.0]);
        assert!(matches!(
            FieldDescription::emitter("e", &ps),
            Err(FieldError::MissingParameter(ref p)) if p == "y_steer"
        ));

        ps.add_float("y_steer", &[5.0]);
        let e = FieldDescription::emitter("e", &ps).unwrap();
        assert_eq!(e.kind, FieldKind::Emitter);
        let beam = e.params.beam().unwrap();
        assert_eq!((beam.compression, beam.xy_aspect, beam.y_steer), (2.0, 1.0, 5.0));
    }

    #[test]
    fn emitter_rejects_detector_type() {
        let mut ps = detector_params();
        ps.add_float("beam_compression", &[2.0]);
        ps.add_float("y_steer", &[0.0]);
        ps.add_string("detector_type", &["one-sided".into()]);
        assert!(matches!(
            FieldDescription::emitter("e", &ps),
            Err(FieldError::UnrecognizedParameter(_))
        ));
    }
}
