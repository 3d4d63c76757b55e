//! Aperture emitter

use crate::RectangularAperture;
use photon_core::base::*;
use photon_core::emitter::*;
use photon_core::geometry::*;
use photon_core::params::*;
use photon_core::photon::PhotonState;
use photon_core::rng::RNG;
use photon_core::sampling::*;

/// Launches photons from a rectangular aperture with a configurable
/// angular distribution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ApertureEmitter {
    /// Emitting surface.
    aperture: RectangularAperture,

    /// Angular distribution about the aperture normal.
    spread: EmitterSpread,

    /// Half-spaces the aperture faces.
    detector_type: DetectorType,

    /// Optional beam shaping applied to isotropic directions.
    beam: Option<BeamShape>,

    /// Weight launches so that the walks estimate the response of a
    /// cosine-weighted source whatever the sampled spread.
    reciprocal: bool,
}

impl ApertureEmitter {
    /// Create a new `ApertureEmitter`.
    ///
    /// * `aperture`      - Emitting surface.
    /// * `spread`        - Angular distribution.
    /// * `detector_type` - Half-spaces the aperture faces.
    /// * `beam`          - Optional beam shaping.
    pub fn new(
        aperture: RectangularAperture,
        spread: EmitterSpread,
        detector_type: DetectorType,
        beam: Option<BeamShape>,
    ) -> Self {
        Self {
            aperture,
            spread,
            detector_type,
            beam,
            reciprocal: false,
        }
    }

    /// Create the source of a detector field. A photon emitted in a voxel
    /// reaches the aperture along the reverse of a walk launched from it, so
    /// the detector walks are launched from the aperture weighted relative to
    /// a cosine-weighted source. Beam shaping does not apply to a detector.
    ///
    /// * `params` - Validated simulation parameters.
    pub fn detector(params: &SimulationParameters) -> Self {
        let [width, height, _] = params.emitter_size();
        if params.beam().is_some() {
            warn!("Beam shaping is ignored for a detector aperture");
        }
        let emitter = Self {
            reciprocal: true,
            ..Self::new(
                RectangularAperture::new(width, height),
                params.emitter_spread(),
                params.detector_type(),
                None,
            )
        };
        debug!(
            "Detector aperture {}x{} {} {}",
            width, height, emitter.spread, emitter.detector_type
        );
        emitter
    }

    /// Returns the emitting surface.
    pub fn aperture(&self) -> &RectangularAperture {
        &self.aperture
    }

    /// Samples an unshaped direction for the configured spread and facing.
    ///
    /// * `rng` - Random number generator of the calling worker.
    fn sample_spread(&self, rng: &mut RNG) -> Vector3f {
        let w = match self.spread {
            EmitterSpread::Spherical => uniform_sample_sphere(&rng.uniform_float2()),
            EmitterSpread::Lambertian => cosine_sample_hemisphere(&rng.uniform_float2()),
        };
        match (self.detector_type, self.spread) {
            (DetectorType::OneSided, _) => Vector3f::new(w.x, w.y, w.z.abs()),
            (DetectorType::TwoSided, EmitterSpread::Lambertian) if rng.uniform_float() < 0.5 => {
                Vector3f::new(w.x, w.y, -w.z)
            }
            (DetectorType::TwoSided, _) => w,
        }
    }

    /// Returns the launch weight of an unshaped direction. Uniformly sampled
    /// directions carry the ratio of the cosine-weighted density to the
    /// uniform one, `2 |cos θ|` for both facings.
    ///
    /// * `w` - Direction returned by `sample_spread`.
    fn launch_weight(&self, w: &Vector3f) -> Float {
        match (self.reciprocal, self.spread) {
            (true, EmitterSpread::Spherical) => 2.0 * w.z.abs(),
            _ => 1.0,
        }
    }
}

impl From<&SimulationParameters> for ApertureEmitter {
    /// Create an `ApertureEmitter` from simulation parameters.
    ///
    /// * `params` - Validated simulation parameters.
    fn from(params: &SimulationParameters) -> Self {
        let [width, height, _] = params.emitter_size();
        let emitter = Self::new(
            RectangularAperture::new(width, height),
            params.emitter_spread(),
            params.detector_type(),
            params.beam().copied(),
        );
        debug!(
            "Aperture {}x{} {} {}{}",
            width,
            height,
            emitter.spread,
            emitter.detector_type,
            if emitter.beam.is_some() { " (beam shaped)" } else { "" }
        );
        emitter
    }
}

impl Emitter for ApertureEmitter {
    /// Samples a position uniformly on the aperture and a direction from
    /// the spread policy, shaped by the beam if one is configured.
    ///
    /// * `rng` - Random number generator of the calling worker.
    fn sample_photon(&self, rng: &mut RNG) -> EmitterSample {
        let p = self.aperture.sample_point(&rng.uniform_float2());

        let mut resamples = 0;
        let d = loop {
            let w = self.sample_spread(rng);
            match &self.beam {
                None => break w,
                Some(beam) => match beam.shape(&w) {
                    Some(v) => break v,
                    None => resamples += 1,
                },
            }
        };

        EmitterSample {
            photon: PhotonState::launch(p, d).with_weight(self.launch_weight(&d)),
            resamples,
        }
    }

    /// Returns the aperture area.
    fn area(&self) -> Float {
        self.aperture.area()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use photon_core::photon::PhotonFate;

    fn emitter(spread: EmitterSpread, detector_type: DetectorType) -> ApertureEmitter {
        ApertureEmitter::new(RectangularAperture::new(10.0, 6.0), spread, detector_type, None)
    }

    #[test]
    fn one_sided_faces_up() {
        let e = emitter(EmitterSpread::Spherical, DetectorType::OneSided);
        let mut rng = RNG::new(1);
        for _ in 0..1000 {
            let s = e.sample_photon(&mut rng);
            assert!(s.photon.d.z >= 0.0);
            assert_eq!(s.photon.fate, PhotonFate::Launched);
            assert_eq!(s.photon.weight, 1.0);
            assert!(s.photon.p.x.abs() <= 5.0 && s.photon.p.y.abs() <= 3.0);
            assert!(approx_eq!(f64, s.photon.d.length(), 1.0, epsilon = 1e-12));
        }
    }

    #[test]
    fn two_sided_covers_both_halves() {
        for spread in [EmitterSpread::Spherical, EmitterSpread::Lambertian] {
            let e = emitter(spread, DetectorType::TwoSided);
            let mut rng = RNG::new(2);
            let n = 20_000;
            let down = (0..n)
                .filter(|_| e.sample_photon(&mut rng).photon.d.z < 0.0)
                .count();
            let frac = down as Float / n as Float;
            assert!((frac - 0.5).abs() < 0.02, "{} frac = {}", spread, frac);
        }
    }

    #[test]
    fn lambertian_mean_cosine() {
        // E[cos θ] = 2/3 for a cosine-weighted hemisphere.
        let e = emitter(EmitterSpread::Lambertian, DetectorType::OneSided);
        let mut rng = RNG::new(4);
        let n = 50_000;
        let mean = (0..n)
            .map(|_| e.sample_photon(&mut rng).photon.d.z)
            .sum::<Float>()
            / n as Float;
        assert!((mean - 2.0 / 3.0).abs() < 0.01, "mean = {}", mean);
    }

    #[test]
    fn beam_narrows_spread() {
        let beam = BeamShape::new(8.0, 1.0, 0.0).unwrap();
        let e = ApertureEmitter::new(
            RectangularAperture::new(10.0, 10.0),
            EmitterSpread::Spherical,
            DetectorType::TwoSided,
            Some(beam),
        );
        let mut rng = RNG::new(6);
        let n = 5000;
        let mean_abs_z = (0..n)
            .map(|_| e.sample_photon(&mut rng).photon.d.z.abs())
            .sum::<Float>()
            / n as Float;
        // Isotropic mean |z| is 0.5.
        assert!(mean_abs_z > 0.8, "mean |z| = {}", mean_abs_z);
    }

    #[test]
    fn steered_beam_tilts_towards_y() {
        let beam = BeamShape::new(20.0, 1.0, 30.0).unwrap();
        let e = ApertureEmitter::new(
            RectangularAperture::new(10.0, 10.0),
            EmitterSpread::Spherical,
            DetectorType::TwoSided,
            Some(beam),
        );
        let mut rng = RNG::new(8);
        // Directions cluster around ±(0, sin 30°, cos 30°).
        let axis = Vector3f::new(0.0, 0.5, 0.75_f64.sqrt());
        let n = 5000;
        let (mut along_axis, mut along_z) = (0.0, 0.0);
        for _ in 0..n {
            let d = e.sample_photon(&mut rng).photon.d;
            along_axis += d.dot(&axis).abs();
            along_z += d.z.abs();
        }
        along_axis /= n as Float;
        along_z /= n as Float;
        assert!(along_axis > 0.9, "mean |d.axis| = {}", along_axis);
        assert!(along_axis > along_z);
    }

    #[test]
    fn detector_weights_match_a_cosine_source() {
        for detector_type in [DetectorType::OneSided, DetectorType::TwoSided] {
            let params = SimulationParameters::builder([10, 10, 10])
                .with_emitter_size([4.0, 4.0, 0.0])
                .with_detector_type(detector_type)
                .build()
                .unwrap();
            let e = ApertureEmitter::detector(&params);
            let mut rng = RNG::new(10);
            let n = 50_000;
            let (mut weight, mut weighted_cos) = (0.0, 0.0);
            for _ in 0..n {
                let photon = e.sample_photon(&mut rng).photon;
                assert!(photon.weight >= 0.0 && photon.weight <= 2.0);
                weight += photon.weight;
                weighted_cos += photon.weight * photon.d.z.abs();
            }
            weight /= n as Float;
            weighted_cos /= n as Float;
            // Unit mean weight and the mean cosine of a cosine-weighted source.
            assert!((weight - 1.0).abs() < 0.01, "{} weight = {}", detector_type, weight);
            assert!(
                (weighted_cos - 2.0 / 3.0).abs() < 0.01,
                "{} mean cos = {}",
                detector_type,
                weighted_cos
            );
        }
    }

    #[test]
    fn lambertian_detector_launches_unit_weight() {
        let params = SimulationParameters::builder([10, 10, 10])
            .with_emitter_spread(EmitterSpread::Lambertian)
            .build()
            .unwrap();
        let e = ApertureEmitter::detector(&params);
        let mut rng = RNG::new(12);
        assert!((0..1000).all(|_| e.sample_photon(&mut rng).photon.weight == 1.0));
    }

    #[test]
    fn detector_drops_beam_shaping() {
        let params = SimulationParameters::builder([10, 10, 10])
            .with_beam(BeamShape::new(8.0, 1.0, 0.0).unwrap())
            .build()
            .unwrap();
        let e = ApertureEmitter::detector(&params);
        assert!(e.beam.is_none());
        assert!(ApertureEmitter::from(&params).beam.is_some());
    }

    #[test]
    fn from_parameters() {
        let params = SimulationParameters::builder([10, 10, 10])
            .with_emitter_size([4.0, 8.0, 0.0])
            .build()
            .unwrap();
        let e = ApertureEmitter::from(&params);
        assert_eq!(e.area(), 32.0);
        assert_eq!(e.aperture().width, 4.0);
    }
}
