//! Homogeneous Medium

use photon_core::base::*;
use photon_core::geometry::*;
use photon_core::medium::*;
use photon_core::params::SimulationParameters;
use photon_core::rng::RNG;
use photon_core::sampling::sample_exponential;

/// Implements a homogeneous medium representing a region of space with constant
/// σa and σs values throughout its extent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HomogeneousMedium {
    /// Absorption coefficient `σa` is the probability density that a photon
    /// is absorbed per unit distance traveled in the medium.
    sigma_a: Float,

    /// Scattering coefficient `σs` is the probability density of a
    /// scattering event per unit distance.
    sigma_s: Float,

    /// Extinction coefficient `σt = σs + σa`.
    sigma_t: Float,

    /// Angular distribution of scattered directions.
    phase: PhaseFunction,
}

impl HomogeneousMedium {
    /// Create a new `HomogeneousMedium`.
    ///
    /// * `sigma_a` - Absorption coefficient `σa`.
    /// * `sigma_s` - Scattering coefficient `σs`.
    /// * `g`       - The asymmetry parameter for Henyey-Greenstein phase
    ///               function.
    pub fn new(sigma_a: Float, sigma_s: Float, g: Float) -> Self {
        Self {
            sigma_a,
            sigma_s,
            sigma_t: sigma_s + sigma_a,
            phase: HenyeyGreenstein::new(g).into(),
        }
    }

    /// Create a medium from mean free paths.
    ///
    /// * `absorption_length` - Mean distance before absorption.
    /// * `scatter_length`    - Mean distance before scattering.
    /// * `g`                 - Henyey-Greenstein asymmetry parameter.
    pub fn from_lengths(absorption_length: Float, scatter_length: Float, g: Float) -> Self {
        Self::new(1.0 / absorption_length, 1.0 / scatter_length, g)
    }

    /// Returns the absorption coefficient `σa`.
    pub fn sigma_a(&self) -> Float {
        self.sigma_a
    }

    /// Returns the scattering coefficient `σs`.
    pub fn sigma_s(&self) -> Float {
        self.sigma_s
    }

    /// Returns the extinction coefficient `σt`.
    pub fn sigma_t(&self) -> Float {
        self.sigma_t
    }

    /// Returns the phase function.
    pub fn phase(&self) -> &PhaseFunction {
        &self.phase
    }
}

impl From<&SimulationParameters> for HomogeneousMedium {
    /// Create a `HomogeneousMedium` from simulation parameters.
    ///
    /// * `params` - Validated simulation parameters.
    fn from(params: &SimulationParameters) -> Self {
        let medium = Self::from_lengths(
            params.absorption_length(),
            params.scatter_length(),
            params.anisotropy(),
        );
        debug!(
            "Homogeneous medium σa = {}, σs = {}, {}",
            medium.sigma_a, medium.sigma_s, medium.phase
        );
        medium
    }
}

impl Medium for HomogeneousMedium {
    /// Samples the distance to the next interaction from a single exponential
    /// with rate `σt`, then classifies it as scattering with probability
    /// `σs / σt`.
    ///
    /// * `rng` - Random number generator of the calling worker.
    fn sample_free_path(&self, rng: &mut RNG) -> FreePath {
        if self.sigma_t <= 0.0 {
            // Vacuum. The photon travels until it leaves the grid.
            return FreePath {
                distance: INFINITY,
                event: InteractionEvent::Scatter,
            };
        }

        let distance = sample_exponential(rng.uniform_float(), self.sigma_t);
        let event = if rng.uniform_float() * self.sigma_t < self.sigma_s {
            InteractionEvent::Scatter
        } else {
            InteractionEvent::Absorb
        };
        FreePath { distance, event }
    }

    /// Samples a new direction from the phase function, redrawing samples
    /// that hit a singularity.
    ///
    /// * `w`   - Current unit direction of travel.
    /// * `rng` - Random number generator of the calling worker.
    fn sample_scatter_direction(&self, w: &Vector3f, rng: &mut RNG) -> ScatteredDirection {
        let mut resamples = 0;
        loop {
            let u = rng.uniform_float2();
            if let Some((_pdf, wi)) = self.phase.sample_p(w, &u) {
                return ScatteredDirection { wi, resamples };
            }
            resamples += 1;
        }
    }
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
    fn coefficients_from_lengths() {
        let m = HomogeneousMedium::from_lengths(14000.0, 100.0, 0.88);
        assert!(approx_eq!(f64, m.sigma_s(), 0.01, ulps = 2));
        assert!(approx_eq!(f64, m.sigma_t(), 0.01 + 1.0 / 14000.0, ulps = 2));
    }

    #[test]
    fn from_parameters() {
        let params = SimulationParameters::builder([10, 10, 10])
            .with_anisotropy(0.5)
            .with_scatter_length(20.0)
            .with_absorption_length(80.0)
            .build()
            .unwrap();
        let m = HomogeneousMedium::from(&params);
        assert_eq!(m.sigma_s(), 0.05);
        assert_eq!(m.sigma_a(), 0.0125);
        assert_eq!(*m.phase(), PhaseFunction::HenyeyGreenstein(HenyeyGreenstein::new(0.5)));
    }

    #[test]
    fn free_path_statistics() {
        // Mean free path 1/σt = 16, scatter albedo σs/σt = 0.8.
        let m = HomogeneousMedium::from_lengths(80.0, 20.0, 0.0);
        let mut rng = RNG::new(5);
        let n = 100_000;
        let mut total = 0.0;
        let mut scatters = 0;
        for _ in 0..n {
            let fp = m.sample_free_path(&mut rng);
            total += fp.distance;
            if fp.event == InteractionEvent::Scatter {
                scatters += 1;
            }
        }
        let mean = total / n as Float;
        let albedo = scatters as Float / n as Float;
        assert!((mean - 16.0).abs() < 0.3, "mean = {}", mean);
        assert!((albedo - 0.8).abs() < 0.01, "albedo = {}", albedo);
    }

    #[test]
    fn vacuum_never_interacts() {
        let m = HomogeneousMedium::from_lengths(INFINITY, INFINITY, 0.0);
        let mut rng = RNG::new(0);
        let fp = m.sample_free_path(&mut rng);
        assert!(fp.distance.is_infinite());
        assert_eq!(fp.event, InteractionEvent::Scatter);
    }

    #[test]
    fn singular_phase_is_resampled() {
        let m = HomogeneousMedium::from_lengths(1.0, 1.0, -1.0);
        let mut rng = RNG::new(3);
        let w = Vector3f::new(0.0, 0.0, 1.0);
        for _ in 0..100 {
            let s = m.sample_scatter_direction(&w, &mut rng);
            assert!(approx_eq!(f64, s.wi.z, -1.0, epsilon = 1e-9));
        }
    }

    proptest! {
        #[test]
        fn scattered_directions_are_unit(g in -0.99..0.99f64, seed in 0u64..1000) {
            let m = HomogeneousMedium::from_lengths(100.0, 10.0, g);
            let mut rng = RNG::with_seed(0, seed);
            let w = Vector3f::new(1.0, 2.0, -0.5).normalize();
            let s = m.sample_scatter_direction(&w, &mut rng);
            prop_assert_eq!(s.resamples, 0);
            prop_assert!(approx_eq!(f64, s.wi.length(), 1.0, epsilon = 1e-12));
        }
    }
}
