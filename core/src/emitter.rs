//! Emitter

use crate::photon::PhotonState;
use crate::rng::RNG;
use std::sync::Arc;

/// A launched photon along with the number of redraws needed to get a
/// non-degenerate direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EmitterSample {
    /// The launched photon.
    pub photon: PhotonState,

    /// Number of rejected direction samples.
    pub resamples: u32,
}

/// Emitter trait for sources of photon walks.
pub trait Emitter {
    /// Samples the initial position and direction of a photon.
    ///
    /// * `rng` - Random number generator of the calling worker.
    fn sample_photon(&self, rng: &mut RNG) -> EmitterSample;

    /// Returns the emitting area.
    fn area(&self) -> crate::base::Float;
}

/// Atomic reference counted `Emitter`.
pub type ArcEmitter = Arc<dyn Emitter + Send + Sync>;
