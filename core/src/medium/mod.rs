//! Medium

use crate::base::*;
use crate::geometry::*;
use crate::rng::RNG;
use std::sync::Arc;

mod henyey_greenstein;
mod phase_function;

// Re-exports
pub use henyey_greenstein::*;
pub use phase_function::*;

/// The kind of interaction at the end of a free path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    /// The photon changes direction and continues.
    Scatter,

    /// The photon is absorbed and the walk terminates.
    Absorb,
}

/// A sampled distance to the next interaction together with its kind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FreePath {
    /// Distance in world units.
    pub distance: Float,

    /// Interaction at the end of the path.
    pub event: InteractionEvent,
}

/// A scattered direction along with the number of redraws needed to get a
/// non-degenerate sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScatteredDirection {
    /// New unit direction of travel.
    pub wi: Vector3f,

    /// Number of rejected samples.
    pub resamples: u32,
}

/// Medium trait to handle volumetric scattering and absorption statistics.
pub trait Medium {
    /// Samples the distance to the next interaction and classifies it.
    ///
    /// * `rng` - Random number generator of the calling worker.
    fn sample_free_path(&self, rng: &mut RNG) -> FreePath;

    /// Samples a new direction of travel after a scattering event.
    ///
    /// * `w`   - Current unit direction of travel.
    /// * `rng` - Random number generator of the calling worker.
    fn sample_scatter_direction(&self, w: &Vector3f, rng: &mut RNG) -> ScatteredDirection;
}

/// Atomic reference counted `Medium`.
pub type ArcMedium = Arc<dyn Medium + Send + Sync>;
