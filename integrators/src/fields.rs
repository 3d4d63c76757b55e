//! Probability fields

use crate::PhotonTransport;
use itertools::iproduct;
use photon_core::base::*;
use photon_core::params::{DetectorType, FieldKind};
use photon_core::stats::WalkStats;

/// A normalized probability field with its summary values.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationResult {
    /// Field variant.
    pub kind: FieldKind,

    /// Voxel counts per axis.
    pub dims: [usize; 3],

    /// World units per voxel.
    pub pitch: Float,

    /// Probability estimates in x-fastest order.
    pub volume: Vec<Float>,

    /// Number of completed walks.
    pub total_photons: u64,

    /// Aperture area of a detector field.
    pub emitter_area: Option<Float>,

    /// Largest voxel value of a detector field.
    pub max_value: Option<Float>,

    /// Aggregate walk statistics.
    pub stats: WalkStats,
}

impl SimulationResult {
    /// Returns the value of a voxel.
    ///
    /// * `idx` - Voxel index (i, j, k).
    pub fn get(&self, idx: [usize; 3]) -> Float {
        let [nx, ny, _] = self.dims;
        self.volume[(idx[2] * ny + idx[1]) * nx + idx[0]]
    }

    /// Returns the largest voxel value, or `None` for an empty volume.
    pub fn max(&self) -> Option<Float> {
        self.volume.iter().copied().reduce(max)
    }

    /// Returns the shape of `projection(axis)` as (fast, slow) counts.
    ///
    /// * `axis` - Axis summed over.
    pub fn projection_dims(&self, axis: Axis) -> [usize; 2] {
        let [u, v] = projected_axes(axis);
        [self.dims[u], self.dims[v]]
    }

    /// Sums the volume along an axis. The result is laid out with the lower
    /// remaining axis varying fastest.
    ///
    /// * `axis` - Axis summed over.
    pub fn projection(&self, axis: Axis) -> Vec<Float> {
        let a = usize::from(axis);
        let [u, v] = projected_axes(axis);
        iproduct!(0..self.dims[v], 0..self.dims[u])
            .map(|(jv, ju)| {
                (0..self.dims[a])
                    .map(|t| {
                        let mut idx = [0; 3];
                        idx[u] = ju;
                        idx[v] = jv;
                        idx[a] = t;
                        self.get(idx)
                    })
                    .sum()
            })
            .collect()
    }
}

/// Returns the two axes that remain after summing over `axis`.
fn projected_axes(axis: Axis) -> [usize; 2] {
    match axis {
        Axis::X => [1, 2],
        Axis::Y => [0, 2],
        Axis::Z => [0, 1],
    }
}

/// Returns the fraction of an isotropic point source's photons that an
/// aperture accepts per unit of cosine-weighted fluence and area:
/// `Ω / 4π` with `Ω = π` for one face and `2π` for both.
///
/// * `detector_type` - Half-spaces the aperture faces.
fn acceptance(detector_type: DetectorType) -> Float {
    match detector_type {
        DetectorType::OneSided => 0.25,
        DetectorType::TwoSided => 0.5,
    }
}

/// Normalizes the raw accumulation of an engine into a probability field.
///
/// An emitter field is the expected track length per emitted photon, in voxel
/// pitches. A detector field applies reciprocity to the cosine-weighted walks
/// of the engine: a photon emitted isotropically in a voxel reaches the
/// aperture with probability `area * fluence * acceptance`, where the fluence
/// per launched photon is the track length per photon divided by the voxel
/// volume.
///
/// * `engine` - Engine after `run`.
pub fn postprocess(engine: &PhotonTransport) -> SimulationResult {
    let kind = engine.kind();
    let total_photons = engine.total_count();
    let area = engine.emitter_area();
    let pitch = engine.grid().pitch();
    let scale = match (total_photons, kind) {
        (0, _) => 0.0,
        (n, FieldKind::Detector) => {
            area / (pitch * pitch) * acceptance(engine.params().detector_type()) / n as Float
        }
        (n, FieldKind::Emitter) => 1.0 / n as Float,
    };

    let volume: Vec<Float> = engine.volume().values().iter().map(|v| v * scale).collect();

    let mut result = SimulationResult {
        kind,
        dims: engine.grid().dims(),
        pitch,
        volume,
        total_photons,
        emitter_area: None,
        max_value: None,
        stats: engine.stats().clone(),
    };

    if kind == FieldKind::Detector {
        let max_value = result.max().unwrap_or(0.0);
        if max_value >= 1.0 {
            warn!(
                "{} max value {} is not below 1; increase hops",
                kind, max_value
            );
        }
        result.emitter_area = Some(area);
        result.max_value = Some(max_value);
    }

    debug!(
        "{} normalized over {} photons, max {:?}",
        kind,
        total_photons,
        result.max()
    );
    result
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
