//! Photon walk statistics

use super::StatsDistribution;
use crate::base::Float;

/// Aggregate statistics for a batch of photon walks.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WalkStats {
    /// Number of completed walks.
    pub walks: u64,

    /// Total number of scattering events.
    pub scatter_events: u64,

    /// Walks terminated by absorption.
    pub absorbed: u64,

    /// Walks terminated by leaving the grid.
    pub exited: u64,

    /// Samples redrawn because of a numerical singularity.
    pub resampled: u64,

    /// Scattering events per walk.
    pub scatters_per_walk: StatsDistribution<u64>,

    /// Path length inside the grid per walk.
    pub path_length: StatsDistribution<Float>,
}

impl WalkStats {
    /// Merge statistics from another batch.
    ///
    /// * `other` - The other batch.
    pub fn merge(&mut self, other: &WalkStats) {
        self.walks += other.walks;
        self.scatter_events += other.scatter_events;
        self.absorbed += other.absorbed;
        self.exited += other.exited;
        self.resampled += other.resampled;
        self.scatters_per_walk.accumulate(&other.scatters_per_walk);
        self.path_length.accumulate(&other.path_length);
    }

    /// Returns the fraction of walks that ended in absorption.
    pub fn absorbed_fraction(&self) -> Float {
        if self.walks == 0 {
            0.0
        } else {
            self.absorbed as Float / self.walks as Float
        }
    }

    /// Writes a summary to the log.
    pub fn log(&self) {
        info!("Photon walk statistics");
        info!("    Walks                       {}", self.walks);
        info!(
            "    Absorbed / exited           {} / {} ({:.2}% absorbed)",
            self.absorbed,
            self.exited,
            100.0 * self.absorbed_fraction()
        );
        info!("    Scattering events           {}", self.scatter_events);
        info!("    Scatters per walk           {}", self.scatters_per_walk);
        info!("    Path length per walk        {}", self.path_length);
        if self.resampled > 0 {
            info!("    Degenerate samples redrawn  {}", self.resampled);
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
    fn merge_sums_counts() {
        let mut a = WalkStats {
            walks: 2,
            absorbed: 1,
            exited: 1,
            ..Default::default()
        };
        a.scatters_per_walk.report(3);
        a.scatters_per_walk.report(0);

        let mut b = WalkStats {
            walks: 1,
            exited: 1,
            scatter_events: 9,
            ..Default::default()
        };
        b.scatters_per_walk.report(9);

        a.merge(&b);
        assert_eq!(a.walks, 3);
        assert_eq!(a.exited, 2);
        assert_eq!(a.scatter_events, 9);
        assert_eq!(a.scatters_per_walk.max(), Some(9));
        assert!((a.absorbed_fraction() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_fraction_is_zero() {
        assert_eq!(WalkStats::default().absorbed_fraction(), 0.0);
    }
}
