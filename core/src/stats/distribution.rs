//! Distribution statistic

use crate::base;
use num_traits::{Num, ToPrimitive, Zero};
use std::fmt;
use std::ops::AddAssign;

/// Distribution statistic tracking sum, count and range of reported values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StatsDistribution<T>
where
    T: Num + Default + Copy + Clone,
{
    /// Sum of all values.
    sum: T,

    /// Count of all values.
    count: u64,

    /// Minimum value.
    min: Option<T>,

    /// Maximum value.
    max: Option<T>,
}

impl<T> StatsDistribution<T>
where
    T: Num + Zero + PartialOrd + AddAssign + Default + Copy + Clone,
{
    /// Merge another distribution into this one.
    ///
    /// * `distrib` - The distribution to merge.
    pub fn accumulate(&mut self, distrib: &Self) {
        self.sum += distrib.sum;
        self.count += distrib.count;

        self.min = match (self.min, distrib.min) {
            (Some(a), Some(b)) => Some(base::min(a, b)),
            (a, b) => a.or(b),
        };

        self.max = match (self.max, distrib.max) {
            (Some(a), Some(b)) => Some(base::max(a, b)),
            (a, b) => a.or(b),
        };
    }

    /// Report a sample value.
    ///
    /// * `val`  - Sample value.
    pub fn report(&mut self, val: T) {
        self.sum += val;
        self.count += 1;

        self.min = Some(self.min.map_or(val, |v| base::min(v, val)));
        self.max = Some(self.max.map_or(val, |v| base::max(v, val)));
    }

    /// Clear stats.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns the sum of reported values.
    pub fn sum(&self) -> T {
        self.sum
    }

    /// Returns the number of reported values.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the smallest reported value.
    pub fn min(&self) -> Option<T> {
        self.min
    }

    /// Returns the largest reported value.
    pub fn max(&self) -> Option<T> {
        self.max
    }

    /// Returns the mean of reported values, or `None` if nothing was
    /// reported.
    pub fn mean(&self) -> Option<f64>
    where
        T: ToPrimitive,
    {
        if self.count == 0 {
            None
        } else {
            self.sum.to_f64().map(|s| s / self.count as f64)
        }
    }
}

impl<T> fmt::Display for StatsDistribution<T>
where
    T: Num + Zero + PartialOrd + AddAssign + Default + Copy + Clone + ToPrimitive + fmt::Display,
{
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.mean(), self.min, self.max) {
            (Some(avg), Some(min), Some(max)) => {
                write!(f, "{:.3} avg [range {} - {}]", avg, min, max)
            }
            _ => write!(f, "n/a"),
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
    fn report_tracks_range() {
        let mut d = StatsDistribution::<u64>::default();
        assert_eq!(d.mean(), None);
        for v in [4, 1, 7] {
            d.report(v);
        }
        assert_eq!(d.count(), 3);
        assert_eq!(d.sum(), 12);
        assert_eq!(d.min(), Some(1));
        assert_eq!(d.max(), Some(7));
        assert_eq!(d.mean(), Some(4.0));
    }

    #[test]
    fn accumulate_merges() {
        let mut a = StatsDistribution::<f64>::default();
        a.report(2.0);
        let mut b = StatsDistribution::<f64>::default();
        b.report(-1.0);
        b.report(5.0);

        a.accumulate(&b);
        assert_eq!(a.count(), 3);
        assert_eq!(a.min(), Some(-1.0));
        assert_eq!(a.max(), Some(5.0));

        let mut empty = StatsDistribution::<f64>::default();
        empty.accumulate(&a);
        assert_eq!(empty, a);

        a.clear();
        assert_eq!(a.count(), 0);
        assert_eq!(a.min(), None);
    }
}
