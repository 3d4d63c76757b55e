//! Statistics

mod distribution;
mod walk_stats;

pub use distribution::*;
pub use walk_stats::*;
