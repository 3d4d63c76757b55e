//! Numeric base shared by every crate.

mod axis;
mod common;

// Re-export
pub use axis::*;
pub use common::*;
