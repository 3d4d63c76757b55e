//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod base;
pub mod emitter;
pub mod error;
pub mod geometry;
pub mod medium;
pub mod parallel;
pub mod params;
pub mod paramset;
pub mod photon;
pub mod progress;
pub mod rng;
pub mod sampling;
pub mod stats;
pub mod voxel;
