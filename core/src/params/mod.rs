//! Simulation parameters

mod beam_shape;
mod description;
mod policy;
mod simulation;

// Re-export
pub use beam_shape::*;
pub use description::*;
pub use policy::*;
pub use simulation::*;
