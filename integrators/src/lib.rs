//! Integrators

#[macro_use]
extern crate log;

mod fields;
mod photon_transport;

// Re-export.
pub use fields::*;
pub use photon_transport::*;
