//! Emitters

#[macro_use]
extern crate log;

mod aperture;
mod aperture_emitter;

// Re-export.
pub use aperture::*;
pub use aperture_emitter::*;
