//! Errors

use std::io;
use thiserror::Error;

/// Errors raised while configuring, running or storing a field simulation.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A parameter is out of range or malformed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A required parameter was not supplied.
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    /// Parameters were supplied that the field variant does not use.
    #[error("unrecognized parameter(s): {}", .0.join(", "))]
    UnrecognizedParameter(Vec<String>),

    /// The voxel grid could not be allocated.
    #[error("unable to allocate voxel grid of shape {dims:?} ({bytes} bytes)")]
    ResourceExhaustion {
        /// Requested grid shape.
        dims: [usize; 3],

        /// Requested allocation in bytes.
        bytes: usize,
    },

    /// `run` was called on an engine that already holds results.
    #[error("transport engine already ran; call reset() before running again")]
    AlreadyRun,

    /// A field description file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O failure while reading a description or writing a field.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
