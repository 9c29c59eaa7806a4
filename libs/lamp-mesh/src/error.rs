//! # Mesh Errors
//!
//! Error types for footprint, sweep and voxel mesh generation.

use lamp_codec::CodecError;
use thiserror::Error;

/// Errors that can occur during lamp geometry generation.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    /// Error from the parameter codec
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// A factory received a parameter outside its domain
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// What was wrong
        message: String,
    },

    /// An operation received structurally unusable input
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong
        message: String,
    },

    /// Half-edge links are inconsistent
    #[error("Invalid topology: {message}")]
    InvalidTopology {
        /// What was wrong
        message: String,
    },

    /// A parameter tree is missing a field the bridge needs
    #[error("Missing parameter '{0}'")]
    MissingParameter(String),

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices {
        /// Requested vertex count
        count: usize,
        /// Limit
        max: usize,
    },
}

impl MeshError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
