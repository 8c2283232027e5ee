//! Error taxonomy for the extraction pipeline.
//!
//! Every stage reports failure through `ShapeError`. None of these are fatal:
//! the public `extract_shape` entry point turns any of them into "no shape".

use thiserror::Error;

/// Why a shape could not be extracted at the cursor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// No identifier-led declaration encloses the cursor.
    #[error("no declaration under cursor")]
    NotFound,

    /// The value is not a `name(...)` call.
    #[error("malformed shape function: {0}")]
    MalformedInput(String),

    /// Not a shape property, or a shape function with no parser.
    #[error("unknown shape `{name}`")]
    UnknownShape { name: String },

    /// Wrong arity, unparseable length, negative magnitude, or bad unit.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },
}

impl ShapeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownShape { name: name.into() }
    }
}
