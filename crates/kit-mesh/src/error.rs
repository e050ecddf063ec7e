//! Mesh-subsystem error type.
//!
//! Routing itself is infallible ("no path" is an empty [`Path`](crate::Path));
//! these errors only come from loading snapshots.

use thiserror::Error;

use kit_core::KitError;

/// Errors produced by `kit-mesh`.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] KitError),
}

pub type MeshResult<T> = Result<T, MeshError>;
