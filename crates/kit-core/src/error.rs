//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `KitError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::DeviceId;

/// The base error type for `kit-core`.
#[derive(Debug, Error)]
pub enum KitError {
    #[error("device {0} not found")]
    DeviceNotFound(DeviceId),

    #[error("parse error: {0}")]
    Parse(String),
}
