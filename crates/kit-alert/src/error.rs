use thiserror::Error;

use kit_core::KitError;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("broadcast configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] KitError),
}

pub type AlertResult<T> = Result<T, AlertError>;
