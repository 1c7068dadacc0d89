//! Top-level engine errors.

use thiserror::Error;

use super::{BatchError, CategorizeError, HostError};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("No supported platform for host: {0}")]
    NoPlatform(String),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Categorize(#[from] CategorizeError),
}
