//! Batch action errors.

use thiserror::Error;

use super::HostError;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("A batch is already running")]
    ConcurrentBatchAttempt,

    #[error("Nothing is selected")]
    NothingSelected,

    #[error("Batch declined by user")]
    Declined,

    #[error("Batch cancelled before it started")]
    Cancelled,

    #[error("Batch action is unavailable on this platform: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Host(#[from] HostError),
}
