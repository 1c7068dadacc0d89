//! Categorization collaborator errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategorizeError {
    #[error("Categorization is not configured")]
    Unavailable,

    #[error("Categorization request failed: {0}")]
    Request(String),

    #[error("Malformed categorization response: {0}")]
    Malformed(String),
}
