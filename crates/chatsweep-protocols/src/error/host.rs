//! Host page errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// An expected control was not found.
    #[error("Selector matched nothing: {0}")]
    SelectorMiss(String),

    /// A captured node is no longer attached to the document.
    #[error("Stale node reference: {0}")]
    StaleReference(String),

    /// The channel to the page failed.
    #[error("Host transport error: {0}")]
    Transport(String),

    /// Page-side script threw.
    #[error("Host script error: {0}")]
    Script(String),
}

impl HostError {
    /// Misses and stale references are recovered locally by skipping the step.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SelectorMiss(_) | Self::StaleReference(_))
    }
}
