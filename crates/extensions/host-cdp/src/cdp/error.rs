//! CDP error types.

use chatsweep_protocols::HostError;
use thiserror::Error;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chrome.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Chrome not found or not running with remote debugging.
    #[error("Chrome not available at {0}. Start Chrome with: chrome --remote-debugging-port=9222")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol error.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// JavaScript execution error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for HostError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::JavaScript(message) => HostError::Script(message),
            other => HostError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javascript_error_maps_to_script() {
        let err: HostError = CdpError::JavaScript("TypeError: x is null".into()).into();
        assert_eq!(err, HostError::Script("TypeError: x is null".into()));
    }

    #[test]
    fn test_other_errors_map_to_transport() {
        let err: HostError = CdpError::SessionClosed.into();
        assert!(matches!(err, HostError::Transport(_)));

        let err: HostError = CdpError::Timeout("Request Runtime.evaluate timed out".into()).into();
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_chrome_not_available_hint() {
        let err = CdpError::ChromeNotAvailable("http://localhost:9222".into());
        assert!(err.to_string().contains("--remote-debugging-port"));
    }
}
