//! Core session struct and CDP command dispatch.

use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::debug;

use crate::cdp::client::Transport;
use crate::cdp::error::CdpError;
use crate::cdp::protocol::CdpResponse;

/// A flattened session attached to a single page/target.
pub struct PageSession {
    pub(super) target_id: String,
    pub(super) session_id: String,
    pub(super) transport: Transport,
    /// Event stream for this session, until taken by an event pump.
    pub(super) events: Mutex<Option<mpsc::UnboundedReceiver<CdpResponse>>>,
}

impl PageSession {
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        transport: Transport,
        events: mpsc::UnboundedReceiver<CdpResponse>,
    ) -> Self {
        Self {
            target_id,
            session_id,
            transport,
            events: Mutex::new(Some(events)),
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id), Some(self.transport.timeout))
            .await
    }

    /// Send a command that may legitimately block for a long time, such as
    /// an evaluation waiting on a modal dialog.
    pub async fn call_unbounded(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id), None)
            .await
    }

    /// Take the session's event stream. Returns `None` after the first call.
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<CdpResponse>> {
        self.events.lock().take()
    }

    /// Enable required CDP domains.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Expose `window[name]` to page scripts; calls surface as
    /// `Runtime.bindingCalled` events. Survives navigation.
    pub async fn add_binding(&self, name: &str) -> Result<(), CdpError> {
        self.call("Runtime.addBinding", Some(json!({ "name": name })))
            .await?;
        Ok(())
    }

    /// Run `source` in every new document before its own scripts.
    pub async fn add_script_on_new_document(&self, source: &str) -> Result<String, CdpError> {
        let result = self
            .call(
                "Page.addScriptToEvaluateOnNewDocument",
                Some(json!({ "source": source })),
            )
            .await?;
        result["identifier"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| CdpError::InvalidResponse("Missing script identifier".to_string()))
    }

    /// Current request timeout.
    pub fn timeout(&self) -> Duration {
        self.transport.timeout
    }
}
