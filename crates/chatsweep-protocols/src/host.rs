//! Host page trait definition.

use async_trait::async_trait;

use crate::error::HostError;
use crate::types::{ControlSnapshot, ElementSnapshot, NodeRef};

/// Selectors needed to enumerate the selectable rows of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub item_selector: String,
    /// Resolved inside each item; the item's own text is used when it misses.
    pub title_selector: String,
    /// Attribute to read as a stable identifier, resolved on the item itself.
    pub id_attribute: Option<String>,
}

/// The third-party page the engine reads and clicks.
///
/// Every query is best-effort. A selector that matches nothing is a normal
/// outcome and is reported as an empty result, never as an error.
#[async_trait]
pub trait HostDom: Send + Sync {
    /// Host name of the current page location (e.g. `chatgpt.com`).
    async fn host_name(&self) -> Result<String, HostError>;

    /// Snapshot every currently rendered selectable row, in visual order.
    async fn list_items(&self, query: &ItemQuery) -> Result<Vec<ElementSnapshot>, HostError>;

    /// Resolve a selector inside the subtree of `scope`.
    ///
    /// Returns `Err(HostError::StaleReference)` when `scope` is no longer attached.
    async fn find_within(
        &self,
        scope: &NodeRef,
        selector: &str,
    ) -> Result<Option<NodeRef>, HostError>;

    /// All visible controls matching `selector`, queried from the whole document.
    async fn visible_controls(&self, selector: &str) -> Result<Vec<ControlSnapshot>, HostError>;

    /// Move the pointer over a node so hover-only controls render.
    async fn hover(&self, node: &NodeRef) -> Result<(), HostError>;

    /// Simulate a full user activation (pointer down/up and click) on a node.
    async fn activate(&self, node: &NodeRef) -> Result<(), HostError>;

    /// Close whatever menu or dialog is open (an Escape key press).
    async fn dismiss(&self) -> Result<(), HostError>;
}
