//! Injected overlay trait and the toolbar view model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::event::ToolbarAction;
use crate::types::{NodeRef, Rect};

/// One toolbar button as it should currently be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarButton {
    pub action: ToolbarAction,
    pub label: String,
    pub enabled: bool,
}

/// Everything the floating toolbar displays. Produced by the renderer,
/// drawn verbatim by the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarView {
    pub count: usize,
    pub summary: String,
    pub busy: bool,
    pub buttons: Vec<ToolbarButton>,
}

impl ToolbarView {
    pub fn button(&self, action: ToolbarAction) -> Option<&ToolbarButton> {
        self.buttons.iter().find(|b| b.action == action)
    }
}

/// Nodes owned by the engine inside the host page.
#[async_trait]
pub trait Overlay: Send + Sync {
    /// Inject the entry-point toggle into the sidebar container if it is missing.
    ///
    /// Returns `true` when a new control was inserted, `false` when it was
    /// already present or the container does not exist yet.
    async fn ensure_entry_point(
        &self,
        container_selector: &str,
        label: &str,
        active: bool,
    ) -> Result<bool, HostError>;

    /// Switch page-side selection mode: cursor, gesture reporting, and
    /// interception of clicks on rows matching `item_selector`.
    async fn set_selection_mode(
        &self,
        active: bool,
        item_selector: &str,
    ) -> Result<(), HostError>;

    /// Create the floating toolbar panel.
    async fn mount_toolbar(&self) -> Result<(), HostError>;

    async fn update_toolbar(&self, view: &ToolbarView) -> Result<(), HostError>;

    /// Remove the toolbar panel entirely.
    async fn unmount_toolbar(&self) -> Result<(), HostError>;

    async fn show_drag_box(&self, rect: Rect) -> Result<(), HostError>;

    async fn hide_drag_box(&self) -> Result<(), HostError>;

    /// Mark exactly `nodes` as selected; all other rows lose the marker.
    async fn highlight(&self, nodes: &[NodeRef]) -> Result<(), HostError>;
}
