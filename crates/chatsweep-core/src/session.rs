//! Shared session context.
//!
//! One [`SessionContext`] exists per attached page. It owns the mutable
//! session state and the collaborators, and is shared by reference between
//! the mode controller and the batch runner.

use std::sync::Arc;

use chatsweep_config::{PlatformDescriptor, TimingsConfig};
use chatsweep_protocols::{Categorizer, HostDom, ItemQuery, Overlay, Prompter};
use parking_lot::Mutex;
use tracing::warn;

use crate::identity::SelectableItem;
use crate::messages::Messages;
use crate::mode::ModeState;
use crate::platform::item_query;
use crate::selection::SelectionStore;
use crate::toolbar::ToolbarRenderer;

/// Mutable state of a page session.
#[derive(Debug, Default)]
pub struct SessionState {
    pub mode: ModeState,
    pub selection: SelectionStore,
}

/// Collaborators plus state for one page.
pub struct SessionContext {
    platform: PlatformDescriptor,
    host: Arc<dyn HostDom>,
    overlay: Arc<dyn Overlay>,
    prompter: Arc<dyn Prompter>,
    categorizer: Option<Arc<dyn Categorizer>>,
    timings: TimingsConfig,
    messages: Messages,
    // Never held across an await.
    state: Mutex<SessionState>,
    // Serializes overlay rendering; held across overlay calls.
    renderer: tokio::sync::Mutex<ToolbarRenderer>,
}

impl SessionContext {
    pub fn new(
        platform: PlatformDescriptor,
        host: Arc<dyn HostDom>,
        overlay: Arc<dyn Overlay>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            platform,
            host,
            overlay,
            prompter,
            categorizer: None,
            timings: TimingsConfig::default(),
            messages: Messages::default(),
            state: Mutex::new(SessionState::default()),
            renderer: tokio::sync::Mutex::new(ToolbarRenderer::new(Messages::default())),
        }
    }

    pub fn with_timings(mut self, timings: TimingsConfig) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self.renderer = tokio::sync::Mutex::new(ToolbarRenderer::new(messages));
        self
    }

    pub fn with_categorizer(mut self, categorizer: Arc<dyn Categorizer>) -> Self {
        self.categorizer = Some(categorizer);
        self
    }

    pub fn platform(&self) -> &PlatformDescriptor {
        &self.platform
    }

    pub fn host(&self) -> &dyn HostDom {
        self.host.as_ref()
    }

    pub fn overlay(&self) -> &dyn Overlay {
        self.overlay.as_ref()
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }

    pub fn categorizer(&self) -> Option<&Arc<dyn Categorizer>> {
        self.categorizer.as_ref()
    }

    pub fn timings(&self) -> &TimingsConfig {
        &self.timings
    }

    pub fn messages(&self) -> Messages {
        self.messages
    }

    pub fn item_query(&self) -> ItemQuery {
        item_query(&self.platform)
    }

    pub fn mode(&self) -> ModeState {
        self.state.lock().mode
    }

    /// Run `f` with the state locked. `f` must not block.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        f(&mut self.state.lock())
    }

    /// Copy of the current selection in insertion order.
    pub fn selection_snapshot(&self) -> Vec<SelectableItem> {
        self.state.lock().selection.items().to_vec()
    }

    pub fn selection_len(&self) -> usize {
        self.state.lock().selection.len()
    }

    /// Re-render the overlay from the current state. Rendering failures are
    /// logged; the page may simply have navigated away.
    pub async fn refresh(&self) {
        let mut renderer = self.renderer.lock().await;
        let (view, highlighted) = {
            let state = self.state.lock();
            let view = renderer.project(
                state.mode,
                &state.selection,
                !self.platform.move_labels.is_empty(),
                self.categorizer.is_some(),
            );
            (view, state.selection.nodes())
        };

        if let Err(e) = renderer
            .render(self.overlay.as_ref(), view.as_ref(), &highlighted)
            .await
        {
            warn!("Toolbar refresh failed: {}", e);
        }
    }

    /// Whether the toolbar panel is currently mounted.
    pub async fn toolbar_mounted(&self) -> bool {
        self.renderer.lock().await.is_mounted()
    }
}
