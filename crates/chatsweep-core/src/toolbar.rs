//! Toolbar rendering.
//!
//! [`ToolbarRenderer::project`] is a pure function of session state and
//! [`ToolbarRenderer::render`] pushes its result to the overlay. The only
//! state kept here is whether the panel is currently mounted, so the panel is
//! created once per selection session and removed on exit.

use chatsweep_protocols::{HostError, NodeRef, Overlay, ToolbarAction, ToolbarButton, ToolbarView};
use tracing::debug;

use crate::messages::Messages;
use crate::mode::ModeState;
use crate::selection::SelectionStore;

#[derive(Debug)]
pub struct ToolbarRenderer {
    messages: Messages,
    mounted: bool,
}

impl ToolbarRenderer {
    pub fn new(messages: Messages) -> Self {
        Self {
            messages,
            mounted: false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// What the toolbar should show, or `None` when it should not exist.
    pub fn project(
        &self,
        mode: ModeState,
        selection: &SelectionStore,
        move_available: bool,
        categorize_available: bool,
    ) -> Option<ToolbarView> {
        let count = selection.len();
        let has_selection = count > 0;

        let (summary, busy) = match mode {
            ModeState::Idle => return None,
            ModeState::SelectionActive => (self.messages.selected_summary(count), false),
            ModeState::BatchRunning => (self.messages.running_summary(count), true),
        };

        let enabled = |action: ToolbarAction| match (mode, action) {
            (ModeState::BatchRunning, ToolbarAction::Cancel | ToolbarAction::Exit) => true,
            (ModeState::BatchRunning, _) => false,
            (_, ToolbarAction::Delete | ToolbarAction::SelectNone) => has_selection,
            (_, ToolbarAction::Move) => has_selection && move_available,
            (_, ToolbarAction::Categorize) => has_selection && categorize_available,
            (_, ToolbarAction::SelectAll | ToolbarAction::Exit) => true,
            (_, ToolbarAction::Cancel) => false,
        };

        let buttons = [
            ToolbarAction::SelectAll,
            ToolbarAction::SelectNone,
            ToolbarAction::Delete,
            ToolbarAction::Move,
            ToolbarAction::Categorize,
            ToolbarAction::Cancel,
            ToolbarAction::Exit,
        ]
        .into_iter()
        .filter(|action| match action {
            ToolbarAction::Move => move_available,
            ToolbarAction::Categorize => categorize_available,
            ToolbarAction::Cancel => busy,
            _ => true,
        })
        .map(|action| ToolbarButton {
            action,
            label: self.messages.action_label(action).to_string(),
            enabled: enabled(action),
        })
        .collect();

        Some(ToolbarView {
            count,
            summary,
            busy,
            buttons,
        })
    }

    /// Apply a projected view: mount on first view, update while shown,
    /// unmount when the projection is `None`.
    pub async fn render(
        &mut self,
        overlay: &dyn Overlay,
        view: Option<&ToolbarView>,
        highlighted: &[NodeRef],
    ) -> Result<(), HostError> {
        match view {
            Some(view) => {
                if !self.mounted {
                    overlay.mount_toolbar().await?;
                    self.mounted = true;
                    debug!("Toolbar mounted");
                }
                overlay.update_toolbar(view).await?;
                overlay.highlight(highlighted).await?;
            }
            None => {
                overlay.highlight(&[]).await?;
                if self.mounted {
                    self.mounted = false;
                    overlay.unmount_toolbar().await?;
                    debug!("Toolbar unmounted");
                }
            }
        }
        Ok(())
    }
}
