//! Mode controller: the top-level state machine for one page.
//!
//! ```text
//!   Idle ──toggle──▶ SelectionActive ──Delete/Move──▶ BatchRunning
//!    ▲                 │       ▲                          │
//!    └──toggle / Exit──┘       └────── batch finished ────┘
//! ```
//!
//! Exit from `BatchRunning` cancels the batch between items and returns
//! straight to `Idle`.

use std::sync::Arc;

use chatsweep_protocols::{
    BatchError, CategoryGroup, NodeRef, Point, Rect, SweepError, ToolbarAction, UiEvent,
};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::batch::{BatchAction, BatchReport, BatchRunner};
use crate::drag::DragSelectController;
use crate::identity::SelectableItem;
use crate::session::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeState {
    #[default]
    Idle,
    SelectionActive,
    /// Sub-state of `SelectionActive` while the batch runner works.
    BatchRunning,
}

impl ModeState {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

type BatchTask = JoinHandle<Result<BatchReport, BatchError>>;

/// Routes UI events to the selection store, drag controller, renderer and
/// batch runner.
pub struct ModeController {
    ctx: Arc<SessionContext>,
    runner: Arc<BatchRunner>,
    drag: Mutex<DragSelectController>,
    batch_task: Mutex<Option<BatchTask>>,
}

impl ModeController {
    pub fn new(ctx: Arc<SessionContext>, click_threshold: f64) -> Self {
        let runner = Arc::new(BatchRunner::new(ctx.clone()));
        Self {
            ctx,
            runner,
            drag: Mutex::new(DragSelectController::new(click_threshold)),
            batch_task: Mutex::new(None),
        }
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        &self.ctx
    }

    pub fn runner(&self) -> &Arc<BatchRunner> {
        &self.runner
    }

    pub fn mode(&self) -> ModeState {
        self.ctx.mode()
    }

    pub async fn handle(&self, event: UiEvent) -> Result<(), SweepError> {
        match event {
            UiEvent::ToggleClicked => {
                if self.mode().is_active() {
                    self.exit().await
                } else {
                    self.enter().await
                }
            }
            UiEvent::Toolbar { action } => self.handle_action(action).await,
            UiEvent::PointerDown {
                x,
                y,
                in_toolbar,
                in_content,
            } => self.pointer_down(Point::new(x, y), in_toolbar, in_content).await,
            UiEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)).await,
            UiEvent::PointerUp { x, y } => self.pointer_up(Point::new(x, y)).await,
            UiEvent::ItemClick { node, shift } => self.item_click(&node, shift).await,
            UiEvent::DomChanged => {
                self.ensure_entry_point().await?;
                if self.mode().is_active() {
                    self.ctx.refresh().await;
                }
                Ok(())
            }
            UiEvent::Navigated => {
                if self.mode().is_active() {
                    info!("Page navigated, leaving selection mode");
                    self.exit().await
                } else {
                    self.ensure_entry_point().await
                }
            }
        }
    }

    /// `Idle → SelectionActive`. A no-op in any other state.
    pub async fn enter(&self) -> Result<(), SweepError> {
        let entered = self.ctx.with_state(|s| {
            if s.mode != ModeState::Idle {
                return false;
            }
            s.mode = ModeState::SelectionActive;
            s.selection.clear();
            true
        });
        if !entered {
            return Ok(());
        }
        self.drag.lock().reset();
        info!("Selection mode on ({})", self.ctx.platform().name);

        self.ctx.refresh().await;
        self.ctx
            .overlay()
            .set_selection_mode(true, &self.ctx.platform().item_selector)
            .await?;
        self.ensure_entry_point().await
    }

    /// Back to `Idle` from any state, cancelling a running batch.
    pub async fn exit(&self) -> Result<(), SweepError> {
        self.runner.cancel();
        let was = self.ctx.with_state(|s| {
            let was = s.mode;
            s.mode = ModeState::Idle;
            s.selection.clear();
            was
        });
        self.drag.lock().reset();
        if was.is_active() {
            info!("Selection mode off");
        }

        self.ctx.refresh().await;
        let overlay = self.ctx.overlay();
        overlay.hide_drag_box().await?;
        overlay
            .set_selection_mode(false, &self.ctx.platform().item_selector)
            .await?;
        self.ensure_entry_point().await
    }

    /// Re-inject the toggle control if the host rebuilt its sidebar.
    pub async fn ensure_entry_point(&self) -> Result<(), SweepError> {
        let injected = self
            .ctx
            .overlay()
            .ensure_entry_point(
                &self.ctx.platform().container_selector,
                self.ctx.messages().toggle_label(),
                self.mode().is_active(),
            )
            .await?;
        if injected {
            debug!("Entry point injected");
        }
        Ok(())
    }

    async fn handle_action(&self, action: ToolbarAction) -> Result<(), SweepError> {
        let mode = self.mode();
        match action {
            ToolbarAction::Exit => self.exit().await,
            ToolbarAction::Cancel => {
                self.runner.cancel();
                Ok(())
            }
            _ if mode == ModeState::BatchRunning => {
                debug!("Ignoring {} while a batch runs", action.key());
                if matches!(action, ToolbarAction::Delete | ToolbarAction::Move) {
                    return Err(BatchError::ConcurrentBatchAttempt.into());
                }
                Ok(())
            }
            _ if mode == ModeState::Idle => Ok(()),
            ToolbarAction::Delete => self.start_batch(BatchAction::Delete),
            ToolbarAction::Move => {
                let question = self.ctx.messages().ask_destination();
                match self.ctx.prompter().ask(question).await {
                    Some(destination) => self.start_batch(BatchAction::Move { destination }),
                    None => Ok(()),
                }
            }
            ToolbarAction::Categorize => {
                self.categorize().await;
                Ok(())
            }
            ToolbarAction::SelectAll => {
                let snapshots = self.ctx.host().list_items(&self.ctx.item_query()).await?;
                let added = self.ctx.with_state(|s| {
                    snapshots
                        .iter()
                        .filter(|snap| s.selection.insert(SelectableItem::from_snapshot(snap)))
                        .count()
                });
                debug!("Select all added {} item(s)", added);
                self.ctx.refresh().await;
                Ok(())
            }
            ToolbarAction::SelectNone => {
                self.ctx.with_state(|s| s.selection.clear());
                self.ctx.refresh().await;
                Ok(())
            }
        }
    }

    fn start_batch(&self, action: BatchAction) -> Result<(), SweepError> {
        let mut task = self.batch_task.lock();
        let busy = task.as_ref().map(|t| !t.is_finished()).unwrap_or(false);
        if busy || self.runner.is_running() {
            return Err(BatchError::ConcurrentBatchAttempt.into());
        }

        let runner = self.runner.clone();
        *task = Some(tokio::spawn(async move {
            let result = runner.run(action).await;
            if let Err(e) = &result {
                match e {
                    BatchError::Declined | BatchError::NothingSelected | BatchError::Cancelled => {
                        debug!("Batch not started: {}", e)
                    }
                    _ => warn!("Batch failed: {}", e),
                }
            }
            result
        }));
        Ok(())
    }

    /// Wait for the most recently started batch. `None` if there is none.
    pub async fn wait_for_batch(&self) -> Option<Result<BatchReport, BatchError>> {
        let task = self.batch_task.lock().take()?;
        match task.await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Batch task ended abnormally: {}", e);
                None
            }
        }
    }

    /// Ask the categorizer about the selected titles and present the answer.
    /// Any failure is shown as "no suggestion"; state is never touched.
    pub async fn categorize(&self) -> Vec<CategoryGroup> {
        let titles = self.ctx.with_state(|s| s.selection.titles());
        let messages = self.ctx.messages();

        let groups = match (self.ctx.categorizer(), titles.is_empty()) {
            (Some(categorizer), false) => match categorizer.categorize(&titles).await {
                Ok(groups) => groups,
                Err(e) => {
                    warn!("Categorization unavailable: {}", e);
                    Vec::new()
                }
            },
            _ => Vec::new(),
        };

        if groups.is_empty() {
            self.ctx.prompter().inform(messages.no_suggestion()).await;
        } else {
            self.ctx.prompter().inform(&messages.suggestions(&groups)).await;
        }
        groups
    }

    async fn pointer_down(
        &self,
        point: Point,
        in_toolbar: bool,
        in_content: bool,
    ) -> Result<(), SweepError> {
        if self.mode() != ModeState::SelectionActive {
            return Ok(());
        }
        let started = self.drag.lock().pointer_down(point, in_toolbar, in_content);
        if started {
            self.ctx
                .overlay()
                .show_drag_box(Rect::from_points(point, point))
                .await?;
        }
        Ok(())
    }

    async fn pointer_move(&self, point: Point) -> Result<(), SweepError> {
        if self.mode() != ModeState::SelectionActive {
            return Ok(());
        }
        let Some(rect) = self.drag.lock().pointer_move(point) else {
            return Ok(());
        };
        self.ctx.overlay().show_drag_box(rect).await?;

        let snapshots = self.ctx.host().list_items(&self.ctx.item_query()).await?;
        let added = self.ctx.with_state(|s| {
            if s.mode == ModeState::SelectionActive {
                s.selection.union_rect(&rect, &snapshots)
            } else {
                0
            }
        });
        if added > 0 {
            self.ctx.refresh().await;
        }
        Ok(())
    }

    async fn pointer_up(&self, point: Point) -> Result<(), SweepError> {
        let finished = {
            let mut drag = self.drag.lock();
            let tracking = drag.is_tracking();
            drag.pointer_up(point);
            tracking
        };
        if finished {
            self.ctx.overlay().hide_drag_box().await?;
        }
        Ok(())
    }

    async fn item_click(&self, node: &NodeRef, shift: bool) -> Result<(), SweepError> {
        if self.mode() != ModeState::SelectionActive {
            return Ok(());
        }
        if self.drag.lock().take_click_suppression() {
            debug!("Click ending a drag ignored");
            return Ok(());
        }

        let snapshots = self.ctx.host().list_items(&self.ctx.item_query()).await?;
        let visual: Vec<SelectableItem> =
            snapshots.iter().map(SelectableItem::from_snapshot).collect();
        let Some(target) = visual.iter().find(|i| &i.node == node).cloned() else {
            debug!("Clicked node {} is not a current item", node);
            return Ok(());
        };

        self.ctx.with_state(|s| {
            if s.mode != ModeState::SelectionActive {
                return;
            }
            if shift {
                let anchor = s.selection.anchor().cloned();
                s.selection.set_range(anchor.as_ref(), &target.id, &visual);
            } else {
                s.selection.toggle(target.clone());
            }
        });
        self.ctx.refresh().await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;
