//! Sequential batch execution with per-item failure isolation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chatsweep_protocols::{BatchError, HostError, NodeRef};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::plan::{ActionPlan, BatchAction, Locator, Step, StepName, best_label_match};
use super::report::{BatchReport, ItemFailure};
use crate::identity::SelectableItem;
use crate::mode::ModeState;
use crate::session::SessionContext;

/// Runs one batch at a time against the session's host page.
pub struct BatchRunner {
    ctx: Arc<SessionContext>,
    in_flight: AtomicBool,
    cancel: Mutex<Option<CancellationToken>>,
}

/// Releases the single-flight flag and forgets the batch's token on every
/// exit path.
struct FlightGuard<'a>(&'a BatchRunner);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        *self.0.cancel.lock() = None;
        self.0.in_flight.store(false, Ordering::Release);
    }
}

impl BatchRunner {
    pub fn new(ctx: Arc<SessionContext>) -> Self {
        Self {
            ctx,
            in_flight: AtomicBool::new(false),
            cancel: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Request cancellation of the running batch, including one still
    /// waiting for its confirmation. The item in progress completes;
    /// nothing after it starts.
    pub fn cancel(&self) {
        if let Some(token) = self.cancel.lock().as_ref() {
            info!("Batch cancellation requested");
            token.cancel();
        }
    }

    /// Run `action` over the current selection, in selection order.
    ///
    /// Started from selection mode, the batch belongs to that session and
    /// is abandoned if the session ends before it begins.
    pub async fn run(&self, action: BatchAction) -> Result<BatchReport, BatchError> {
        if self.is_running() {
            return Err(BatchError::ConcurrentBatchAttempt);
        }
        let (items, interactive) = self.ctx.with_state(|s| {
            (
                s.selection.items().to_vec(),
                s.mode == ModeState::SelectionActive,
            )
        });
        self.execute(action, items, interactive).await
    }

    /// Run `action` over `items`. The list is authoritative for the whole
    /// batch; selection changes made meanwhile do not affect it.
    pub async fn run_items(
        &self,
        action: BatchAction,
        items: Vec<SelectableItem>,
    ) -> Result<BatchReport, BatchError> {
        let interactive = self.ctx.mode() == ModeState::SelectionActive;
        self.execute(action, items, interactive).await
    }

    /// Whether the batch must stop: its token tripped, or the selection
    /// session it was started from has ended.
    fn abandoned(&self, token: &CancellationToken, interactive: bool) -> bool {
        token.is_cancelled() || (interactive && !self.ctx.mode().is_active())
    }

    pub(super) async fn execute(
        &self,
        action: BatchAction,
        items: Vec<SelectableItem>,
        interactive: bool,
    ) -> Result<BatchReport, BatchError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Rejected batch {}: another batch is running", action.name());
            return Err(BatchError::ConcurrentBatchAttempt);
        }
        let _guard = FlightGuard(self);
        let token = CancellationToken::new();
        *self.cancel.lock() = Some(token.clone());

        let plan = ActionPlan::for_action(action, self.ctx.platform(), self.ctx.timings())?;
        if items.is_empty() {
            return Err(BatchError::NothingSelected);
        }
        if self.abandoned(&token, interactive) {
            info!("Batch {} abandoned before confirmation", plan.action.name());
            return Err(BatchError::Cancelled);
        }

        let messages = self.ctx.messages();
        let question = messages.confirm_batch(&plan.action, items.len());
        if !self.ctx.prompter().confirm(&question).await {
            info!("Batch {} declined", plan.action.name());
            return Err(BatchError::Declined);
        }

        // Checked and switched under the state lock; exit takes the same lock.
        let started = self.ctx.with_state(|s| {
            if token.is_cancelled() {
                return false;
            }
            match s.mode {
                ModeState::SelectionActive => {
                    s.mode = ModeState::BatchRunning;
                    true
                }
                _ => !interactive,
            }
        });
        if !started {
            info!("Batch {} cancelled during confirmation", plan.action.name());
            return Err(BatchError::Cancelled);
        }
        self.ctx.refresh().await;

        info!(
            "Starting batch {} over {} item(s)",
            plan.action.name(),
            items.len()
        );
        let mut report = BatchReport::start(plan.action.clone(), items.len());

        for (index, item) in items.iter().enumerate() {
            if self.abandoned(&token, interactive) {
                report.cancelled = true;
                break;
            }

            match self.process_item(&plan, item).await {
                Ok(()) => {
                    debug!("Item {} ({}) done", item.id, item.title);
                    report.succeeded += 1;
                    self.ctx.with_state(|s| s.selection.remove(&item.id));
                }
                Err((step, error)) => {
                    warn!(
                        "Item {} ({}) failed at {}: {}",
                        item.id, item.title, step, error
                    );
                    if let Err(e) = self.ctx.host().dismiss().await {
                        debug!("Dismiss after failure failed: {}", e);
                    }
                    report.failures.push(ItemFailure {
                        id: item.id.clone(),
                        title: item.title.clone(),
                        step,
                        error,
                    });
                }
            }
            self.ctx.refresh().await;

            if index + 1 < items.len() && !plan.item_settle.is_zero() {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {}
                    _ = tokio::time::sleep(plan.item_settle) => {}
                }
            }
        }

        let session_alive = self.ctx.with_state(|s| {
            if s.mode == ModeState::BatchRunning {
                s.mode = ModeState::SelectionActive;
            }
            !interactive || s.mode.is_active()
        });
        report.finished_at = chrono::Utc::now();
        self.ctx.refresh().await;

        info!(
            "Batch {} finished: {} of {} succeeded, {} failed, {} skipped",
            report.action.name(),
            report.succeeded,
            report.attempted,
            report.failures.len(),
            report.skipped()
        );
        if session_alive {
            self.ctx
                .prompter()
                .inform(&messages.batch_finished(&report))
                .await;
        }

        Ok(report)
    }

    async fn process_item(
        &self,
        plan: &ActionPlan,
        item: &SelectableItem,
    ) -> Result<(), (StepName, HostError)> {
        for step in &plan.steps {
            match self.locate(step, &item.node).await {
                Ok(Some(target)) => {
                    debug!("{} {}: activating {}", item.id, step.name, target);
                    self.ctx
                        .host()
                        .activate(&target)
                        .await
                        .map_err(|e| (step.name, e))?;
                    if !step.settle.is_zero() {
                        tokio::time::sleep(step.settle).await;
                    }
                }
                Ok(None) if step.required => {
                    return Err((step.name, HostError::SelectorMiss(step.locator.describe())));
                }
                Ok(None) => {
                    debug!("{} {}: no control, skipping", item.id, step.name);
                }
                Err(e) => return Err((step.name, e)),
            }
        }
        Ok(())
    }

    async fn locate(&self, step: &Step, item: &NodeRef) -> Result<Option<NodeRef>, HostError> {
        let host = self.ctx.host();
        match &step.locator {
            Locator::WithinItem {
                selector,
                hover_first,
            } => {
                if *hover_first {
                    host.hover(item).await?;
                }
                host.find_within(item, selector).await
            }
            Locator::VisibleText { selector, labels } => {
                let controls = host.visible_controls(selector).await?;
                Ok(best_label_match(&controls, labels).map(|c| c.node.clone()))
            }
        }
    }
}
