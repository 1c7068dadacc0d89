//! In-memory collaborators for unit tests.
//!
//! `FakeDom` models a sidebar of rows whose options menu, contextual menu
//! entries and confirmation dialog only exist after the preceding control
//! was activated, the way the real hosts behave.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chatsweep_config::{PlatformDescriptor, TimingsConfig};
use chatsweep_protocols::{
    CategorizeError, CategoryGroup, Categorizer, ControlSnapshot, ElementSnapshot, HostDom,
    HostError, ItemQuery, NodeRef, Overlay, Prompter, Rect, ToolbarView,
};
use parking_lot::Mutex;

use crate::identity::SelectableItem;
use crate::session::SessionContext;

pub const ITEM_SELECTOR: &str = "li.chat";
pub const MENU_SELECTOR: &str = "button.menu";
pub const ENTRY_SELECTOR: &str = "[role=menuitem]";
pub const CONFIRM_SELECTOR: &str = "dialog button";
pub const ROW_HEIGHT: f64 = 40.0;

const MENU_ENTRIES: [&str; 4] = ["Share", "Rename", "Move to project", "Delete"];

pub fn test_platform() -> PlatformDescriptor {
    PlatformDescriptor {
        name: "fake".to_string(),
        hosts: vec!["chat.example.com".to_string()],
        container_selector: "nav".to_string(),
        item_selector: ITEM_SELECTOR.to_string(),
        title_selector: ".title".to_string(),
        menu_button_selector: MENU_SELECTOR.to_string(),
        delete_action_selector: ENTRY_SELECTOR.to_string(),
        confirm_selector: CONFIRM_SELECTOR.to_string(),
        id_attribute: None,
        delete_labels: vec!["delete".to_string()],
        confirm_labels: vec!["delete".to_string(), "confirm".to_string()],
        move_labels: vec!["move".to_string()],
        hover_before_menu: true,
    }
}

#[derive(Debug, Clone)]
struct FakeItem {
    title: String,
    has_menu: bool,
    detached: bool,
    gone: bool,
    moved_to: Option<String>,
}

#[derive(Debug, Default)]
struct DomState {
    items: Vec<FakeItem>,
    destinations: Vec<String>,
    confirm_required: bool,
    menu_for: Option<usize>,
    destinations_for: Option<usize>,
    dialog_for: Option<usize>,
    activations: Vec<NodeRef>,
    hovers: Vec<NodeRef>,
    dismissals: usize,
    log: Vec<String>,
}

/// A sidebar of rows `item-0 .. item-N`, each at `ROW_HEIGHT` spacing.
#[derive(Debug)]
pub struct FakeDom {
    state: Mutex<DomState>,
}

impl FakeDom {
    pub fn with_titles(titles: &[&str]) -> Self {
        let items = titles
            .iter()
            .map(|t| FakeItem {
                title: t.to_string(),
                has_menu: true,
                detached: false,
                gone: false,
                moved_to: None,
            })
            .collect();
        Self {
            state: Mutex::new(DomState {
                items,
                destinations: vec![
                    "Homework".to_string(),
                    "Work".to_string(),
                    "Personal".to_string(),
                ],
                confirm_required: true,
                ..Default::default()
            }),
        }
    }

    /// Row `index` renders without an options button.
    pub fn without_menu(self, index: usize) -> Self {
        self.state.lock().items[index].has_menu = false;
        self
    }

    /// Deleting takes effect without a confirmation dialog.
    pub fn without_confirm(self) -> Self {
        self.state.lock().confirm_required = false;
        self
    }

    /// Simulate the host tearing down row `index` after it was captured.
    pub fn detach(&self, index: usize) {
        self.state.lock().items[index].detached = true;
    }

    pub fn node(index: usize) -> NodeRef {
        NodeRef::new(format!("item-{}", index))
    }

    pub fn snapshot(&self, index: usize) -> ElementSnapshot {
        let state = self.state.lock();
        item_snapshot(index, &state.items[index])
    }

    pub fn selectable(&self, index: usize) -> SelectableItem {
        SelectableItem::from_snapshot(&self.snapshot(index))
    }

    /// Human-readable trace: `menu:<title>`, `delete:<title>`, `confirm:<title>`...
    pub fn log(&self) -> Vec<String> {
        self.state.lock().log.clone()
    }

    pub fn activations(&self) -> Vec<NodeRef> {
        self.state.lock().activations.clone()
    }

    pub fn menu_activations(&self) -> usize {
        self.state
            .lock()
            .activations
            .iter()
            .filter(|n| n.as_str().starts_with("menu-"))
            .count()
    }

    pub fn hovers(&self) -> usize {
        self.state.lock().hovers.len()
    }

    pub fn dismissals(&self) -> usize {
        self.state.lock().dismissals
    }

    /// Titles still present in the sidebar.
    pub fn remaining_titles(&self) -> Vec<String> {
        self.state
            .lock()
            .items
            .iter()
            .filter(|i| !i.gone)
            .map(|i| i.title.clone())
            .collect()
    }

    pub fn moved_to(&self, index: usize) -> Option<String> {
        self.state.lock().items[index].moved_to.clone()
    }
}

fn item_snapshot(index: usize, item: &FakeItem) -> ElementSnapshot {
    let top = index as f64 * ROW_HEIGHT;
    ElementSnapshot {
        node: FakeDom::node(index),
        title: item.title.clone(),
        id_attribute: None,
        rect: Rect::new(0.0, top, 240.0, top + ROW_HEIGHT - 4.0),
    }
}

fn parse_index(node: &NodeRef, prefix: &str) -> Option<usize> {
    node.as_str().strip_prefix(prefix)?.parse().ok()
}

#[async_trait]
impl HostDom for FakeDom {
    async fn host_name(&self) -> Result<String, HostError> {
        Ok("chat.example.com".to_string())
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<Vec<ElementSnapshot>, HostError> {
        if query.item_selector != ITEM_SELECTOR {
            return Ok(Vec::new());
        }
        let state = self.state.lock();
        Ok(state
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.gone && !item.detached)
            .map(|(i, item)| item_snapshot(i, item))
            .collect())
    }

    async fn find_within(
        &self,
        scope: &NodeRef,
        selector: &str,
    ) -> Result<Option<NodeRef>, HostError> {
        let state = self.state.lock();
        let index = parse_index(scope, "item-")
            .filter(|i| *i < state.items.len())
            .ok_or_else(|| HostError::StaleReference(scope.to_string()))?;
        let item = &state.items[index];
        if item.gone || item.detached {
            return Err(HostError::StaleReference(scope.to_string()));
        }
        if selector == MENU_SELECTOR && item.has_menu {
            return Ok(Some(NodeRef::new(format!("menu-{}", index))));
        }
        Ok(None)
    }

    async fn visible_controls(&self, selector: &str) -> Result<Vec<ControlSnapshot>, HostError> {
        let state = self.state.lock();
        let controls = match selector {
            ENTRY_SELECTOR if state.menu_for.is_some() => MENU_ENTRIES
                .iter()
                .enumerate()
                .map(|(k, text)| ControlSnapshot {
                    node: NodeRef::new(format!("entry-{}", k)),
                    text: text.to_string(),
                })
                .collect(),
            ENTRY_SELECTOR if state.destinations_for.is_some() => state
                .destinations
                .iter()
                .enumerate()
                .map(|(k, text)| ControlSnapshot {
                    node: NodeRef::new(format!("dest-{}", k)),
                    text: text.clone(),
                })
                .collect(),
            CONFIRM_SELECTOR if state.dialog_for.is_some() => vec![
                ControlSnapshot {
                    node: NodeRef::new("cancel"),
                    text: "Cancel".to_string(),
                },
                ControlSnapshot {
                    node: NodeRef::new("confirm"),
                    text: "Delete".to_string(),
                },
            ],
            _ => Vec::new(),
        };
        Ok(controls)
    }

    async fn hover(&self, node: &NodeRef) -> Result<(), HostError> {
        self.state.lock().hovers.push(node.clone());
        Ok(())
    }

    async fn activate(&self, node: &NodeRef) -> Result<(), HostError> {
        let mut state = self.state.lock();
        state.activations.push(node.clone());

        if let Some(i) = parse_index(node, "menu-") {
            state.menu_for = Some(i);
            state.destinations_for = None;
            state.dialog_for = None;
            let entry = format!("menu:{}", state.items[i].title);
            state.log.push(entry);
        } else if let Some(k) = parse_index(node, "entry-") {
            let i = state
                .menu_for
                .take()
                .ok_or_else(|| HostError::StaleReference(node.to_string()))?;
            let title = state.items[i].title.clone();
            match MENU_ENTRIES[k] {
                "Delete" => {
                    state.log.push(format!("delete:{}", title));
                    if state.confirm_required {
                        state.dialog_for = Some(i);
                    } else {
                        state.items[i].gone = true;
                    }
                }
                "Move to project" => {
                    state.log.push(format!("move:{}", title));
                    state.destinations_for = Some(i);
                }
                _ => {}
            }
        } else if let Some(k) = parse_index(node, "dest-") {
            let i = state
                .destinations_for
                .take()
                .ok_or_else(|| HostError::StaleReference(node.to_string()))?;
            let destination = state.destinations[k].clone();
            let entry = format!("dest:{}:{}", state.items[i].title, destination);
            state.log.push(entry);
            state.items[i].moved_to = Some(destination);
        } else if node.as_str() == "confirm" {
            let i = state
                .dialog_for
                .take()
                .ok_or_else(|| HostError::StaleReference(node.to_string()))?;
            let entry = format!("confirm:{}", state.items[i].title);
            state.log.push(entry);
            state.items[i].gone = true;
        } else if node.as_str() == "cancel" {
            state.dialog_for = None;
        }
        Ok(())
    }

    async fn dismiss(&self) -> Result<(), HostError> {
        let mut state = self.state.lock();
        state.menu_for = None;
        state.destinations_for = None;
        state.dialog_for = None;
        state.dismissals += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct OverlayState {
    container_present: bool,
    entry_point: Option<(String, bool)>,
    injections: usize,
    selection_mode: bool,
    toolbar_attached: bool,
    mount_count: usize,
    unmount_count: usize,
    last_view: Option<ToolbarView>,
    drag_box: Option<Rect>,
    highlighted: Vec<NodeRef>,
}

/// Records what the engine asked the page-side overlay to draw.
#[derive(Debug)]
pub struct FakeOverlay {
    state: Mutex<OverlayState>,
}

impl FakeOverlay {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(OverlayState {
                container_present: true,
                ..Default::default()
            }),
        }
    }

    /// The sidebar container has not rendered yet.
    pub fn without_container() -> Self {
        Self {
            state: Mutex::new(OverlayState::default()),
        }
    }

    pub fn set_container_present(&self, present: bool) {
        self.state.lock().container_present = present;
    }

    /// Simulate the host rebuilding its sidebar and dropping the toggle.
    pub fn remove_entry_point(&self) {
        self.state.lock().entry_point = None;
    }

    pub fn entry_point(&self) -> Option<(String, bool)> {
        self.state.lock().entry_point.clone()
    }

    pub fn injections(&self) -> usize {
        self.state.lock().injections
    }

    pub fn selection_mode(&self) -> bool {
        self.state.lock().selection_mode
    }

    pub fn toolbar_attached(&self) -> bool {
        self.state.lock().toolbar_attached
    }

    pub fn mount_count(&self) -> usize {
        self.state.lock().mount_count
    }

    pub fn unmount_count(&self) -> usize {
        self.state.lock().unmount_count
    }

    pub fn last_view(&self) -> Option<ToolbarView> {
        self.state.lock().last_view.clone()
    }

    pub fn drag_box(&self) -> Option<Rect> {
        self.state.lock().drag_box
    }

    pub fn highlighted(&self) -> Vec<NodeRef> {
        self.state.lock().highlighted.clone()
    }
}

#[async_trait]
impl Overlay for FakeOverlay {
    async fn ensure_entry_point(
        &self,
        _container_selector: &str,
        label: &str,
        active: bool,
    ) -> Result<bool, HostError> {
        let mut state = self.state.lock();
        if !state.container_present {
            return Ok(false);
        }
        let injected = state.entry_point.is_none();
        state.entry_point = Some((label.to_string(), active));
        if injected {
            state.injections += 1;
        }
        Ok(injected)
    }

    async fn set_selection_mode(&self, active: bool, _item_selector: &str) -> Result<(), HostError> {
        self.state.lock().selection_mode = active;
        Ok(())
    }

    async fn mount_toolbar(&self) -> Result<(), HostError> {
        let mut state = self.state.lock();
        state.toolbar_attached = true;
        state.mount_count += 1;
        Ok(())
    }

    async fn update_toolbar(&self, view: &ToolbarView) -> Result<(), HostError> {
        let mut state = self.state.lock();
        if !state.toolbar_attached {
            return Err(HostError::Script("toolbar not mounted".to_string()));
        }
        state.last_view = Some(view.clone());
        Ok(())
    }

    async fn unmount_toolbar(&self) -> Result<(), HostError> {
        let mut state = self.state.lock();
        state.toolbar_attached = false;
        state.unmount_count += 1;
        Ok(())
    }

    async fn show_drag_box(&self, rect: Rect) -> Result<(), HostError> {
        self.state.lock().drag_box = Some(rect);
        Ok(())
    }

    async fn hide_drag_box(&self) -> Result<(), HostError> {
        self.state.lock().drag_box = None;
        Ok(())
    }

    async fn highlight(&self, nodes: &[NodeRef]) -> Result<(), HostError> {
        self.state.lock().highlighted = nodes.to_vec();
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PromptState {
    confirms: Vec<String>,
    informs: Vec<String>,
    asks: Vec<String>,
}

/// Scripted prompter; answers "yes" unless told otherwise.
#[derive(Debug)]
pub struct FakePrompter {
    accept: bool,
    answer: Option<String>,
    confirm_delay: Duration,
    state: Mutex<PromptState>,
}

impl FakePrompter {
    pub fn new() -> Self {
        Self {
            accept: true,
            answer: None,
            confirm_delay: Duration::ZERO,
            state: Mutex::new(PromptState::default()),
        }
    }

    pub fn declining() -> Self {
        Self {
            accept: false,
            ..Self::new()
        }
    }

    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            ..Self::new()
        }
    }

    /// Keep the confirmation open for `delay` before answering.
    pub fn with_confirm_delay(mut self, delay: Duration) -> Self {
        self.confirm_delay = delay;
        self
    }

    pub fn confirms(&self) -> Vec<String> {
        self.state.lock().confirms.clone()
    }

    pub fn informs(&self) -> Vec<String> {
        self.state.lock().informs.clone()
    }

    pub fn asks(&self) -> Vec<String> {
        self.state.lock().asks.clone()
    }
}

#[async_trait]
impl Prompter for FakePrompter {
    async fn confirm(&self, message: &str) -> bool {
        self.state.lock().confirms.push(message.to_string());
        if !self.confirm_delay.is_zero() {
            tokio::time::sleep(self.confirm_delay).await;
        }
        self.accept
    }

    async fn inform(&self, message: &str) {
        self.state.lock().informs.push(message.to_string());
    }

    async fn ask(&self, message: &str) -> Option<String> {
        self.state.lock().asks.push(message.to_string());
        self.answer.clone()
    }
}

/// Returns a fixed answer and records the titles it was asked about.
#[derive(Debug)]
pub struct FakeCategorizer {
    result: Result<Vec<CategoryGroup>, String>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeCategorizer {
    pub fn returning(groups: Vec<CategoryGroup>) -> Self {
        Self {
            result: Ok(groups),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Categorizer for FakeCategorizer {
    async fn categorize(&self, titles: &[String]) -> Result<Vec<CategoryGroup>, CategorizeError> {
        self.calls.lock().push(titles.to_vec());
        self.result
            .clone()
            .map_err(CategorizeError::Request)
    }
}

/// A session wired to fakes.
pub struct Harness {
    pub dom: Arc<FakeDom>,
    pub overlay: Arc<FakeOverlay>,
    pub prompter: Arc<FakePrompter>,
    pub ctx: Arc<SessionContext>,
}

impl Harness {
    /// Zero settle delays, accepting prompter, no categorizer.
    pub fn new(dom: FakeDom) -> Self {
        Self::build(dom, FakePrompter::new(), TimingsConfig::immediate(), None)
    }

    pub fn build(
        dom: FakeDom,
        prompter: FakePrompter,
        timings: TimingsConfig,
        categorizer: Option<Arc<FakeCategorizer>>,
    ) -> Self {
        let dom = Arc::new(dom);
        let overlay = Arc::new(FakeOverlay::new());
        let prompter = Arc::new(prompter);
        let mut ctx = SessionContext::new(
            test_platform(),
            dom.clone(),
            overlay.clone(),
            prompter.clone(),
        )
        .with_timings(timings);
        if let Some(categorizer) = categorizer {
            ctx = ctx.with_categorizer(categorizer);
        }
        Self {
            dom,
            overlay,
            prompter,
            ctx: Arc::new(ctx),
        }
    }

    /// Put the rows at `indices` into the selection, in that order.
    pub fn select(&self, indices: &[usize]) {
        let items: Vec<SelectableItem> = indices.iter().map(|i| self.dom.selectable(*i)).collect();
        self.ctx.with_state(|s| {
            for item in items {
                s.selection.insert(item);
            }
        });
    }

    pub fn selected_titles(&self) -> Vec<String> {
        self.ctx.with_state(|s| s.selection.titles())
    }
}
