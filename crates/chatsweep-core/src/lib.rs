//! # Chatsweep Core
//!
//! The selection-and-batch-action engine.
//!
//! ## Components
//!
//! - [`PlatformRegistry`] - host name to DOM query descriptors
//! - [`SelectionStore`] - ordered, ephemeral set of selected rows
//! - [`DragSelectController`] - pointer gestures to rectangle hit-tests
//! - [`ToolbarRenderer`] - projection of session state onto the floating toolbar
//! - [`BatchRunner`] - single-flight, step-by-step automation of the host's own menus
//! - [`ModeController`] - Idle / SelectionActive / BatchRunning state machine
//!
//! Everything talks to the page through the traits in `chatsweep-protocols`,
//! so the whole engine runs against any host implementation.

pub mod batch;
pub mod drag;
pub mod identity;
pub mod messages;
pub mod mode;
pub mod platform;
pub mod selection;
pub mod session;
pub mod toolbar;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{
    ActionPlan, BatchAction, BatchReport, BatchRunner, ItemFailure, Locator, Step, StepName,
};
pub use drag::{DragRectangle, DragSelectController};
pub use identity::{ItemId, SelectableItem, identify};
pub use messages::Messages;
pub use mode::{ModeController, ModeState};
pub use platform::PlatformRegistry;
pub use selection::SelectionStore;
pub use session::{SessionContext, SessionState};
pub use toolbar::ToolbarRenderer;
