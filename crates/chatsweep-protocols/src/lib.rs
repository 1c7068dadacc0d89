//! # Chatsweep Protocols
//!
//! Seams between the selection engine and the page it drives.
//! Contains only interface definitions and shared data types - no implementations.
//!
//! ## Core Traits
//!
//! - [`HostDom`] - Read and click the third-party host page
//! - [`Overlay`] - Nodes the engine injects into the page (toggle, toolbar, drag box)
//! - [`Prompter`] - Blocking confirmation and informational prompts
//! - [`Categorizer`] - Remote title categorization collaborator

pub mod categorize;
pub mod error;
pub mod event;
pub mod host;
pub mod overlay;
pub mod prompt;
pub mod types;

pub use categorize::{CategoryGroup, Categorizer};
pub use error::{BatchError, CategorizeError, HostError, SweepError};
pub use event::{ToolbarAction, UiEvent};
pub use host::{HostDom, ItemQuery};
pub use overlay::{Overlay, ToolbarButton, ToolbarView};
pub use prompt::Prompter;
pub use types::*;
