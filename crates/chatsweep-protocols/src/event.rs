//! UI events flowing from the page into the engine.

use serde::{Deserialize, Serialize};

use crate::types::{NodeRef, Point};

/// Intent forwarded by a toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolbarAction {
    Delete,
    Move,
    Categorize,
    SelectAll,
    SelectNone,
    Cancel,
    Exit,
}

impl ToolbarAction {
    /// Stable key used in the injected toolbar markup.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Move => "move",
            Self::Categorize => "categorize",
            Self::SelectAll => "selectAll",
            Self::SelectNone => "selectNone",
            Self::Cancel => "cancel",
            Self::Exit => "exit",
        }
    }
}

/// A raw user gesture or page notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UiEvent {
    /// The injected entry-point control was clicked.
    ToggleClicked,
    /// A toolbar button was clicked.
    Toolbar { action: ToolbarAction },
    #[serde(rename_all = "camelCase")]
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        in_toolbar: bool,
        #[serde(default = "default_true")]
        in_content: bool,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// A click landed on a selectable row. The host's own navigation has
    /// already been suppressed by the page side.
    ItemClick {
        node: NodeRef,
        #[serde(default)]
        shift: bool,
    },
    /// The host mutated its DOM.
    DomChanged,
    /// The page navigated; injected nodes are gone.
    Navigated,
}

fn default_true() -> bool {
    true
}

impl UiEvent {
    /// Pointer position carried by the event, if any.
    pub fn point(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some(Point::new(*x, *y))
            }
            _ => None,
        }
    }
}
