//! Stable identity of selectable rows.

use chatsweep_protocols::{ElementSnapshot, NodeRef};
use serde::Serialize;

/// Maximum characters of normalized title used in a text-derived id.
pub const TEXT_ID_LEN: usize = 64;

/// Identifier of a logical chat, stable across re-renders of the same row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the id of a row from an immutable snapshot.
///
/// The stable attribute wins when present; otherwise the normalized title
/// truncated to [`TEXT_ID_LEN`] characters. Two distinct chats with the same
/// leading title collide.
pub fn identify(snapshot: &ElementSnapshot) -> ItemId {
    if let Some(attr) = snapshot
        .id_attribute
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
    {
        return ItemId(format!("attr:{}", attr));
    }

    let snippet: String = collapse_whitespace(&snapshot.title)
        .to_lowercase()
        .chars()
        .take(TEXT_ID_LEN)
        .collect();
    ItemId(format!("text:{}", snippet))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A selected row: identity, cached title and the live node handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectableItem {
    pub id: ItemId,
    pub title: String,
    #[serde(skip)]
    pub node: NodeRef,
}

impl SelectableItem {
    pub fn from_snapshot(snapshot: &ElementSnapshot) -> Self {
        Self {
            id: identify(snapshot),
            title: collapse_whitespace(&snapshot.title),
            node: snapshot.node.clone(),
        }
    }
}
