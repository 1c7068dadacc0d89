//! The selection store.
//!
//! Pure in-memory state. Nothing here touches the page; the toolbar is
//! refreshed by the caller after every mutation.

use chatsweep_protocols::{ElementSnapshot, NodeRef, Rect};

use crate::identity::{ItemId, SelectableItem};

/// Ordered set of selected rows plus the range-select anchor.
///
/// Iteration order is insertion order, which is the order batches run in.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    items: Vec<SelectableItem>,
    anchor: Option<ItemId>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|i| &i.id == id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&SelectableItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn items(&self) -> &[SelectableItem] {
        &self.items
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|i| i.id.clone()).collect()
    }

    pub fn nodes(&self) -> Vec<NodeRef> {
        self.items.iter().map(|i| i.node.clone()).collect()
    }

    pub fn titles(&self) -> Vec<String> {
        self.items.iter().map(|i| i.title.clone()).collect()
    }

    pub fn anchor(&self) -> Option<&ItemId> {
        self.anchor.as_ref()
    }

    /// Add `item` unless its id is already present. Returns `true` if added.
    ///
    /// A re-rendered row carries a fresh node handle; the stored handle is
    /// refreshed so later operations hit the live node.
    pub fn insert(&mut self, item: SelectableItem) -> bool {
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                existing.node = item.node;
                false
            }
            None => {
                self.items.push(item);
                true
            }
        }
    }

    /// Remove if present, add otherwise. The item becomes the anchor.
    /// Returns `true` when the item is selected afterwards.
    pub fn toggle(&mut self, item: SelectableItem) -> bool {
        self.anchor = Some(item.id.clone());
        if self.remove_entry(&item.id).is_some() {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    /// Select the contiguous visual span between `anchor` and `target`.
    ///
    /// Without an anchor, or when either end is not in `visual_order`,
    /// behaves like [`toggle`](Self::toggle) on the target. The anchor is
    /// left in place so successive range clicks pivot around it.
    /// Returns the number of newly selected items.
    pub fn set_range(
        &mut self,
        anchor: Option<&ItemId>,
        target: &ItemId,
        visual_order: &[SelectableItem],
    ) -> usize {
        let Some(target_pos) = visual_order.iter().position(|i| &i.id == target) else {
            return 0;
        };
        let anchor_pos = anchor.and_then(|a| visual_order.iter().position(|i| &i.id == a));

        let Some(anchor_pos) = anchor_pos else {
            return usize::from(self.toggle(visual_order[target_pos].clone()));
        };

        let (start, end) = if anchor_pos <= target_pos {
            (anchor_pos, target_pos)
        } else {
            (target_pos, anchor_pos)
        };
        let anchor_id = visual_order[anchor_pos].id.clone();
        let added = visual_order[start..=end]
            .iter()
            .filter(|item| self.insert((*item).clone()))
            .count();
        self.anchor = Some(anchor_id);
        added
    }

    /// Paint-to-select: add every candidate whose box intersects `rect`.
    /// Never removes anything. Returns the number of newly selected items.
    pub fn union_rect(&mut self, rect: &Rect, candidates: &[ElementSnapshot]) -> usize {
        candidates
            .iter()
            .filter(|snapshot| snapshot.rect.intersects(rect))
            .filter(|snapshot| self.insert(SelectableItem::from_snapshot(snapshot)))
            .count()
    }

    pub fn remove(&mut self, id: &ItemId) -> Option<SelectableItem> {
        let removed = self.remove_entry(id);
        if removed.is_some() && self.anchor.as_ref() == Some(id) {
            self.anchor = None;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.anchor = None;
    }

    fn remove_entry(&mut self, id: &ItemId) -> Option<SelectableItem> {
        let pos = self.items.iter().position(|i| &i.id == id)?;
        Some(self.items.remove(pos))
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
