//! Canvas item storage with derived selection and change notification.
//!
//! [`CanvasStore`] owns the ordered collection of placed items. Collection
//! order is z-order: later items are drawn on top. Selection is stored as an
//! id only and is resolved against the live collection on every read, so a
//! deleted item can never be observed through a stale selection.

use serde::Serialize;

use crate::{CanvasItem, ComponentItem, ItemId};

/// Handle returned by [`CanvasStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A mutation that has been applied to the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A new item was appended and selected.
    Placed {
        /// Id of the new item.
        id: ItemId,
    },
    /// An item changed position.
    Moved {
        /// Id of the moved item.
        id: ItemId,
        /// New X position.
        x: f32,
        /// New Y position.
        y: f32,
    },
    /// The selection changed.
    Selected {
        /// Newly selected id, or `None` when cleared.
        id: Option<ItemId>,
    },
    /// An item was deleted.
    Removed {
        /// Id of the deleted item.
        id: ItemId,
    },
}

/// Read-only snapshot of the store.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StoreView<'a> {
    /// All items in z-order.
    pub items: &'a [CanvasItem],
    /// The selected item, resolved against `items`.
    pub selected: Option<&'a CanvasItem>,
}

type Listener = Box<dyn FnMut(&StoreEvent, StoreView<'_>)>;

/// The ordered collection of placed items plus the current selection.
pub struct CanvasStore {
    items: Vec<CanvasItem>,
    selected: Option<ItemId>,
    next_id: u64,
    revision: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl std::fmt::Debug for CanvasStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasStore")
            .field("items", &self.items)
            .field("selected", &self.selected)
            .field("next_id", &self.next_id)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            next_id: 1,
            revision: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Place a copy of `template` at `(x, y)` with the default size.
    ///
    /// The item is appended on top of all existing items and becomes the
    /// selection.
    pub fn place(&mut self, template: ComponentItem, x: f32, y: f32) -> CanvasItem {
        let id = self.mint_id();
        let item = CanvasItem::from_template(template, id, x, y);
        self.items.push(item.clone());
        self.selected = Some(id);
        tracing::debug!(%id, x, y, name = %item.name(), "placed item");
        self.notify(StoreEvent::Placed { id });
        item
    }

    /// Move an item without changing its place in the z-order.
    ///
    /// Does nothing if `id` is not on the canvas.
    pub fn move_to(&mut self, id: ItemId, x: f32, y: f32) {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            tracing::trace!(%id, "move ignored, item not found");
            return;
        };
        item.x = x;
        item.y = y;
        tracing::debug!(%id, x, y, "moved item");
        self.notify(StoreEvent::Moved { id, x, y });
    }

    /// Set the selection.
    ///
    /// The id is not checked; an id with no live item reads back as no
    /// selection.
    pub fn select(&mut self, id: ItemId) {
        self.selected = Some(id);
        self.notify(StoreEvent::Selected { id: Some(id) });
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.notify(StoreEvent::Selected { id: None });
        }
    }

    /// Delete an item, clearing the selection if it pointed at it.
    ///
    /// Returns the removed item, or `None` if `id` was not on the canvas.
    pub fn remove(&mut self, id: ItemId) -> Option<CanvasItem> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            tracing::trace!(%id, "remove ignored, item not found");
            return None;
        };
        let removed = self.items.remove(index);
        tracing::debug!(%id, "removed item");
        self.notify(StoreEvent::Removed { id });
        if self.selected == Some(id) {
            self.selected = None;
            self.notify(StoreEvent::Selected { id: None });
        }
        Some(removed)
    }

    /// Delete the selected item, if there is one.
    pub fn remove_selected(&mut self) -> Option<CanvasItem> {
        let id = self.selected_item()?.id;
        self.remove(id)
    }

    /// Snapshot of all items and the resolved selection.
    #[must_use]
    pub fn query(&self) -> StoreView<'_> {
        StoreView {
            items: &self.items,
            selected: self.selected_item(),
        }
    }

    /// All items in z-order.
    #[must_use]
    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    /// Get an item by id.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The selected item, looked up in the live collection.
    #[must_use]
    pub fn selected_item(&self) -> Option<&CanvasItem> {
        self.selected.and_then(|id| self.get(id))
    }

    /// The selected id, if it refers to a live item.
    #[must_use]
    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected_item().map(|item| item.id)
    }

    /// Find the topmost item containing the given canvas point.
    #[must_use]
    pub fn item_at(&self, x: f32, y: f32) -> Option<&CanvasItem> {
        self.items.iter().rev().find(|item| item.contains_point(x, y))
    }

    /// Number of items on the canvas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the canvas is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Count of applied mutations. Increases on every change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a listener called after every applied mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, StoreView<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn mint_id(&mut self) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn notify(&mut self, event: StoreEvent) {
        self.revision += 1;
        if self.listeners.is_empty() {
            return;
        }
        // Listeners get a shared view of the store, so they are detached while running.
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in &mut listeners {
            listener(&event, self.query());
        }
        self.listeners = listeners;
    }
}
