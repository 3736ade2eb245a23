//! Drag-and-drop controller for placing and repositioning items.
//!
//! Two protocols share one pointer-drag mechanism:
//!
//! ```text
//! palette  --dragstart--> [component] --drop on canvas--> place
//! item     --dragstart--> [move]      --drop on item----> move (ids must match)
//! ```
//!
//! Each gesture runs `Idle -> Dragging -> Idle`. Only a valid drop mutates
//! the store; invalid drops and cancelled drags leave it untouched.

use serde::Serialize;

use crate::event::{DragPreview, DropEvent, DropTarget, Point};
use crate::item::DEFAULT_ITEM_SIZE;
use crate::payload::{Channel, DataTransfer, PayloadError};
use crate::{CanvasItem, CanvasStore, ComponentItem, DiagramError, DiagramResult, ItemId};

/// Distance subtracted from the pointer on both axes so a dropped item is
/// centred under it.
pub const DROP_CENTER_OFFSET: f32 = DEFAULT_ITEM_SIZE / 2.0;

/// Where the current drag started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum DragSource {
    /// A template in the palette.
    Palette,
    /// A placed item.
    Item(ItemId),
}

/// Gesture state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag has written its payload and is waiting for a drop.
    Dragging {
        /// Channel the payload was written to.
        channel: Channel,
        /// Origin of the drag.
        source: DragSource,
    },
}

/// Why a drop did not change the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Neither channel carried data.
    NoPayload,
    /// A channel carried text that did not decode.
    Malformed {
        /// Channel with the bad payload.
        channel: Channel,
    },
    /// A reposition payload landed on a different item.
    IdMismatch {
        /// Id carried in the payload.
        payload: ItemId,
        /// Id of the item that received the drop.
        target: ItemId,
    },
    /// The item being repositioned was deleted during the drag.
    ItemGone {
        /// Id of the missing item.
        id: ItemId,
    },
}

/// Result of handling a drop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    /// A new item was placed.
    Placed {
        /// The placed item.
        item: CanvasItem,
    },
    /// An existing item was repositioned.
    Moved {
        /// Id of the moved item.
        id: ItemId,
        /// New position.
        position: Point,
    },
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl DropOutcome {
    /// Check if the drop changed the store.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// Translates drag gestures into [`CanvasStore`] operations.
#[derive(Debug, Clone, Default)]
pub struct DragDropController {
    state: DragState,
}

impl DragDropController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Check if a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start dragging a template from the palette.
    ///
    /// Writes the template onto the `component` channel and returns the
    /// preview to show under the pointer, if the template has an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be serialized.
    pub fn begin_template_drag(
        &mut self,
        template: &ComponentItem,
        transfer: &mut DataTransfer,
    ) -> DiagramResult<Option<DragPreview>> {
        transfer.put_template(template)?;
        self.state = DragState::Dragging {
            channel: Channel::Component,
            source: DragSource::Palette,
        };
        tracing::trace!(name = %template.name, "template drag started");

        Ok((!template.svg.is_empty()).then(|| DragPreview {
            src: template.svg.clone(),
            width: DEFAULT_ITEM_SIZE,
            height: DEFAULT_ITEM_SIZE,
            hotspot: Point::new(DROP_CENTER_OFFSET, DROP_CENTER_OFFSET),
        }))
    }

    /// Start dragging a placed item.
    ///
    /// Writes the item's current state onto the `move` channel.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::ItemNotFound`] if `id` is not on the canvas.
    pub fn begin_item_drag(
        &mut self,
        store: &CanvasStore,
        id: ItemId,
        transfer: &mut DataTransfer,
    ) -> DiagramResult<()> {
        let item = store.get(id).ok_or(DiagramError::ItemNotFound(id))?;
        transfer.put_item(item)?;
        self.state = DragState::Dragging {
            channel: Channel::Move,
            source: DragSource::Item(id),
        };
        tracing::trace!(%id, "item drag started");
        Ok(())
    }

    /// Whether a drag hovering `target` with `data` should be allowed to drop.
    ///
    /// The canvas and every placed item accept any drag carrying a protocol
    /// channel; foreign drags such as plain text are refused.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn drag_over(&self, target: DropTarget, data: &DataTransfer) -> bool {
        let accepted = data.channels().next().is_some();
        tracing::trace!(?target, accepted, "drag over");
        accepted
    }

    /// Handle a drop and return to idle.
    ///
    /// A drop on an item is first offered to the reposition protocol and then
    /// reaches the canvas surface, where the placement protocol runs.
    pub fn drop(&mut self, store: &mut CanvasStore, event: &DropEvent) -> DropOutcome {
        self.state = DragState::Idle;
        let position = drop_position(event);

        let mut reason = IgnoreReason::NoPayload;
        if let DropTarget::Item(target) = event.target {
            match event.data.item() {
                Ok(moved) if moved.id == target => {
                    if store.get(target).is_none() {
                        tracing::debug!(id = %target, "reposition dropped, item no longer exists");
                        return DropOutcome::Ignored(IgnoreReason::ItemGone { id: target });
                    }
                    store.move_to(target, position.x, position.y);
                    return DropOutcome::Moved {
                        id: target,
                        position,
                    };
                }
                Ok(moved) => {
                    tracing::debug!(
                        payload = %moved.id,
                        %target,
                        "reposition dropped on another item"
                    );
                    reason = IgnoreReason::IdMismatch {
                        payload: moved.id,
                        target,
                    };
                }
                Err(err) => reason = ignore_reason(&err).unwrap_or(reason),
            }
        }

        match event.data.template() {
            Ok(template) => {
                let item = store.place(template, position.x, position.y);
                DropOutcome::Placed { item }
            }
            Err(err) => {
                if reason == IgnoreReason::NoPayload {
                    reason = ignore_reason(&err).unwrap_or(reason);
                }
                tracing::debug!(?reason, "drop ignored");
                DropOutcome::Ignored(reason)
            }
        }
    }

    /// Abandon the current drag without touching the store.
    ///
    /// Returns `true` if a drag was in progress.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        if was_dragging {
            tracing::trace!("drag cancelled");
        }
        was_dragging
    }

    /// Handle a click (not a drag) on a placed item.
    #[allow(clippy::unused_self)]
    pub fn click(&self, store: &mut CanvasStore, id: ItemId) {
        store.select(id);
    }
}

/// Top-left position for an item dropped at the event's pointer location.
#[must_use]
pub fn drop_position(event: &DropEvent) -> Point {
    let point = event.canvas_point();
    Point::new(point.x - DROP_CENTER_OFFSET, point.y - DROP_CENTER_OFFSET)
}

fn ignore_reason(err: &PayloadError) -> Option<IgnoreReason> {
    match err {
        PayloadError::Missing(_) | PayloadError::UnknownChannel(_) => None,
        PayloadError::Malformed { channel, .. } => {
            Some(IgnoreReason::Malformed { channel: *channel })
        }
    }
}
