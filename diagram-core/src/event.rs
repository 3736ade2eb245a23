//! Pointer and drop events delivered by the host UI.

use serde::{Deserialize, Serialize};

use crate::{DataTransfer, ItemId};

/// A point in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference.
    #[must_use]
    pub fn offset_from(self, origin: Self) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y)
    }
}

/// The element that received a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum DropTarget {
    /// The canvas surface itself.
    Canvas,
    /// A placed item. Drops here also reach the canvas surface.
    Item(ItemId),
}

/// A drop delivered to the canvas or to one of its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEvent {
    /// Pointer position in client (viewport) coordinates.
    pub client: Point,
    /// Top-left of the canvas surface in client coordinates.
    pub canvas_origin: Point,
    /// Element that received the drop.
    pub target: DropTarget,
    /// Payload carried by the gesture.
    pub data: DataTransfer,
}

impl DropEvent {
    /// Create a drop event.
    #[must_use]
    pub fn new(
        client: Point,
        canvas_origin: Point,
        target: DropTarget,
        data: DataTransfer,
    ) -> Self {
        Self {
            client,
            canvas_origin,
            target,
            data,
        }
    }

    /// Pointer position relative to the canvas surface.
    #[must_use]
    pub fn canvas_point(&self) -> Point {
        self.client.offset_from(self.canvas_origin)
    }
}

/// Image shown under the pointer while a template is dragged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPreview {
    /// Image reference.
    pub src: String,
    /// Preview width in pixels.
    pub width: f32,
    /// Preview height in pixels.
    pub height: f32,
    /// Pointer position within the preview.
    pub hotspot: Point,
}
