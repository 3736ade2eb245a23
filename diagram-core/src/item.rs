//! Component templates and the items placed from them.

use serde::{Deserialize, Serialize};

/// Width and height, in pixels, given to every placed item.
pub const DEFAULT_ITEM_SIZE: f32 = 80.0;

/// Unique identifier for a placed item.
///
/// Ids are handed out by [`crate::CanvasStore`] from a monotonic counter and
/// are never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wrap a raw id value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A component definition from the template catalog.
///
/// Templates are immutable; placing one on the canvas copies it into a
/// [`CanvasItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentItem {
    /// Display label.
    pub name: String,
    /// Small preview image shown in the palette.
    pub icon: String,
    /// Full-size image drawn on the canvas.
    pub svg: String,
    /// Semantic type tag.
    #[serde(rename = "class")]
    pub class_name: String,
    /// Underlying component identifier.
    pub object: String,
    /// Constructor arguments, passed through untouched.
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

impl ComponentItem {
    /// Create a template with no constructor arguments.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        class_name: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            icon: String::new(),
            svg: String::new(),
            class_name: class_name.into(),
            object: object.into(),
            args: Vec::new(),
        }
    }

    /// Set the palette icon and canvas image.
    #[must_use]
    pub fn with_images(mut self, icon: impl Into<String>, svg: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.svg = svg.into();
        self
    }

    /// Set the constructor arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<serde_json::Value>) -> Self {
        self.args = args;
        self
    }
}

/// A placed, positioned copy of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasItem {
    /// Template fields, flattened so the wire shape matches a template plus
    /// placement data.
    #[serde(flatten)]
    pub template: ComponentItem,
    /// Unique identifier.
    pub id: ItemId,
    /// X position (pixels from the canvas left edge).
    pub x: f32,
    /// Y position (pixels from the canvas top edge).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl CanvasItem {
    /// Create an item of default size from a template.
    #[must_use]
    pub fn from_template(template: ComponentItem, id: ItemId, x: f32, y: f32) -> Self {
        Self {
            template,
            id,
            x,
            y,
            width: DEFAULT_ITEM_SIZE,
            height: DEFAULT_ITEM_SIZE,
        }
    }

    /// Display label of the underlying template.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// Check if a point (in canvas coordinates) is within this item.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}
