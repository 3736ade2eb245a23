//! Editor session tying the palette, canvas and export dialog together.

use serde::Serialize;

use crate::dragdrop::{DragDropController, DropOutcome};
use crate::event::{DragPreview, DropEvent, DropTarget};
use crate::export::{ExportConfig, ExportModel};
use crate::payload::DataTransfer;
use crate::{CanvasItem, CanvasStore, ComponentItem, DiagramResult, ItemId, TemplateCatalog};

/// One palette entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PaletteEntry<'a> {
    /// Key within the category.
    pub key: &'a str,
    /// The template.
    pub template: &'a ComponentItem,
}

/// A palette section.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteCategory<'a> {
    /// Category name.
    pub name: &'a str,
    /// Templates in the category.
    pub entries: Vec<PaletteEntry<'a>>,
}

/// What the properties panel shows for the selected item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemProperties {
    /// Item id.
    pub id: ItemId,
    /// Display label.
    pub name: String,
    /// Canvas image.
    pub svg: String,
    /// Semantic type tag.
    #[serde(rename = "class")]
    pub class_name: String,
    /// Component type.
    pub object: String,
    /// X position rounded to whole pixels.
    pub x: i64,
    /// Y position rounded to whole pixels.
    pub y: i64,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl From<&CanvasItem> for ItemProperties {
    fn from(item: &CanvasItem) -> Self {
        Self {
            id: item.id,
            name: item.template.name.clone(),
            svg: item.template.svg.clone(),
            class_name: item.template.class_name.clone(),
            object: item.template.object.clone(),
            x: round_half_up(item.x),
            y: round_half_up(item.y),
            width: item.width,
            height: item.height,
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_half_up(value: f32) -> i64 {
    (value + 0.5).floor() as i64
}

/// Canvas statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasStats {
    /// Number of items on the canvas.
    pub total_items: usize,
    /// Selected item, if any.
    pub selected: Option<ItemId>,
}

/// A single editor session.
#[derive(Debug)]
pub struct Editor {
    catalog: TemplateCatalog,
    store: CanvasStore,
    controller: DragDropController,
    export: ExportModel,
}

impl Editor {
    /// Create a session over `catalog` with an empty canvas.
    #[must_use]
    pub fn new(catalog: TemplateCatalog) -> Self {
        Self::with_export_model(catalog, ExportModel::default())
    }

    /// Create a session with a specific preset list.
    #[must_use]
    pub fn with_export_model(catalog: TemplateCatalog, export: ExportModel) -> Self {
        Self {
            catalog,
            store: CanvasStore::new(),
            controller: DragDropController::new(),
            export,
        }
    }

    /// The template catalog.
    #[must_use]
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// The canvas.
    #[must_use]
    pub fn store(&self) -> &CanvasStore {
        &self.store
    }

    /// Mutable access to the canvas, e.g. to subscribe.
    pub fn store_mut(&mut self) -> &mut CanvasStore {
        &mut self.store
    }

    /// The drag-drop controller.
    #[must_use]
    pub fn controller(&self) -> &DragDropController {
        &self.controller
    }

    /// The export presets.
    #[must_use]
    pub fn export_model(&self) -> &ExportModel {
        &self.export
    }

    /// Palette sections in catalog order.
    #[must_use]
    pub fn palette(&self) -> Vec<PaletteCategory<'_>> {
        self.catalog
            .categories()
            .map(|name| PaletteCategory {
                name,
                entries: self
                    .catalog
                    .templates(name)
                    .map(|(key, template)| PaletteEntry { key, template })
                    .collect(),
            })
            .collect()
    }

    /// Start dragging a palette template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is not in the catalog or cannot be
    /// serialized.
    pub fn begin_template_drag(
        &mut self,
        category: &str,
        key: &str,
        transfer: &mut DataTransfer,
    ) -> DiagramResult<Option<DragPreview>> {
        let template = self.catalog.require(category, key)?;
        self.controller.begin_template_drag(template, transfer)
    }

    /// Start dragging a placed item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not on the canvas.
    pub fn begin_item_drag(
        &mut self,
        id: ItemId,
        transfer: &mut DataTransfer,
    ) -> DiagramResult<()> {
        self.controller.begin_item_drag(&self.store, id, transfer)
    }

    /// Whether a hovering drag may drop on `target`.
    #[must_use]
    pub fn drag_over(&self, target: DropTarget, data: &DataTransfer) -> bool {
        self.controller.drag_over(target, data)
    }

    /// Handle a drop on the canvas or one of its items.
    pub fn drop(&mut self, event: &DropEvent) -> DropOutcome {
        self.controller.drop(&mut self.store, event)
    }

    /// Abandon the current drag.
    pub fn cancel_drag(&mut self) -> bool {
        self.controller.cancel()
    }

    /// Handle a click on a placed item.
    pub fn click(&mut self, id: ItemId) {
        self.controller.click(&mut self.store, id);
    }

    /// Delete a specific item.
    pub fn delete(&mut self, id: ItemId) -> Option<CanvasItem> {
        self.store.remove(id)
    }

    /// Delete the selected item.
    pub fn delete_selected(&mut self) -> Option<CanvasItem> {
        self.store.remove_selected()
    }

    /// Properties of the selected item.
    #[must_use]
    pub fn properties(&self) -> Option<ItemProperties> {
        self.store.selected_item().map(ItemProperties::from)
    }

    /// Item count and selection.
    #[must_use]
    pub fn stats(&self) -> CanvasStats {
        CanvasStats {
            total_items: self.store.len(),
            selected: self.store.selected_id(),
        }
    }

    /// Configuration for an export, from a preset or the default.
    ///
    /// The default is the base the presets were built from, so default and
    /// preset exports of one session are named after the same date.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset id is unknown or the configuration does
    /// not validate.
    pub fn export_config(&self, preset: Option<&str>) -> DiagramResult<ExportConfig> {
        let config = match preset {
            Some(id) => self.export.resolve(id)?,
            None => self.export.base().clone(),
        };
        config.validate()?;
        Ok(config)
    }
}
