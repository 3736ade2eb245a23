//! WebAssembly bindings for diagram-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! Payloads cross the boundary as the raw strings stored in the browser's
//! drag data store, so the same decode rules apply as for native callers.

use wasm_bindgen::prelude::*;

use crate::event::{DropEvent, DropTarget, Point};
use crate::payload::{Channel, DataTransfer};
use crate::{Editor, ItemId, TemplateCatalog};

/// Initialize the diagram WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn item_id(raw: f64) -> ItemId {
    ItemId::new(raw as u64)
}

#[allow(clippy::cast_precision_loss)]
fn js_id(id: ItemId) -> f64 {
    id.get() as f64
}

/// Editor session for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Editor,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create a session over a catalog given as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the catalog JSON is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str) -> Result<WasmEditor, String> {
        let catalog = TemplateCatalog::from_json(catalog_json).map_err(|e| e.to_string())?;
        Ok(Self {
            editor: Editor::new(catalog),
        })
    }

    /// Get the palette as JSON.
    #[wasm_bindgen(js_name = getPaletteJson)]
    #[must_use]
    pub fn get_palette_json(&self) -> String {
        serde_json::to_string(&self.editor.palette()).unwrap_or_default()
    }

    /// Start a palette drag and return the text for the `component` channel.
    ///
    /// # Errors
    ///
    /// Returns an error string if the template is unknown.
    #[wasm_bindgen(js_name = beginTemplateDrag)]
    pub fn begin_template_drag(&mut self, category: &str, key: &str) -> Result<String, String> {
        let mut transfer = DataTransfer::new();
        self.editor
            .begin_template_drag(category, key, &mut transfer)
            .map_err(|e| e.to_string())?;
        Ok(transfer
            .get_data(Channel::Component.as_str())
            .unwrap_or_default()
            .to_string())
    }

    /// Start an item drag and return the text for the `move` channel.
    ///
    /// # Errors
    ///
    /// Returns an error string if the item is not on the canvas.
    #[wasm_bindgen(js_name = beginItemDrag)]
    pub fn begin_item_drag(&mut self, id: f64) -> Result<String, String> {
        let mut transfer = DataTransfer::new();
        self.editor
            .begin_item_drag(item_id(id), &mut transfer)
            .map_err(|e| e.to_string())?;
        Ok(transfer
            .get_data(Channel::Move.as_str())
            .unwrap_or_default()
            .to_string())
    }

    /// Handle a drop from raw channel texts. Returns the outcome as JSON.
    ///
    /// `target_id` is the id of the item that received the drop, or
    /// `undefined` for the bare canvas.
    #[wasm_bindgen(js_name = handleDrop)]
    #[allow(clippy::too_many_arguments)]
    pub fn handle_drop(
        &mut self,
        target_id: Option<f64>,
        component: Option<String>,
        move_payload: Option<String>,
        client_x: f32,
        client_y: f32,
        origin_x: f32,
        origin_y: f32,
    ) -> String {
        let mut data = DataTransfer::new();
        if let Some(text) = component {
            data.set_data(Channel::Component.as_str(), text);
        }
        if let Some(text) = move_payload {
            data.set_data(Channel::Move.as_str(), text);
        }
        let target = target_id.map_or(DropTarget::Canvas, |id| DropTarget::Item(item_id(id)));
        let event = DropEvent::new(
            Point::new(client_x, client_y),
            Point::new(origin_x, origin_y),
            target,
            data,
        );
        let outcome = self.editor.drop(&event);
        serde_json::to_string(&outcome).unwrap_or_default()
    }

    /// Handle a browser `drop` event. `canvas` is the canvas surface element.
    #[wasm_bindgen(js_name = dropEvent)]
    pub fn drop_event(
        &mut self,
        event: &web_sys::DragEvent,
        canvas: &web_sys::Element,
        target_id: Option<f64>,
    ) -> String {
        event.prevent_default();
        let read = |channel: Channel| {
            event
                .data_transfer()
                .and_then(|dt| dt.get_data(channel.as_str()).ok())
                .filter(|text| !text.is_empty())
        };
        let rect = canvas.get_bounding_client_rect();
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let (client_x, client_y, origin_x, origin_y) = (
            event.client_x() as f32,
            event.client_y() as f32,
            rect.left() as f32,
            rect.top() as f32,
        );
        self.handle_drop(
            target_id,
            read(Channel::Component),
            read(Channel::Move),
            client_x,
            client_y,
            origin_x,
            origin_y,
        )
    }

    /// Abandon the current drag.
    #[wasm_bindgen(js_name = cancelDrag)]
    pub fn cancel_drag(&mut self) -> bool {
        self.editor.cancel_drag()
    }

    /// Select an item.
    pub fn click(&mut self, id: f64) {
        self.editor.click(item_id(id));
    }

    /// Delete an item. Returns `false` if it was not on the canvas.
    #[wasm_bindgen(js_name = deleteItem)]
    pub fn delete_item(&mut self, id: f64) -> bool {
        self.editor.delete(item_id(id)).is_some()
    }

    /// Delete the selected item. Returns `false` if nothing was selected.
    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selected().is_some()
    }

    /// Get the selected item id, if any.
    #[wasm_bindgen(js_name = selectedId)]
    #[must_use]
    pub fn selected_id(&self) -> Option<f64> {
        self.editor.stats().selected.map(js_id)
    }

    /// Get all items and the selected item as JSON.
    #[wasm_bindgen(js_name = getCanvasJson)]
    #[must_use]
    pub fn get_canvas_json(&self) -> String {
        serde_json::to_string(&self.editor.store().query()).unwrap_or_default()
    }

    /// Get the properties of the selected item as JSON (`null` if none).
    #[wasm_bindgen(js_name = getPropertiesJson)]
    #[must_use]
    pub fn get_properties_json(&self) -> String {
        serde_json::to_string(&self.editor.properties()).unwrap_or_default()
    }

    /// Get the export presets as JSON.
    #[wasm_bindgen(js_name = getPresetsJson)]
    #[must_use]
    pub fn get_presets_json(&self) -> String {
        serde_json::to_string(self.editor.export_model().presets()).unwrap_or_default()
    }

    /// Resolve an export configuration as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the preset id is unknown.
    #[wasm_bindgen(js_name = exportConfigJson)]
    #[allow(clippy::needless_pass_by_value)]
    pub fn export_config_json(&self, preset: Option<String>) -> Result<String, String> {
        let config = self
            .editor
            .export_config(preset.as_deref())
            .map_err(|e| e.to_string())?;
        serde_json::to_string(&config).map_err(|e| e.to_string())
    }
}
