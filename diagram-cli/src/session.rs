//! Scripted editor sessions.
//!
//! A script is a JSON array of steps, each tagged with an `action`:
//!
//! ```json
//! [
//!   {"action": "drag_template", "category": "Power", "key": "transformer"},
//!   {"action": "drop", "x": 140, "y": 140},
//!   {"action": "drag_item", "id": 1},
//!   {"action": "drop", "x": 300, "y": 200, "target": 1},
//!   {"action": "delete_selected"}
//! ]
//! ```
//!
//! Drop coordinates are client coordinates; the configured canvas origin is
//! subtracted before placement. The data written by the last drag start is
//! carried to the next drop, the way the browser's drag data store is.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use diagram_core::{
    CanvasItem, DataTransfer, DropEvent, DropOutcome, DropTarget, Editor, ExportConfig, ItemId,
    Point, StoreEvent, TemplateCatalog,
};
use serde::{Deserialize, Serialize};

use crate::EditorConfig;

/// One scripted gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Start dragging a palette template.
    DragTemplate {
        /// Catalog category.
        category: String,
        /// Item key within the category.
        key: String,
    },
    /// Start dragging a placed item.
    DragItem {
        /// Item to drag.
        id: ItemId,
    },
    /// Drop at a client position.
    Drop {
        /// Pointer X in client coordinates.
        x: f32,
        /// Pointer Y in client coordinates.
        y: f32,
        /// Item that receives the drop; the bare canvas if omitted.
        #[serde(default)]
        target: Option<ItemId>,
        /// Raw channel data to drop instead of the pending drag's data.
        #[serde(default)]
        data: Option<DataTransfer>,
    },
    /// Abandon the pending drag.
    Cancel,
    /// Click a placed item.
    Click {
        /// Item to select.
        id: ItemId,
    },
    /// Delete a specific item.
    Delete {
        /// Item to delete.
        id: ItemId,
    },
    /// Delete the selected item.
    DeleteSelected,
}

/// Result of a run.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Items left on the canvas, in z-order.
    pub items: Vec<CanvasItem>,
    /// Selected item.
    pub selected: Option<ItemId>,
    /// Outcome of every drop, in order.
    pub drops: Vec<DropOutcome>,
    /// Store mutations observed during the run.
    pub events: Vec<StoreEvent>,
    /// Configuration for the external renderer.
    pub export: ExportConfig,
    /// Output file name including extension.
    pub export_file: String,
}

/// An editor session driven by script steps.
#[derive(Debug)]
pub struct Session {
    editor: Editor,
    canvas_origin: Point,
    pending: DataTransfer,
    drops: Vec<DropOutcome>,
    events: Rc<RefCell<Vec<StoreEvent>>>,
}

impl Session {
    /// Start a session over `catalog`.
    #[must_use]
    pub fn new(catalog: TemplateCatalog, canvas_origin: Point) -> Self {
        let mut editor = Editor::new(catalog);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        editor
            .store_mut()
            .subscribe(move |event, _| sink.borrow_mut().push(*event));
        Self {
            editor,
            canvas_origin,
            pending: DataTransfer::new(),
            drops: Vec::new(),
            events,
        }
    }

    /// The underlying editor.
    #[must_use]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Apply one step.
    ///
    /// # Errors
    ///
    /// Returns an error if a drag names a template or item that does not exist.
    pub fn apply(&mut self, step: &ScriptStep) -> Result<()> {
        match step {
            ScriptStep::DragTemplate { category, key } => {
                self.pending.clear();
                self.editor
                    .begin_template_drag(category, key, &mut self.pending)?;
            }
            ScriptStep::DragItem { id } => {
                self.pending.clear();
                self.editor.begin_item_drag(*id, &mut self.pending)?;
            }
            ScriptStep::Drop { x, y, target, data } => {
                // Drag data belongs to one gesture; a drop always consumes it.
                let pending = std::mem::take(&mut self.pending);
                let data = data.clone().unwrap_or(pending);
                let target = target.map_or(DropTarget::Canvas, DropTarget::Item);
                let event = DropEvent::new(Point::new(*x, *y), self.canvas_origin, target, data);
                let outcome = self.editor.drop(&event);
                tracing::debug!(?outcome, "drop handled");
                self.drops.push(outcome);
            }
            ScriptStep::Cancel => {
                self.pending.clear();
                self.editor.cancel_drag();
            }
            ScriptStep::Click { id } => self.editor.click(*id),
            ScriptStep::Delete { id } => {
                self.editor.delete(*id);
            }
            ScriptStep::DeleteSelected => {
                self.editor.delete_selected();
            }
        }
        Ok(())
    }

    /// Apply steps in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the failing step's error, annotated with its index.
    pub fn replay(&mut self, steps: &[ScriptStep]) -> Result<()> {
        for (index, step) in steps.iter().enumerate() {
            self.apply(step)
                .with_context(|| format!("script step {index} ({step:?}) failed"))?;
        }
        Ok(())
    }

    /// Finish the session and build the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the export preset is unknown or invalid.
    pub fn finish(self, preset: Option<&str>) -> Result<SessionReport> {
        let export = self.editor.export_config(preset)?;
        let export_file = export.file_name();
        let events = self.events.borrow().clone();
        Ok(SessionReport {
            items: self.editor.store().items().to_vec(),
            selected: self.editor.stats().selected,
            drops: self.drops,
            events,
            export,
            export_file,
        })
    }
}

/// Read a template catalog from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<TemplateCatalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog = TemplateCatalog::from_json(&json)
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;
    tracing::info!(
        categories = catalog.categories().count(),
        templates = catalog.template_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Read a gesture script from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let steps: Vec<ScriptStep> = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse script {}", path.display()))?;
    tracing::info!(steps = steps.len(), "script loaded");
    Ok(steps)
}

/// Load inputs, replay the script and build the report.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded, a step fails, or the export
/// preset is unknown.
pub fn run(config: &EditorConfig) -> Result<SessionReport> {
    let catalog = load_catalog(&config.catalog)?;
    let steps = match &config.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let mut session = Session::new(catalog, config.canvas_origin);
    session.replay(&steps)?;
    let report = session.finish(config.preset.as_deref())?;
    tracing::info!(
        items = report.items.len(),
        drops = report.drops.len(),
        export = %report.export_file,
        "session finished"
    );
    Ok(report)
}
