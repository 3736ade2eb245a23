//! Editor Workflow Integration Tests
//!
//! Tests the complete editing flow including:
//! - Placing, moving, selecting and deleting items through the store
//! - Palette drags and repositions through the drag-drop controller
//! - Export configuration from presets

use diagram_core::export::PRESET_PRINT_PDF;
use diagram_core::{
    apply_preset, CanvasStore, ComponentItem, DataTransfer, DragDropController, DropEvent,
    DropOutcome, DropTarget, Editor, ExportConfig, ExportDate, ExportFormat, ExportModel,
    IgnoreReason, ItemId, Point, StoreEvent, TemplateCatalog,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Canvas surface origin used by the drop helpers.
const ORIGIN: Point = Point::new(256.0, 56.0);

fn template_a() -> ComponentItem {
    ComponentItem::new("Transformer", "power", "Transformer")
        .with_images("icons/transformer.png", "svg/transformer.svg")
        .with_args(vec![serde_json::json!(230), serde_json::json!(12)])
}

fn template_b() -> ComponentItem {
    ComponentItem::new("Breaker", "protection", "CircuitBreaker")
        .with_images("icons/breaker.png", "svg/breaker.svg")
}

/// Create a drop at a canvas-relative pointer position.
fn drop_at(x: f32, y: f32, target: DropTarget, data: DataTransfer) -> DropEvent {
    DropEvent::new(Point::new(ORIGIN.x + x, ORIGIN.y + y), ORIGIN, target, data)
}

// ============================================================================
// Store Scenarios
// ============================================================================

#[test]
fn test_place_move_remove_scenario() {
    let mut store = CanvasStore::new();

    let first = store.place(template_a(), 100.0, 100.0);
    assert_eq!(
        (first.x, first.y, first.width, first.height),
        (100.0, 100.0, 80.0, 80.0)
    );
    assert_eq!(store.selected_id(), Some(first.id));

    let second = store.place(template_b(), 200.0, 50.0);
    assert_eq!(store.selected_id(), Some(second.id));
    assert!(store.get(first.id).is_some());

    store.move_to(first.id, 150.0, 150.0);
    let moved = store.get(first.id).expect("first item present");
    assert_eq!((moved.x, moved.y), (150.0, 150.0));
    assert_eq!(store.get(second.id), Some(&second));

    store.remove(second.id);
    let view = store.query();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].id, first.id);
    assert!(view.selected.is_none());
}

#[test]
fn test_absent_ids_leave_empty_store_untouched() {
    let mut store = CanvasStore::new();
    store.move_to(ItemId::new(999), 10.0, 10.0);
    assert!(store.remove(ItemId::new(999)).is_none());
    assert!(store.query().items.is_empty());
    assert!(store.query().selected.is_none());
}

#[test]
fn test_removing_other_item_keeps_selection() {
    let mut store = CanvasStore::new();
    let a = store.place(template_a(), 0.0, 0.0);
    let b = store.place(template_b(), 0.0, 0.0);
    store.select(a.id);
    store.remove(b.id);
    assert_eq!(store.selected_id(), Some(a.id));
}

// ============================================================================
// Drag-Drop Scenarios
// ============================================================================

#[test]
fn test_palette_drag_and_reposition() {
    let mut store = CanvasStore::new();
    let mut controller = DragDropController::new();

    let mut transfer = DataTransfer::new();
    controller
        .begin_template_drag(&template_a(), &mut transfer)
        .expect("drag starts");
    let DropOutcome::Placed { item } =
        controller.drop(&mut store, &drop_at(140.0, 140.0, DropTarget::Canvas, transfer))
    else {
        panic!("template drop should place an item");
    };
    assert_eq!((item.x, item.y), (100.0, 100.0));
    assert_eq!(item.template.args, template_a().args);

    let mut transfer = DataTransfer::new();
    controller
        .begin_item_drag(&store, item.id, &mut transfer)
        .expect("drag starts");
    let outcome = controller.drop(
        &mut store,
        &drop_at(300.0, 240.0, DropTarget::Item(item.id), transfer),
    );
    assert_eq!(
        outcome,
        DropOutcome::Moved {
            id: item.id,
            position: Point::new(260.0, 200.0)
        }
    );
}

#[test]
fn test_cancelled_and_invalid_drags_do_not_mutate() {
    let mut store = CanvasStore::new();
    let mut controller = DragDropController::new();
    let events = Rc::new(RefCell::new(Vec::<StoreEvent>::new()));
    let sink = Rc::clone(&events);
    store.subscribe(move |event, _| sink.borrow_mut().push(*event));

    let mut transfer = DataTransfer::new();
    controller
        .begin_template_drag(&template_a(), &mut transfer)
        .expect("drag starts");
    assert!(controller.cancel());

    let mut forged = DataTransfer::new();
    forged.set_data("component", r#"{"name": 42}"#);
    let outcome = controller.drop(
        &mut store,
        &drop_at(10.0, 10.0, DropTarget::Canvas, forged),
    );
    assert!(matches!(outcome, DropOutcome::Ignored(IgnoreReason::Malformed { .. })));

    assert!(store.is_empty());
    assert!(events.borrow().is_empty());
}

#[test]
fn test_stale_reposition_after_delete() {
    let mut store = CanvasStore::new();
    let mut controller = DragDropController::new();
    let item = store.place(template_b(), 20.0, 20.0);

    let mut transfer = DataTransfer::new();
    controller
        .begin_item_drag(&store, item.id, &mut transfer)
        .expect("drag starts");
    store.remove(item.id);

    let outcome = controller.drop(
        &mut store,
        &drop_at(100.0, 100.0, DropTarget::Item(item.id), transfer),
    );
    assert!(!outcome.is_applied());
    assert!(store.is_empty());
}

// ============================================================================
// Editor + Export Scenarios
// ============================================================================

#[test]
fn test_editor_session_from_catalog_json() {
    let catalog = TemplateCatalog::from_json(
        r#"{
            "Power": {
                "transformer": {"name":"Transformer","icon":"t.png","svg":"t.svg","class":"power","object":"Transformer","args":[230,12]}
            },
            "Protection": {
                "breaker": {"name":"Breaker","icon":"b.png","svg":"b.svg","class":"protection","object":"CircuitBreaker","args":[]}
            }
        }"#,
    )
    .expect("catalog parses");
    let mut editor = Editor::with_export_model(
        catalog,
        ExportModel::for_date(ExportDate::new(2026, 10, 17)),
    );

    for (category, key, x) in [
        ("Power", "transformer", 100.0),
        ("Protection", "breaker", 300.0),
    ] {
        let mut transfer = DataTransfer::new();
        editor
            .begin_template_drag(category, key, &mut transfer)
            .expect("template exists");
        editor.drop(&drop_at(x, 100.0, DropTarget::Canvas, transfer));
    }
    assert_eq!(editor.stats().total_items, 2);
    assert_eq!(
        editor.properties().map(|p| p.object),
        Some("CircuitBreaker".to_string())
    );

    let first = editor.store().items()[0].id;
    editor.click(first);
    assert_eq!(editor.properties().map(|p| p.id), Some(first));

    editor.delete_selected();
    assert_eq!(editor.stats().total_items, 1);
    assert!(editor.stats().selected.is_none());

    let pdf = editor
        .export_config(Some(PRESET_PRINT_PDF))
        .expect("preset exists");
    assert_eq!(pdf.file_name(), "diagram-2026-10-17.pdf");
}

#[test]
fn test_print_pdf_preset_resolution() {
    let model = ExportModel::for_date(ExportDate::new(2026, 10, 17));
    let preset = model.preset(PRESET_PRINT_PDF).expect("preset exists");
    let config = apply_preset(preset);

    assert_eq!(config.format, ExportFormat::Pdf);
    assert!((config.scale - 1.0).abs() < f32::EPSILON);
    assert_eq!(config.padding, 72);
    assert!(config.include_background);
    assert_eq!(config.background_color, "#ffffff");
    assert!((config.quality - 0.95).abs() < f32::EPSILON);
    assert_eq!(config.filename, model.base().filename);

    let json = serde_json::to_value(&config).expect("serializes");
    assert_eq!(json["format"], "pdf");
    assert_eq!(json["includeBackground"], true);
    let back: ExportConfig = serde_json::from_value(json).expect("deserializes");
    assert_eq!(back, config);
}
