//! # Diagram Editor Core
//!
//! Canvas item lifecycle, drag-and-drop placement and export configuration
//! for a component diagram editor. Compiles to WASM for the browser editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              diagram-core.wasm              │
//! ├─────────────────────────────────────────────┤
//! │  Template Catalog  │  Drag-Drop Controller  │
//! │  - Categories      │  - component channel   │
//! │  - Templates       │  - move channel        │
//! ├─────────────────────────────────────────────┤
//! │  Canvas Store      │  Export Model          │
//! │  - Z-ordered items │  - Default config      │
//! │  - Selection       │  - Merged presets      │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod dragdrop;
pub mod editor;
pub mod error;
pub mod event;
pub mod export;
pub mod item;
pub mod payload;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use catalog::TemplateCatalog;
pub use dragdrop::{DragDropController, DragSource, DragState, DropOutcome, IgnoreReason};
pub use editor::{CanvasStats, Editor, ItemProperties, PaletteCategory, PaletteEntry};
pub use error::{DiagramError, DiagramResult};
pub use event::{DragPreview, DropEvent, DropTarget, Point};
pub use export::{
    apply_preset, resolve_default, ExportConfig, ExportDate, ExportFormat, ExportModel,
    ExportPreset, ExportScale,
};
pub use item::{CanvasItem, ComponentItem, ItemId, DEFAULT_ITEM_SIZE};
pub use payload::{Channel, DataTransfer, PayloadError};
pub use store::{CanvasStore, StoreEvent, StoreView, SubscriptionId};

/// Diagram core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
