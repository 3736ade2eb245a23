//! Error types for diagram operations.

use thiserror::Error;

use crate::item::ItemId;
use crate::payload::PayloadError;

/// Result type for diagram operations.
pub type DiagramResult<T> = Result<T, DiagramError>;

/// Errors that can occur in diagram operations.
///
/// Drops carrying bad payloads and references to absent items are not errors;
/// they are handled as no-ops by the store and the drag-drop controller.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// Item not found on the canvas.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Template not present in the catalog.
    #[error("Unknown template: {category}/{key}")]
    UnknownTemplate {
        /// Catalog category that was searched.
        category: String,
        /// Item key within the category.
        key: String,
    },

    /// Export preset id not present in the preset list.
    #[error("Unknown export preset: {0}")]
    UnknownPreset(String),

    /// Export configuration failed validation.
    #[error("Invalid export configuration: {0}")]
    InvalidExportConfig(String),

    /// Drag payload could not be read.
    #[error("Drag payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
