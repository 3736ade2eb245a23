//! The read-only template catalog shown in the palette.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ComponentItem, DiagramError, DiagramResult};

/// Templates keyed by category, then by item key.
///
/// The catalog is supplied to the editor and never mutated by it. Categories
/// and keys iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    categories: BTreeMap<String, BTreeMap<String, ComponentItem>>,
}

impl TemplateCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from its nested map form.
    #[must_use]
    pub fn from_map(categories: BTreeMap<String, BTreeMap<String, ComponentItem>>) -> Self {
        Self { categories }
    }

    /// Add a template while assembling a catalog.
    #[must_use]
    pub fn with_template(
        mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        template: ComponentItem,
    ) -> Self {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(key.into(), template);
        self
    }

    /// Look up a template.
    #[must_use]
    pub fn get(&self, category: &str, key: &str) -> Option<&ComponentItem> {
        self.categories.get(category)?.get(key)
    }

    /// Look up a template, reporting which entry was missing.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownTemplate`] if the entry does not exist.
    pub fn require(&self, category: &str, key: &str) -> DiagramResult<&ComponentItem> {
        self.get(category, key)
            .ok_or_else(|| DiagramError::UnknownTemplate {
                category: category.to_string(),
                key: key.to_string(),
            })
    }

    /// Category names.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Templates in a category, with their keys.
    pub fn templates<'a>(
        &'a self,
        category: &str,
    ) -> impl Iterator<Item = (&'a str, &'a ComponentItem)> + 'a {
        self.categories
            .get(category)
            .into_iter()
            .flat_map(|items| items.iter().map(|(key, item)| (key.as_str(), item)))
    }

    /// Total number of templates across all categories.
    #[must_use]
    pub fn template_count(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    /// Check if the catalog has no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.template_count() == 0
    }

    /// Deserialize a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> DiagramResult<Self> {
        serde_json::from_str(json).map_err(DiagramError::Serialization)
    }
}
