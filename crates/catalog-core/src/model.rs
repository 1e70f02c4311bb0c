//! Catalog entities as exchanged with the back-office API.
//!
//! Field names are camelCase on the wire. Identifiers are assigned by the
//! remote store and are omitted from payloads for entities it has not seen yet.

use serde::{Deserialize, Serialize};

/// One selectable value of a variant (e.g. a color or a size).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    /// Identifier assigned by the remote store. `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display label.
    pub value: String,
}

impl VariantOption {
    /// Creates an option the remote store has not seen yet.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: None,
            value: value.into(),
        }
    }

    /// Creates an option carrying a store-assigned identifier.
    #[must_use]
    pub fn persisted(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            value: value.into(),
        }
    }

    /// Returns `true` if the option carries a store-assigned identifier.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns `true` if the value is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Option payload sent in create and base-update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    pub value: String,
}

impl From<&VariantOption> for OptionValue {
    fn from(option: &VariantOption) -> Self {
        Self {
            value: option.value.clone(),
        }
    }
}

/// A named axis of product configuration holding an ordered list of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub name: String,
    /// Insertion order is display order.
    #[serde(default)]
    pub options: Vec<VariantOption>,
}

/// Payload for creating a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVariant {
    pub name: String,
    pub options: Vec<OptionValue>,
}

impl NewVariant {
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            options: values
                .into_iter()
                .map(|value| OptionValue {
                    value: value.into(),
                })
                .collect(),
        }
    }
}

/// Base-fields update of a variant, sent before option reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantUpdate {
    pub name: String,
    pub options: Vec<OptionValue>,
}

/// A product category. Categories may nest through `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Create/update payload for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl CategoryDraft {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

impl From<&Category> for CategoryDraft {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
            parent_id: category.parent_id.clone(),
        }
    }
}

/// A free-form product label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// Create/update payload for a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDraft {
    pub name: String,
}

impl TagDraft {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
