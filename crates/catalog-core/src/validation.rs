//! Field-level validation run before anything is sent to the remote store.

use std::fmt;

use crate::model::{CategoryDraft, NewVariant, TagDraft};

pub const CATEGORY_NAME_MAX: usize = 100;
pub const TAG_NAME_MAX: usize = 50;
pub const VARIANT_NAME_MAX: usize = 100;
pub const OPTION_VALUE_MAX: usize = 100;

/// A single field failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of field failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message reported for `field`.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Converts into `Err` when at least one field failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

fn check_name(errors: &mut ValidationErrors, field: &str, name: &str, max: usize) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        errors.push(field, "is required");
    } else if trimmed.chars().count() > max {
        errors.push(field, format!("must be at most {max} characters"));
    }
}

fn check_option_values<'a>(errors: &mut ValidationErrors, values: impl Iterator<Item = &'a str>) {
    for (index, value) in values.enumerate() {
        if value.trim().chars().count() > OPTION_VALUE_MAX {
            errors.push(
                format!("options[{index}]"),
                format!("must be at most {OPTION_VALUE_MAX} characters"),
            );
        }
    }
}

/// Validates a category payload. `own_id` is set when updating.
pub fn validate_category(
    draft: &CategoryDraft,
    own_id: Option<&str>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_name(&mut errors, "name", &draft.name, CATEGORY_NAME_MAX);
    if let (Some(parent), Some(own)) = (draft.parent_id.as_deref(), own_id)
        && parent == own
    {
        errors.push("parentId", "a category cannot be its own parent");
    }
    errors.into_result()
}

pub fn validate_tag(draft: &TagDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_name(&mut errors, "name", &draft.name, TAG_NAME_MAX);
    errors.into_result()
}

/// Validates a variant create payload. At least one non-blank option is required.
pub fn validate_new_variant(variant: &NewVariant) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_name(&mut errors, "name", &variant.name, VARIANT_NAME_MAX);
    if variant.options.iter().all(|o| o.value.trim().is_empty()) {
        errors.push("options", "at least one option is required");
    }
    check_option_values(&mut errors, variant.options.iter().map(|o| o.value.as_str()));
    errors.into_result()
}

/// Validates the fields of an edit session before submit.
pub fn validate_variant_edit<'a>(
    name: &str,
    option_values: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_name(&mut errors, "name", name, VARIANT_NAME_MAX);
    check_option_values(&mut errors, option_values);
    errors.into_result()
}
