//! Diffing an edited option list against the snapshot loaded at session start.

use std::collections::HashSet;

use crate::model::{OptionValue, VariantOption};

/// Remote changes needed to bring a variant's options in line with a local edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsDiff {
    /// Options without an identifier, in edited-list order.
    pub to_add: Vec<VariantOption>,
    /// Persisted options missing from the edited list, in snapshot order.
    pub to_remove: Vec<VariantOption>,
}

impl OptionsDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Number of remote calls the diff will issue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }
}

/// Computes which options to add and which to remove.
///
/// Options sharing an identifier across both lists are left alone, so a value
/// edited in place is never sent. Identifiers present only in `current` are
/// ignored. Blank values without an identifier are dropped.
#[must_use]
pub fn reconcile(original: &[VariantOption], current: &[VariantOption]) -> OptionsDiff {
    let to_add = current
        .iter()
        .filter(|o| o.id.is_none() && !o.is_blank())
        .cloned()
        .collect();

    let kept: HashSet<&str> = current.iter().filter_map(|o| o.id.as_deref()).collect();

    let to_remove = original
        .iter()
        .filter(|o| o.id.as_deref().is_some_and(|id| !kept.contains(id)))
        .cloned()
        .collect();

    OptionsDiff { to_add, to_remove }
}

/// Option values for the base-fields update, blank values filtered out.
#[must_use]
pub fn sanitize_options(current: &[VariantOption]) -> Vec<OptionValue> {
    current
        .iter()
        .filter(|o| !o.is_blank())
        .map(OptionValue::from)
        .collect()
}
