//! Client-side list search.

use crate::model::{Category, Tag, Variant};

/// Entities that can be matched against a free-text query.
pub trait Searchable {
    fn name(&self) -> &str;

    /// Matches a lowercased, trimmed, non-empty query.
    fn matches(&self, query: &str) -> bool {
        self.name().to_lowercase().contains(query)
    }
}

impl Searchable for Category {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(query))
    }
}

impl Searchable for Tag {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Searchable for Variant {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self
                .options
                .iter()
                .any(|o| o.value.to_lowercase().contains(query))
    }
}

/// Case-insensitive substring search. Keeps input order; a blank query keeps everything.
pub fn search<T: Searchable>(items: Vec<T>, query: &str) -> Vec<T> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items;
    }
    items.into_iter().filter(|item| item.matches(&query)).collect()
}

/// Sorts by name, case-insensitively. Stable for equal names.
pub fn sort_by_name<T: Searchable>(items: &mut [T]) {
    items.sort_by_key(|item| item.name().to_lowercase());
}
