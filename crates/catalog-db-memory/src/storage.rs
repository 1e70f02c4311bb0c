use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use catalog_core::{
    CatalogStore, Category, CategoryDraft, NewVariant, OptionService, ServiceError, Tag, TagDraft,
    Variant, VariantOption, VariantUpdate,
};
use papaya::{Compute, HashMap as PapayaHashMap, Operation};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Entry stored with its creation sequence number so lists keep creation order.
#[derive(Debug, Clone)]
struct Slot<T> {
    seq: u64,
    value: T,
}

type Table<T> = Arc<PapayaHashMap<String, Slot<T>>>;

/// One option call, as seen by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionCall {
    Add { variant_id: String, value: String },
    Remove { variant_id: String, option_id: String },
}

/// In-memory catalog store using papaya lock-free HashMaps.
///
/// Mirrors the remote API contract:
/// - missing entities fail with a 404 [`ServiceError`]
/// - the base variant update sets the name and reorders existing options;
///   option membership only changes through [`OptionService`] calls
/// - `add_option` accepts duplicate values
///
/// Each change to a stored entity happens inside a single map operation, so
/// concurrent option calls on one variant never overwrite each other.
/// Category writes are serialized because they check other entries (parent
/// exists, no children) before changing the map.
///
/// Every option call is journaled, and failures can be injected per option
/// value.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    categories: Table<Category>,
    tags: Table<Tag>,
    variants: Table<Variant>,
    seq: AtomicU64,
    category_writes: Mutex<()>,
    journal: RwLock<Vec<OptionCall>>,
    fail_add: RwLock<HashSet<String>>,
    fail_remove: RwLock<HashSet<String>>,
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn list_ordered<T: Clone>(table: &Table<T>) -> Vec<T> {
    let guard = table.pin();
    let mut slots: Vec<Slot<T>> = guard.iter().map(|(_, slot)| slot.clone()).collect();
    slots.sort_by_key(|slot| slot.seq);
    slots.into_iter().map(|slot| slot.value).collect()
}

fn get_from<T: Clone>(table: &Table<T>, kind: &str, id: &str) -> Result<T, ServiceError> {
    let guard = table.pin();
    guard
        .get(id)
        .map(|slot| slot.value.clone())
        .ok_or_else(|| ServiceError::not_found(kind, id))
}

/// Replaces the entry with `update` applied to it. `update` may run more than
/// once under contention, so it must not have side effects.
fn replace_in<T: Clone>(
    table: &Table<T>,
    kind: &str,
    id: &str,
    update: impl Fn(&T) -> T,
) -> Result<T, ServiceError> {
    let guard = table.pin();
    guard
        .update(id.to_string(), |slot| Slot {
            seq: slot.seq,
            value: update(&slot.value),
        })
        .map(|slot| slot.value.clone())
        .ok_or_else(|| ServiceError::not_found(kind, id))
}

fn remove_from<T: Clone>(table: &Table<T>, kind: &str, id: &str) -> Result<(), ServiceError> {
    let guard = table.pin();
    guard
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| ServiceError::not_found(kind, id))
}

impl InMemoryCatalog {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert<T: Clone>(&self, table: &Table<T>, id: String, value: T) {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        table.pin().insert(id, Slot { seq, value });
    }

    /// Makes `add_option` fail for this value until cleared.
    pub async fn fail_add_on(&self, value: impl Into<String>) {
        self.fail_add.write().await.insert(value.into());
    }

    /// Makes `remove_option` fail for options with this value until cleared.
    pub async fn fail_remove_on(&self, value: impl Into<String>) {
        self.fail_remove.write().await.insert(value.into());
    }

    pub async fn clear_failures(&self) {
        self.fail_add.write().await.clear();
        self.fail_remove.write().await.clear();
    }

    /// Option calls received so far, in order.
    pub async fn option_calls(&self) -> Vec<OptionCall> {
        self.journal.read().await.clone()
    }

    pub fn category_count(&self) -> usize {
        self.categories.pin().len()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.pin().len()
    }

    pub fn variant_count(&self) -> usize {
        self.variants.pin().len()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    // ==================== Categories ====================

    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
        Ok(list_ordered(&self.categories))
    }

    async fn get_category(&self, id: &str) -> Result<Category, ServiceError> {
        get_from(&self.categories, "Category", id)
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ServiceError> {
        let _write = self.category_writes.lock().await;
        if let Some(parent) = draft.parent_id.as_deref() {
            get_from(&self.categories, "Category", parent)?;
        }
        let category = Category {
            id: generate_id(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            parent_id: draft.parent_id.clone(),
        };
        self.insert(&self.categories, category.id.clone(), category.clone());
        debug!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn update_category(
        &self,
        id: &str,
        draft: &CategoryDraft,
    ) -> Result<Category, ServiceError> {
        let _write = self.category_writes.lock().await;
        if let Some(parent) = draft.parent_id.as_deref() {
            get_from(&self.categories, "Category", parent)?;
        }
        replace_in(&self.categories, "Category", id, |existing| Category {
            id: existing.id.clone(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            parent_id: draft.parent_id.clone(),
        })
    }

    async fn delete_category(&self, id: &str) -> Result<(), ServiceError> {
        let _write = self.category_writes.lock().await;
        let has_children = self
            .categories
            .pin()
            .iter()
            .any(|(_, slot)| slot.value.parent_id.as_deref() == Some(id));
        if has_children {
            return Err(ServiceError::new(
                409,
                format!("Category {id} has child categories"),
            ));
        }
        remove_from(&self.categories, "Category", id)
    }

    // ==================== Tags ====================

    async fn list_tags(&self) -> Result<Vec<Tag>, ServiceError> {
        Ok(list_ordered(&self.tags))
    }

    async fn get_tag(&self, id: &str) -> Result<Tag, ServiceError> {
        get_from(&self.tags, "Tag", id)
    }

    async fn create_tag(&self, draft: &TagDraft) -> Result<Tag, ServiceError> {
        let tag = Tag {
            id: generate_id(),
            name: draft.name.clone(),
        };
        self.insert(&self.tags, tag.id.clone(), tag.clone());
        Ok(tag)
    }

    async fn update_tag(&self, id: &str, draft: &TagDraft) -> Result<Tag, ServiceError> {
        replace_in(&self.tags, "Tag", id, |existing| Tag {
            id: existing.id.clone(),
            name: draft.name.clone(),
        })
    }

    async fn delete_tag(&self, id: &str) -> Result<(), ServiceError> {
        remove_from(&self.tags, "Tag", id)
    }

    // ==================== Variants ====================

    async fn list_variants(&self) -> Result<Vec<Variant>, ServiceError> {
        Ok(list_ordered(&self.variants))
    }

    async fn get_variant(&self, id: &str) -> Result<Variant, ServiceError> {
        get_from(&self.variants, "Variant", id)
    }

    async fn create_variant(&self, variant: &NewVariant) -> Result<Variant, ServiceError> {
        let created = Variant {
            id: generate_id(),
            name: variant.name.clone(),
            options: variant
                .options
                .iter()
                .filter(|o| !o.value.trim().is_empty())
                .map(|o| VariantOption::persisted(generate_id(), o.value.clone()))
                .collect(),
        };
        self.insert(&self.variants, created.id.clone(), created.clone());
        debug!(variant_id = %created.id, options = created.options.len(), "Created variant");
        Ok(created)
    }

    async fn update_variant(
        &self,
        id: &str,
        update: &VariantUpdate,
    ) -> Result<Variant, ServiceError> {
        replace_in(&self.variants, "Variant", id, |existing| {
            let mut remaining = existing.options.clone();
            let mut options = Vec::with_capacity(remaining.len());
            for wanted in &update.options {
                if let Some(index) = remaining.iter().position(|o| o.value == wanted.value) {
                    options.push(remaining.remove(index));
                }
            }
            options.extend(remaining);
            Variant {
                id: existing.id.clone(),
                name: update.name.clone(),
                options,
            }
        })
    }

    async fn delete_variant(&self, id: &str) -> Result<(), ServiceError> {
        remove_from(&self.variants, "Variant", id)
    }
}

#[async_trait]
impl OptionService for InMemoryCatalog {
    async fn add_option(
        &self,
        variant_id: &str,
        value: &str,
    ) -> Result<VariantOption, ServiceError> {
        self.journal.write().await.push(OptionCall::Add {
            variant_id: variant_id.to_string(),
            value: value.to_string(),
        });
        if self.fail_add.read().await.contains(value) {
            return Err(ServiceError::new(500, format!("injected failure adding {value}")));
        }

        let option = VariantOption::persisted(generate_id(), value);
        replace_in(&self.variants, "Variant", variant_id, |existing| {
            let mut variant = existing.clone();
            variant.options.push(option.clone());
            variant
        })?;
        Ok(option)
    }

    async fn remove_option(&self, variant_id: &str, option_id: &str) -> Result<(), ServiceError> {
        self.journal.write().await.push(OptionCall::Remove {
            variant_id: variant_id.to_string(),
            option_id: option_id.to_string(),
        });

        let fail_remove = self.fail_remove.read().await;

        let guard = self.variants.pin();
        let result = guard.compute(variant_id.to_string(), |entry| {
            let Some((_, slot)) = entry else {
                return Operation::Abort(ServiceError::not_found("Variant", variant_id));
            };
            let Some(option) = slot
                .value
                .options
                .iter()
                .find(|o| o.id.as_deref() == Some(option_id))
            else {
                return Operation::Abort(ServiceError::not_found("Option", option_id));
            };
            if fail_remove.contains(&option.value) {
                return Operation::Abort(ServiceError::new(
                    500,
                    format!("injected failure removing {}", option.value),
                ));
            }
            let mut variant = slot.value.clone();
            variant.options.retain(|o| o.id.as_deref() != Some(option_id));
            Operation::Insert(Slot {
                seq: slot.seq,
                value: variant,
            })
        });
        match result {
            Compute::Aborted(err) => Err(err),
            _ => Ok(()),
        }
    }
}
