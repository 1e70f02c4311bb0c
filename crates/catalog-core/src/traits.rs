//! Remote collaborators consumed by catalog workflows.
//!
//! The back-office API is the source of truth. Implementations only report
//! success or a [`ServiceError`]; retries and rollback are not part of the contract.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::model::{
    Category, CategoryDraft, NewVariant, Tag, TagDraft, Variant, VariantOption, VariantUpdate,
};

/// Per-option operations on a variant.
///
/// Each call is independent; the reconciler issues them one at a time.
#[async_trait]
pub trait OptionService: Send + Sync {
    /// Persists a new option and returns it with its assigned identifier.
    async fn add_option(&self, variant_id: &str, value: &str)
    -> Result<VariantOption, ServiceError>;

    /// Removes a persisted option.
    async fn remove_option(&self, variant_id: &str, option_id: &str) -> Result<(), ServiceError>;
}

/// CRUD over categories, tags and variants.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // ==================== Categories ====================

    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError>;

    async fn get_category(&self, id: &str) -> Result<Category, ServiceError>;

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ServiceError>;

    async fn update_category(
        &self,
        id: &str,
        draft: &CategoryDraft,
    ) -> Result<Category, ServiceError>;

    async fn delete_category(&self, id: &str) -> Result<(), ServiceError>;

    // ==================== Tags ====================

    async fn list_tags(&self) -> Result<Vec<Tag>, ServiceError>;

    async fn get_tag(&self, id: &str) -> Result<Tag, ServiceError>;

    async fn create_tag(&self, draft: &TagDraft) -> Result<Tag, ServiceError>;

    async fn update_tag(&self, id: &str, draft: &TagDraft) -> Result<Tag, ServiceError>;

    async fn delete_tag(&self, id: &str) -> Result<(), ServiceError>;

    // ==================== Variants ====================

    async fn list_variants(&self) -> Result<Vec<Variant>, ServiceError>;

    async fn get_variant(&self, id: &str) -> Result<Variant, ServiceError>;

    async fn create_variant(&self, variant: &NewVariant) -> Result<Variant, ServiceError>;

    /// Base-fields update: name plus the sanitized option values.
    ///
    /// Option identifiers are not sent; per-option changes go through
    /// [`OptionService`] afterwards.
    async fn update_variant(
        &self,
        id: &str,
        update: &VariantUpdate,
    ) -> Result<Variant, ServiceError>;

    async fn delete_variant(&self, id: &str) -> Result<(), ServiceError>;
}
