//! In-memory catalog store.
//!
//! This crate provides an in-memory implementation of the `CatalogStore` and
//! `OptionService` traits from `catalog-core`, using papaya lock-free HashMaps
//! for concurrent access. Nothing is kept beyond the lifetime of the process.
//!
//! # Example
//!
//! ```ignore
//! use catalog_db_memory::InMemoryCatalog;
//! use catalog_core::{CatalogStore, NewVariant};
//!
//! let store = InMemoryCatalog::new();
//! let size = store.create_variant(&NewVariant::new("Size", ["S", "M"])).await?;
//! ```

pub mod sample;
pub mod storage;

pub use catalog_core::{CatalogStore, OptionService, ServiceError};
pub use sample::sample_catalog;
pub use storage::{InMemoryCatalog, OptionCall};

/// Creates a new empty store behind an `Arc`.
pub fn create_catalog_store() -> std::sync::Arc<InMemoryCatalog> {
    std::sync::Arc::new(InMemoryCatalog::new())
}
