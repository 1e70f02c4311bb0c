//! Small seeded catalog for offline use.

use catalog_core::{CatalogStore, CategoryDraft, NewVariant, ServiceError, TagDraft};

use crate::storage::InMemoryCatalog;

/// Builds a store holding a few categories, tags and variants.
pub async fn sample_catalog() -> Result<InMemoryCatalog, ServiceError> {
    let store = InMemoryCatalog::new();

    let apparel = store
        .create_category(
            &CategoryDraft::new("Apparel").with_description("Clothing and accessories"),
        )
        .await?;
    store
        .create_category(&CategoryDraft::new("T-Shirts").with_parent(&apparel.id))
        .await?;
    store
        .create_category(&CategoryDraft::new("Footwear").with_description("Boots and sneakers"))
        .await?;

    for name in ["New Arrival", "Sale", "Organic"] {
        store.create_tag(&TagDraft::new(name)).await?;
    }

    store
        .create_variant(&NewVariant::new("Size", ["S", "M", "L", "XL"]))
        .await?;
    store
        .create_variant(&NewVariant::new("Color", ["Red", "Blue", "Black"]))
        .await?;

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_catalog() {
        let store = sample_catalog().await.unwrap();
        assert_eq!(store.category_count(), 3);
        assert_eq!(store.tag_count(), 3);
        assert_eq!(store.variant_count(), 2);
    }
}
