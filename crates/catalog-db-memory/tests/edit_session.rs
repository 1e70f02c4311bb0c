//! Variant edit sessions run end to end against the in-memory store.

use catalog_core::{CatalogError, CatalogStore, NewVariant, Variant, VariantEditSession};
use catalog_db_memory::{InMemoryCatalog, OptionCall};

async fn store_with_color() -> (InMemoryCatalog, Variant) {
    let store = InMemoryCatalog::new();
    let variant = store
        .create_variant(&NewVariant::new("Color", ["Red", "Blue"]))
        .await
        .expect("create variant");
    (store, variant)
}

fn values(variant: &Variant) -> Vec<&str> {
    variant.options.iter().map(|o| o.value.as_str()).collect()
}

fn added_values(calls: &[OptionCall]) -> Vec<&str> {
    calls
        .iter()
        .filter_map(|c| match c {
            OptionCall::Add { value, .. } => Some(value.as_str()),
            OptionCall::Remove { .. } => None,
        })
        .collect()
}

// =============================================================================
// Successful submits
// =============================================================================

#[tokio::test]
async fn test_add_and_remove_round() {
    let (store, variant) = store_with_color().await;

    let mut session = VariantEditSession::load(&store, &variant.id).await.unwrap();
    session.remove_option("Blue");
    session.add_option("Green");
    let outcome = session.submit(&store, &store).await.unwrap();

    assert_eq!(outcome.report.added.len(), 1);
    assert_eq!(outcome.report.removed.len(), 1);

    let stored = store.get_variant(&variant.id).await.unwrap();
    assert_eq!(values(&stored), vec!["Red", "Green"]);
    assert_eq!(stored.options[0].id, variant.options[0].id);
}

#[tokio::test]
async fn test_noop_edit_issues_no_option_calls() {
    let (store, variant) = store_with_color().await;

    let session = VariantEditSession::load(&store, &variant.id).await.unwrap();
    let outcome = session.submit(&store, &store).await.unwrap();

    assert!(outcome.report.is_empty());
    assert!(store.option_calls().await.is_empty());
}

#[tokio::test]
async fn test_rename_only() {
    let (store, variant) = store_with_color().await;

    let mut session = VariantEditSession::load(&store, &variant.id).await.unwrap();
    session.set_name("Colour");
    session.submit(&store, &store).await.unwrap();

    let stored = store.get_variant(&variant.id).await.unwrap();
    assert_eq!(stored.name, "Colour");
    assert_eq!(stored.options, variant.options);
}

#[tokio::test]
async fn test_readd_after_remove_keeps_single_option() {
    let (store, variant) = store_with_color().await;

    let mut session = VariantEditSession::load(&store, &variant.id).await.unwrap();
    session.remove_option("Red");
    session.add_option("Red");
    session.submit(&store, &store).await.unwrap();

    let stored = store.get_variant(&variant.id).await.unwrap();
    assert_eq!(stored.options.len(), 2);
    assert!(store.option_calls().await.is_empty());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_second_of_three_additions_fails() {
    let (store, variant) = store_with_color().await;
    store.fail_add_on("Yellow").await;

    let mut session = VariantEditSession::load(&store, &variant.id).await.unwrap();
    session.add_option("Green");
    session.add_option("Yellow");
    session.add_option("Purple");
    session.remove_option("Blue");
    let err = session.submit(&store, &store).await.unwrap_err();

    assert_eq!(err.failed_option(), Some("Yellow"));
    assert!(err.to_string().contains("injected failure adding Yellow"));

    let calls = store.option_calls().await;
    assert_eq!(added_values(&calls), vec!["Green", "Yellow"]);
    assert!(!calls.iter().any(|c| matches!(c, OptionCall::Remove { .. })));

    // First addition stays applied; nothing is rolled back.
    let stored = store.get_variant(&variant.id).await.unwrap();
    assert_eq!(values(&stored), vec!["Red", "Blue", "Green"]);
}

#[tokio::test]
async fn test_removal_failure_after_additions() {
    let (store, variant) = store_with_color().await;
    store.fail_remove_on("Red").await;

    let mut session = VariantEditSession::load(&store, &variant.id).await.unwrap();
    session.remove_option("Red");
    session.remove_option("Blue");
    session.add_option("Green");
    let err = session.submit(&store, &store).await.unwrap_err();

    assert!(matches!(err, CatalogError::RemoteRemoveFailure { ref value, .. } if value == "Red"));
    let stored = store.get_variant(&variant.id).await.unwrap();
    assert_eq!(values(&stored), vec!["Red", "Blue", "Green"]);
}

#[tokio::test]
async fn test_deleted_variant_fails_base_update() {
    let (store, variant) = store_with_color().await;

    let mut session = VariantEditSession::load(&store, &variant.id).await.unwrap();
    session.add_option("Green");
    store.delete_variant(&variant.id).await.unwrap();
    let err = session.submit(&store, &store).await.unwrap_err();

    assert!(matches!(err, CatalogError::RemoteUpdateFailure { .. }));
    assert!(store.option_calls().await.is_empty());
}
