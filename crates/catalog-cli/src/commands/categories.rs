use anyhow::{Context, Result};
use catalog_core::validation::validate_category;
use catalog_core::{CatalogError, CatalogStore, CategoryDraft};
use colored::Colorize;

use super::filter_list;
use crate::cli::{CategoryCommands, CategoryCreateArgs, CategoryUpdateArgs, OutputFormat};
use crate::output::{print_list, print_one, print_success};

pub async fn run(
    store: &dyn CatalogStore,
    command: &CategoryCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        CategoryCommands::List(args) => {
            let categories = store
                .list_categories()
                .await
                .context("Failed to list categories")?;
            print_list(&filter_list(categories, args), format)
        }
        CategoryCommands::Get(args) => {
            let category = store
                .get_category(&args.id)
                .await
                .with_context(|| format!("Failed to get category {}", args.id))?;
            print_one(&category, format)
        }
        CategoryCommands::Create(args) => create(store, args, format).await,
        CategoryCommands::Update(args) => update(store, args, format).await,
        CategoryCommands::Delete(args) => {
            store
                .delete_category(&args.id)
                .await
                .with_context(|| format!("Failed to delete category {}", args.id))?;
            print_success(&format!("Deleted category {}", args.id.cyan()));
            Ok(())
        }
    }
}

async fn create(
    store: &dyn CatalogStore,
    args: &CategoryCreateArgs,
    format: OutputFormat,
) -> Result<()> {
    let draft = CategoryDraft {
        name: args.name.trim().to_string(),
        description: args.description.clone(),
        parent_id: args.parent.clone(),
    };
    validate_category(&draft, None).map_err(CatalogError::from)?;

    let created = store
        .create_category(&draft)
        .await
        .context("Failed to create category")?;
    print_success(&format!("Created category {}", created.id.cyan()));
    print_one(&created, format)
}

/// Builds the update payload from the stored category and the provided flags.
pub(crate) fn merge_update(existing: &CategoryDraft, args: &CategoryUpdateArgs) -> CategoryDraft {
    let mut draft = existing.clone();
    if let Some(name) = &args.name {
        draft.name = name.trim().to_string();
    }
    if let Some(description) = &args.description {
        draft.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
    }
    if args.no_parent {
        draft.parent_id = None;
    } else if let Some(parent) = &args.parent {
        draft.parent_id = Some(parent.clone());
    }
    draft
}

async fn update(
    store: &dyn CatalogStore,
    args: &CategoryUpdateArgs,
    format: OutputFormat,
) -> Result<()> {
    let existing = store
        .get_category(&args.id)
        .await
        .with_context(|| format!("Failed to get category {}", args.id))?;
    let draft = merge_update(&CategoryDraft::from(&existing), args);
    validate_category(&draft, Some(existing.id.as_str())).map_err(CatalogError::from)?;

    let updated = store
        .update_category(&args.id, &draft)
        .await
        .with_context(|| format!("Failed to update category {}", args.id))?;
    print_success(&format!("Updated category {}", updated.id.cyan()));
    print_one(&updated, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_args() -> CategoryUpdateArgs {
        CategoryUpdateArgs {
            id: "c2".to_string(),
            name: None,
            description: None,
            parent: None,
            no_parent: false,
        }
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let existing = CategoryDraft::new("Boots")
            .with_description("Winter boots")
            .with_parent("c1");
        let merged = merge_update(&existing, &update_args());
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_merge_clears_parent_and_description() {
        let existing = CategoryDraft::new("Boots")
            .with_description("Winter boots")
            .with_parent("c1");
        let args = CategoryUpdateArgs {
            name: Some(" Snow Boots ".to_string()),
            description: Some(String::new()),
            no_parent: true,
            ..update_args()
        };

        let merged = merge_update(&existing, &args);

        assert_eq!(merged.name, "Snow Boots");
        assert_eq!(merged.description, None);
        assert_eq!(merged.parent_id, None);
    }

    #[tokio::test]
    async fn test_update_rejects_self_parent() {
        let store = catalog_db_memory::sample_catalog().await.unwrap();
        let category = store.list_categories().await.unwrap().remove(0);
        let args = CategoryUpdateArgs {
            id: category.id.clone(),
            parent: Some(category.id.clone()),
            ..update_args()
        };

        let err = update(&store, &args, OutputFormat::Json).await.unwrap_err();
        let err = err.downcast::<CatalogError>().unwrap();
        assert!(err.is_validation());
    }
}
