use anyhow::{Context, Result};
use catalog_core::validation::validate_tag;
use catalog_core::{CatalogError, CatalogStore, TagDraft};
use colored::Colorize;

use super::filter_list;
use crate::cli::{OutputFormat, TagCommands};
use crate::output::{print_list, print_one, print_success};

pub async fn run(store: &dyn CatalogStore, command: &TagCommands, format: OutputFormat) -> Result<()> {
    match command {
        TagCommands::List(args) => {
            let tags = store.list_tags().await.context("Failed to list tags")?;
            print_list(&filter_list(tags, args), format)
        }
        TagCommands::Get(args) => {
            let tag = store
                .get_tag(&args.id)
                .await
                .with_context(|| format!("Failed to get tag {}", args.id))?;
            print_one(&tag, format)
        }
        TagCommands::Create(args) => {
            let draft = TagDraft::new(args.name.trim());
            validate_tag(&draft).map_err(CatalogError::from)?;
            let created = store.create_tag(&draft).await.context("Failed to create tag")?;
            print_success(&format!("Created tag {}", created.id.cyan()));
            print_one(&created, format)
        }
        TagCommands::Update(args) => {
            let draft = TagDraft::new(args.name.trim());
            validate_tag(&draft).map_err(CatalogError::from)?;
            let updated = store
                .update_tag(&args.id, &draft)
                .await
                .with_context(|| format!("Failed to update tag {}", args.id))?;
            print_success(&format!("Updated tag {}", updated.id.cyan()));
            print_one(&updated, format)
        }
        TagCommands::Delete(args) => {
            store
                .delete_tag(&args.id)
                .await
                .with_context(|| format!("Failed to delete tag {}", args.id))?;
            print_success(&format!("Deleted tag {}", args.id.cyan()));
            Ok(())
        }
    }
}
