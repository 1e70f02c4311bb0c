use anyhow::{Context, Result};
use catalog_core::validation::validate_new_variant;
use catalog_core::{CatalogError, CatalogStore, NewVariant, OptionService, VariantEditSession};
use colored::Colorize;

use super::filter_list;
use crate::cli::{OutputFormat, VariantCommands, VariantCreateArgs, VariantEditArgs};
use crate::output::{
    print_diff, print_list, print_one, print_success, print_warning, report_summary,
};

pub async fn run<B>(backend: &B, command: &VariantCommands, format: OutputFormat) -> Result<()>
where
    B: CatalogStore + OptionService,
{
    match command {
        VariantCommands::List(args) => {
            let variants = backend
                .list_variants()
                .await
                .context("Failed to list variants")?;
            print_list(&filter_list(variants, args), format)
        }
        VariantCommands::Get(args) => {
            let variant = backend
                .get_variant(&args.id)
                .await
                .with_context(|| format!("Failed to get variant {}", args.id))?;
            print_one(&variant, format)
        }
        VariantCommands::Create(args) => create(backend, args, format).await,
        VariantCommands::Edit(args) => edit(backend, args, format).await,
        VariantCommands::Delete(args) => {
            backend
                .delete_variant(&args.id)
                .await
                .with_context(|| format!("Failed to delete variant {}", args.id))?;
            print_success(&format!("Deleted variant {}", args.id.cyan()));
            Ok(())
        }
    }
}

async fn create(
    store: &dyn CatalogStore,
    args: &VariantCreateArgs,
    format: OutputFormat,
) -> Result<()> {
    let mut values: Vec<&str> = Vec::new();
    for value in args.options.iter().map(|v| v.trim()) {
        if !value.is_empty() && !values.contains(&value) {
            values.push(value);
        }
    }
    let variant = NewVariant::new(args.name.trim(), values);
    validate_new_variant(&variant).map_err(CatalogError::from)?;

    let created = store
        .create_variant(&variant)
        .await
        .context("Failed to create variant")?;
    print_success(&format!("Created variant {}", created.id.cyan()));
    print_one(&created, format)
}

/// Applies the command-line edits to the session, removals first so that
/// `--remove X --add X` restores X. Returns one warning per edit that had no effect.
pub(crate) fn apply_edits(session: &mut VariantEditSession, args: &VariantEditArgs) -> Vec<String> {
    let mut warnings = Vec::new();
    if let Some(name) = &args.name {
        session.set_name(name.trim());
    }
    for value in &args.remove {
        if !session.remove_option(value) {
            warnings.push(format!("Option \"{value}\" is not present, nothing to remove"));
        }
    }
    for value in &args.add {
        if !session.add_option(value) {
            warnings.push(format!("Option \"{value}\" is blank or already present, skipped"));
        }
    }
    warnings
}

async fn edit<B>(backend: &B, args: &VariantEditArgs, format: OutputFormat) -> Result<()>
where
    B: CatalogStore + OptionService,
{
    let mut session = VariantEditSession::load(backend, &args.id)
        .await
        .with_context(|| format!("Failed to load variant {}", args.id))?;

    for warning in apply_edits(&mut session, args) {
        print_warning(&warning);
    }

    if args.dry_run {
        session.validate()?;
        print_diff(&session.pending_diff());
        return Ok(());
    }

    let outcome = match session.submit(backend, backend).await {
        Ok(outcome) => outcome,
        Err(err @ (CatalogError::RemoteAddFailure { .. } | CatalogError::RemoteRemoveFailure { .. })) => {
            return Err(anyhow::Error::new(err).context(format!(
                "Variant {} was saved partially; option changes made before the failure were kept",
                args.id
            )));
        }
        Err(err) => return Err(err.into()),
    };

    print_success(&format!(
        "Saved variant {} ({})",
        args.id.cyan(),
        report_summary(&outcome.report)
    ));
    let variant = backend
        .get_variant(&args.id)
        .await
        .with_context(|| format!("Failed to reload variant {}", args.id))?;
    print_one(&variant, format)
}
