use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Catalog admin CLI — manage categories, tags and product variants")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL (overrides config and CATALOG_URL env var)
    #[arg(short, long, global = true, env = "CATALOG_URL")]
    pub server: Option<String>,

    /// Config profile name
    #[arg(short, long, global = true, env = "CATALOG_PROFILE", default_value = "default")]
    pub profile: String,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Work against a seeded in-memory catalog instead of a server
    #[arg(long, global = true)]
    pub offline: bool,

    /// Log remote calls to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Catalog(CatalogCommands),
    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Manage product categories
    #[command(subcommand)]
    Categories(CategoryCommands),
    /// Manage product tags
    #[command(subcommand)]
    Tags(TagCommands),
    /// Manage product variants and their options
    #[command(subcommand)]
    Variants(VariantCommands),
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Case-insensitive text filter
    #[arg(short = 'q', long)]
    pub search: Option<String>,
    /// Sort by name instead of server order
    #[arg(long)]
    pub sort: bool,
}

#[derive(clap::Args)]
pub struct IdArgs {
    /// Entity ID
    pub id: String,
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List(ListArgs),
    /// Show a category
    Get(IdArgs),
    /// Create a category
    Create(CategoryCreateArgs),
    /// Update a category (unset fields keep their value)
    Update(CategoryUpdateArgs),
    /// Delete a category
    Delete(IdArgs),
}

#[derive(clap::Args)]
pub struct CategoryCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Parent category ID
    #[arg(long)]
    pub parent: Option<String>,
}

#[derive(clap::Args)]
pub struct CategoryUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Parent category ID
    #[arg(long, conflicts_with = "no_parent")]
    pub parent: Option<String>,
    /// Make this a top-level category
    #[arg(long)]
    pub no_parent: bool,
}

#[derive(Subcommand)]
pub enum TagCommands {
    /// List tags
    List(ListArgs),
    /// Show a tag
    Get(IdArgs),
    /// Create a tag
    Create(TagArgs),
    /// Rename a tag
    Update(TagUpdateArgs),
    /// Delete a tag
    Delete(IdArgs),
}

#[derive(clap::Args)]
pub struct TagArgs {
    #[arg(long)]
    pub name: String,
}

#[derive(clap::Args)]
pub struct TagUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub name: String,
}

#[derive(Subcommand)]
pub enum VariantCommands {
    /// List variants
    List(ListArgs),
    /// Show a variant with its options
    Get(IdArgs),
    /// Create a variant
    Create(VariantCreateArgs),
    /// Rename a variant and add or remove options
    Edit(VariantEditArgs),
    /// Delete a variant
    Delete(IdArgs),
}

#[derive(clap::Args)]
pub struct VariantCreateArgs {
    #[arg(long)]
    pub name: String,
    /// Option value (repeatable)
    #[arg(long = "option", value_name = "VALUE")]
    pub options: Vec<String>,
}

#[derive(clap::Args)]
pub struct VariantEditArgs {
    pub id: String,
    /// New variant name
    #[arg(long)]
    pub name: Option<String>,
    /// Option value to add (repeatable)
    #[arg(long = "add", value_name = "VALUE")]
    pub add: Vec<String>,
    /// Option value to remove (repeatable)
    #[arg(long = "remove", value_name = "VALUE")]
    pub remove: Vec<String>,
    /// Print the pending option changes without saving
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Key to set (server, format)
    pub key: String,
    /// Value
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_variant_edit() {
        let cli = Cli::try_parse_from([
            "catalog", "variants", "edit", "v1", "--add", "Green", "--add", "Teal", "--remove",
            "Blue", "--dry-run",
        ])
        .unwrap();

        let Commands::Catalog(CatalogCommands::Variants(VariantCommands::Edit(args))) =
            cli.command
        else {
            panic!("expected variants edit");
        };
        assert_eq!(args.add, vec!["Green", "Teal"]);
        assert_eq!(args.remove, vec!["Blue"]);
        assert!(args.dry_run);
        assert!(args.name.is_none());
    }

    #[test]
    fn test_parent_flags_conflict() {
        let result = Cli::try_parse_from([
            "catalog",
            "categories",
            "update",
            "c1",
            "--parent",
            "c0",
            "--no-parent",
        ]);
        assert!(result.is_err());
    }
}
