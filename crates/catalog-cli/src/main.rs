mod cli;
mod client;
mod commands;
mod config;
mod logging;
mod output;

use anyhow::{Context, Result};
use catalog_core::{CatalogStore, OptionService};
use clap::Parser;
use tracing::debug;

use cli::{CatalogCommands, Cli, Commands, OutputFormat};
use client::CatalogClient;
use output::print_error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    let profile = &cli.profile;

    let command = match &cli.command {
        Commands::Config(args) => return commands::config::run(args, profile),
        Commands::Catalog(command) => command,
    };

    let profile_cfg = config::load_profile(profile)?;
    let format = config::resolve_format(cli.format, &profile_cfg)?;

    if cli.offline {
        debug!("Using seeded in-memory catalog");
        let store = catalog_db_memory::sample_catalog()
            .await
            .context("Failed to seed offline catalog")?;
        dispatch(&store, command, format).await
    } else {
        let server = config::resolve_server(&cli.server, &profile_cfg)?;
        debug!(server = %server, profile = %profile, "Using remote catalog");
        let client =
            CatalogClient::new(&server).with_context(|| format!("Invalid server URL: {server}"))?;
        dispatch(&client, command, format).await
    }
}

async fn dispatch<B>(backend: &B, command: &CatalogCommands, format: OutputFormat) -> Result<()>
where
    B: CatalogStore + OptionService,
{
    match command {
        CatalogCommands::Categories(command) => {
            commands::categories::run(backend, command, format).await
        }
        CatalogCommands::Tags(command) => commands::tags::run(backend, command, format).await,
        CatalogCommands::Variants(command) => {
            commands::variants::run(backend, command, format).await
        }
    }
}
