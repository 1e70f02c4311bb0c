use anyhow::Result;
use colored::Colorize;

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::config;
use crate::output::print_success;

pub fn run(args: &ConfigArgs, profile: &str) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            let cfg = config::load_profile(profile)?;
            println!("{}: {}", "Profile".cyan(), profile);
            println!(
                "{}: {}",
                "Server".cyan(),
                cfg.server.as_deref().unwrap_or("(not set)")
            );
            println!(
                "{}: {}",
                "Format".cyan(),
                cfg.format.as_deref().unwrap_or("json")
            );
            println!("{}: {}", "File".cyan(), config::config_path()?.display());
        }
        ConfigCommands::Set(set_args) => {
            let mut cfg = config::load_profile(profile)?;
            config::set_key(&mut cfg, &set_args.key, &set_args.value)?;
            config::save_profile(profile, &cfg)?;
            print_success(&format!("Set {} = {}", set_args.key, set_args.value));
        }
    }
    Ok(())
}
