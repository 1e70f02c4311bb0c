use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProfileConfig {
    pub server: Option<String>,
    pub format: Option<String>,
}

pub type ConfigFile = HashMap<String, ProfileConfig>;

fn config_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .context("Cannot determine home directory")?
        .join(".catalog-admin");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn load_all_from(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config: {}", path.display()))
}

pub fn save_profile_to(path: &Path, profile: &str, config: &ProfileConfig) -> Result<()> {
    let mut all = load_all_from(path)?;
    all.insert(profile.to_string(), config.clone());
    let content = toml::to_string_pretty(&all)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}

pub fn load_profile(profile: &str) -> Result<ProfileConfig> {
    let mut all = load_all_from(&config_path()?)?;
    Ok(all.remove(profile).unwrap_or_default())
}

pub fn save_profile(profile: &str, config: &ProfileConfig) -> Result<()> {
    save_profile_to(&config_path()?, profile, config)
}

/// Applies `key = value` to a profile, validating the value.
pub fn set_key(config: &mut ProfileConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "server" => {
            url::Url::parse(value).with_context(|| format!("Invalid server URL: {value}"))?;
            config.server = Some(value.to_string());
        }
        "format" => {
            parse_format(value)?;
            config.format = Some(value.to_string());
        }
        other => anyhow::bail!("Unknown config key: {other}. Valid keys: server, format"),
    }
    Ok(())
}

fn parse_format(value: &str) -> Result<OutputFormat> {
    OutputFormat::from_str(value, true)
        .map_err(|_| anyhow::anyhow!("Unknown format: {value}. Valid formats: json, table"))
}

pub fn resolve_server(cli_server: &Option<String>, profile: &ProfileConfig) -> Result<String> {
    // 1. --server flag / CATALOG_URL env
    if let Some(s) = cli_server {
        return Ok(s.clone());
    }
    // 2. config.toml profile
    if let Some(s) = &profile.server {
        return Ok(s.clone());
    }
    anyhow::bail!(
        "No server URL configured. Use --server, set CATALOG_URL env var, or run: catalog config set server <url>"
    )
}

pub fn resolve_format(
    cli_format: Option<OutputFormat>,
    profile: &ProfileConfig,
) -> Result<OutputFormat> {
    if let Some(format) = cli_format {
        return Ok(format);
    }
    match profile.format.as_deref() {
        Some(value) => parse_format(value),
        None => Ok(OutputFormat::default()),
    }
}
