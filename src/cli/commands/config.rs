//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "release.repository", "typewriter.pause_ms")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "release.repository", "typewriter.pause_ms")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Get { key } => get(&key, format),
        ConfigCommands::Set { key, value } => set(&key, &value, quiet),
        ConfigCommands::Path => path(format),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

fn get(key: &str, format: OutputFormat) -> Result<()> {
    let value = Config::load()?.get(key)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&value)?),
        OutputFormat::Text => println!("{}", value),
    }

    Ok(())
}

fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists: path.exists(),
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    })?;

    Ok(())
}
