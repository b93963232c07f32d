use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Trello API credentials
    pub trello: TrelloConfig,
}

/// Credentials for the Trello REST API
#[derive(Debug, Deserialize)]
pub struct TrelloConfig {
    pub api_key: String,
    pub token: String,
}

/// Get the config directory path (~/.config/trellofeed)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("trellofeed");
    Ok(config_dir)
}

/// Get the config file path (~/.config/trellofeed/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the feed store path (~/.config/trellofeed/feeds.json)
pub fn feeds_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("feeds.json"))
}

/// Load config from ~/.config/trellofeed/config.toml
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        anyhow::bail!(
            "Config file not found at {}\n\n\
            Create it with your Trello credentials:\n\n\
            [trello]\n\
            api_key = \"your-api-key\"\n\
            token = \"your-member-token\"\n\n\
            Get both from https://trello.com/app-key.",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    Ok(config)
}
