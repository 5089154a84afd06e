use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default point cap per event
pub const DEFAULT_MAX_POINTS: usize = 10_000;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub spacer: SpacerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SpacerConfig {
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_points() -> usize {
    DEFAULT_MAX_POINTS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for SpacerConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        if config.spacer.max_points == 0 {
            anyhow::bail!("spacer.max_points must be at least 1");
        }

        Ok(config)
    }
}
