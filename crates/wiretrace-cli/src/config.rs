use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wiretrace_types::PreviewLimits;

/// Main configuration for wiretrace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of per-exchange LLM recorder files (`*.json`)
    pub llm_log_dir: PathBuf,
    /// Directory of MCP session logs (`*.jsonl`)
    pub mcp_log_dir: PathBuf,
    /// Default number of entries shown by `list`
    pub list_limit: usize,
    pub preview: PreviewLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_log_dir: PathBuf::from("logs/llm_proxy"),
            mcp_log_dir: PathBuf::from("logs/mcp_weather"),
            list_limit: 50,
            preview: PreviewLimits::default(),
        }
    }
}

impl Config {
    /// Load config from the default location (~/.wiretrace/config.toml)
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from a specific path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path (~/.wiretrace/config.toml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".wiretrace").join("config.toml"))
    }
}
