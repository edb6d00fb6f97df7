use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";
pub const ETHERSCAN_KEY_ENV: &str = "ETHERSCAN_API_KEY";

/// Main application configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini model used for free-text answers
    pub model: String,

    /// API key for the generative language API
    pub gemini_api_key: Option<String>,

    /// API key for the block explorer
    pub etherscan_api_key: Option<String>,

    /// Base URLs of the external services
    pub endpoints: Endpoints,

    /// UI preferences
    pub ui: UiConfig,
}

/// Base URLs for every service the assistant talks to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub gemini_base_url: String,
    pub price_base_url: String,
    pub explorer_base_url: String,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub title: String,
    pub greeting: String,
    pub placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            model: "gemini-2.0-flash".to_string(),
            gemini_api_key: None,
            etherscan_api_key: None,
            endpoints: Endpoints::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            price_base_url: "https://api.coingecko.com/api/v3".to_string(),
            explorer_base_url: "https://api.etherscan.io/api".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            title: "AI Assistant".to_string(),
            greeting: "Hello! I'm your AI financial assistant. How can I help you today?"
                .to_string(),
            placeholder: "Type your message...".to_string(),
        }
    }
}

// Keys stay out of Debug output so they never end up in the log file.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("etherscan_api_key", &redact(&self.etherscan_api_key))
            .field("endpoints", &self.endpoints)
            .field("ui", &self.ui)
            .finish()
    }
}

fn redact(key: &Option<String>) -> &'static str {
    match key {
        Some(_) => "<set>",
        None => "<unset>",
    }
}

impl Config {
    /// Default location of the config file: `~/.finbot/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    /// Directory holding the config file and the log
    pub fn home_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".finbot"))
    }

    /// Load configuration from file, then let the environment supply keys.
    ///
    /// Only the default file may be missing; a path named explicitly must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file {} does not exist", path.display());
                }
                Self::from_file(path)?
            }
            None => Self::from_file(&Self::default_path()?)?,
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Read a config file, falling back to defaults if it does not exist
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Environment variables override keys from the file
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(GEMINI_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.gemini_api_key = Some(key);
        }
        if let Some(key) = lookup(ETHERSCAN_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.etherscan_api_key = Some(key);
        }
    }

    /// TOML rendering of the config with keys masked
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut masked = self.clone();
        masked.gemini_api_key = masked.gemini_api_key.map(|_| "********".to_string());
        masked.etherscan_api_key = masked.etherscan_api_key.map(|_| "********".to_string());
        toml::to_string_pretty(&masked).context("Failed to serialize config")
    }
}
