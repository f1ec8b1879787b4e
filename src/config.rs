use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct QuickmemConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON (or JSON Lines) memory snapshot to index.
    pub source_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_max_results: usize,
    pub default_depth: usize,
    pub suggest_limit: usize,
    /// Preview length in characters.
    pub preview_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let source_path = default_quickmem_dir()
            .join("memory.json")
            .to_string_lossy()
            .into_owned();
        Self { source_path }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_max_results: crate::memory::search::DEFAULT_MAX_RESULTS,
            default_depth: crate::memory::relations::DEFAULT_MAX_DEPTH,
            suggest_limit: 10,
            preview_chars: 120,
        }
    }
}

/// Returns `~/.quickmem/`
pub fn default_quickmem_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".quickmem")
}

/// Returns the default config file path: `~/.quickmem/config.toml`
pub fn default_config_path() -> PathBuf {
    default_quickmem_dir().join("config.toml")
}

impl QuickmemConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            QuickmemConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (QUICKMEM_SOURCE, QUICKMEM_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("QUICKMEM_SOURCE") {
            self.storage.source_path = val;
        }
        if let Ok(val) = std::env::var("QUICKMEM_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }

    /// Resolve the snapshot path, expanding `~` if needed.
    pub fn resolved_source_path(&self) -> PathBuf {
        expand_tilde(&self.storage.source_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
