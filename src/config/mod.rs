//! Configuration loading, validation, and persistence.
//!
//! The configuration lives in a single JSON file (`config.json` by
//! default). Command handlers never touch the file directly; they go
//! through [`ConfigStore`], which owns the file, guards mutation behind a
//! lock, and persists every change with an explicit result.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Bot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot token; normally blank and supplied via `DISCORD_BOT_TOKEN`.
    #[serde(default)]
    pub token: String,

    /// Channel startup announcements are routed to
    #[serde(default)]
    pub ssu_channel_id: Option<u64>,

    /// Channel shutdown announcements are routed to
    #[serde(default)]
    pub ssd_channel_id: Option<u64>,

    /// Channel startup polls are routed to
    #[serde(default)]
    pub ssup_channel_id: Option<u64>,

    /// Guild the bot serves
    #[serde(default)]
    pub guild_id: Option<u64>,

    /// Roles allowed to run commands; empty means everyone.
    #[serde(default)]
    pub allowed_roles: Vec<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            ssu_channel_id: None,
            ssd_channel_id: None,
            ssup_channel_id: None,
            guild_id: None,
            allowed_roles: Vec::new(),
        }
    }
}

impl BotConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, id) in [
            ("ssu_channel_id", self.ssu_channel_id),
            ("ssd_channel_id", self.ssd_channel_id),
            ("ssup_channel_id", self.ssup_channel_id),
            ("guild_id", self.guild_id),
        ] {
            if id == Some(0) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a non-zero snowflake",
                    name
                )));
            }
        }
        if self.allowed_roles.contains(&0) {
            return Err(ConfigError::ValidationError(
                "allowed_roles must not contain 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Owner of the configuration file.
///
/// Handlers hold a shared reference and mutate through [`update`], which
/// serializes writers and persists atomically (write to a sibling temp
/// file, then rename).
///
/// [`update`]: ConfigStore::update
pub struct ConfigStore {
    path: PathBuf,
    inner: RwLock<BotConfig>,
}

impl ConfigStore {
    /// Load the config file, creating it with defaults when missing.
    pub fn load_or_init(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let config: BotConfig = serde_json::from_str(&contents)?;
            config.validate()?;
            config
        } else {
            let config = BotConfig::default();
            write_atomic(&path, &config)?;
            info!("Created default config at {:?}", path);
            config
        };

        Ok(Self {
            path,
            inner: RwLock::new(config),
        })
    }

    /// Snapshot of the current configuration.
    pub async fn get(&self) -> BotConfig {
        self.inner.read().await.clone()
    }

    /// Mutate the configuration and persist it.
    ///
    /// The mutation is rolled back if validation or the write fails, so
    /// the in-memory view never diverges from disk.
    pub async fn update<F>(&self, mutate: F) -> Result<BotConfig, ConfigError>
    where
        F: FnOnce(&mut BotConfig),
    {
        let mut guard = self.inner.write().await;
        let mut candidate = guard.clone();
        mutate(&mut candidate);
        candidate.validate()?;
        write_atomic(&self.path, &candidate)?;
        *guard = candidate.clone();
        Ok(candidate)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_atomic(path: &Path, config: &BotConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
