//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use attendsync_core::config::{IdStrategy, StorageKeys};
use attendsync_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";
const APP_DIR_NAME: &str = "attendsync";

pub const STORE_PATH_ENV: &str = "ATTENDSYNC_STORE_PATH";
pub const ID_STRATEGY_ENV: &str = "ATTENDSYNC_ID_STRATEGY";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    #[serde(default)]
    pub id_strategy: IdStrategy,
    #[serde(default)]
    pub keys: StorageKeys,
}

/// Effective settings after merging flag, environment, and file values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub store_path: PathBuf,
    pub id_strategy: IdStrategy,
    pub keys: StorageKeys,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("attendance.db")
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Merge sources with precedence flag > environment > file > default.
    pub fn resolve(
        &self,
        cli_store_path: Option<PathBuf>,
        env_store_path: Option<String>,
        env_id_strategy: Option<String>,
    ) -> Result<ResolvedSettings, String> {
        let store_path = cli_store_path
            .or_else(|| normalize_text_option(env_store_path).map(PathBuf::from))
            .or_else(|| self.store_path.clone())
            .unwrap_or_else(default_store_path);

        let id_strategy = match normalize_text_option(env_id_strategy) {
            Some(raw) => raw
                .parse()
                .map_err(|error| format!("{ID_STRATEGY_ENV}: {error}"))?,
            None => self.id_strategy,
        };

        let keys = self.keys.clone().normalized();
        keys.validate().map_err(|error| error.to_string())?;

        Ok(ResolvedSettings {
            store_path,
            id_strategy,
            keys,
        })
    }

    fn normalize(&mut self) {
        self.store_path = self
            .store_path
            .take()
            .and_then(|path| normalize_text_option(Some(path.to_string_lossy().into_owned())))
            .map(PathBuf::from);
        self.keys = std::mem::take(&mut self.keys).normalized();
    }
}
