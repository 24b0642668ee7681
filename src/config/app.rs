//! Main application configuration
//!
//! This module defines the primary configuration structures for oshi-ranker,
//! including environment variable loading, TOML files and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where the roster slot lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Nothing survives the process
    Memory,
    /// One JSON file per slot under `data_dir`
    File,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            other => Err(anyhow!("Unknown storage backend: {}", other)),
        }
    }
}

/// Persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory holding the slot files
    pub data_dir: PathBuf,
    /// Slot key the roster is stored under
    pub key: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "oshi-ranker".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: PathBuf::from(".oshi-ranker"),
            key: "oshi-data".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("OSHI_SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("OSHI_LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Storage settings
        if let Ok(backend) = env::var("OSHI_STORAGE_BACKEND") {
            config.storage.backend = backend.parse()?;
        }
        if let Ok(dir) = env::var("OSHI_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Ok(key) = env::var("OSHI_STORAGE_KEY") {
            config.storage.key = key;
        }

        // Rating settings
        if let Ok(k) = env::var("OSHI_K_FACTOR") {
            config.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid OSHI_K_FACTOR value: {}", k))?;
        }
        if let Ok(initial) = env::var("OSHI_INITIAL_RATING") {
            config.rating.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid OSHI_INITIAL_RATING value: {}", initial))?;
        }
        if let Ok(seed) = env::var("OSHI_PAIRING_SEED") {
            config.rating.pairing_seed = Some(
                seed.parse()
                    .map_err(|_| anyhow!("Invalid OSHI_PAIRING_SEED value: {}", seed))?,
            );
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing sections take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(raw)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Full path of the roster slot for the file backend
    pub fn slot_path(&self) -> PathBuf {
        self.storage
            .data_dir
            .join(format!("{}.json", self.storage.key))
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate storage settings
    let key = &config.storage.key;
    if key.is_empty() {
        return Err(anyhow!("Storage key cannot be empty"));
    }
    if key.contains(['/', '\\']) || key == "." || key == ".." {
        return Err(anyhow!("Storage key must be a plain name: {}", key));
    }
    if config.storage.backend == StorageBackend::File
        && config.storage.data_dir.as_os_str().is_empty()
    {
        return Err(anyhow!("Data directory cannot be empty for the file backend"));
    }

    config.rating.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.storage.key, "oshi-data");
        assert_eq!(config.rating.k_factor, 32.0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [storage]
            backend = "memory"

            [rating]
            pairing_seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.key, "oshi-data");
        assert_eq!(config.rating.pairing_seed, Some(7));
        assert_eq!(config.rating.initial_rating, 1000.0);
        assert_eq!(config.service.log_level, "warn");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [service]
            log_level = "loud"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_storage_key_must_be_plain_name() {
        let mut config = AppConfig::default();
        config.storage.key = "../escape".to_string();
        assert!(validate_config(&config).is_err());

        config.storage.key = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_negative_k_factor_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [rating]
            k_factor = -4.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_slot_path() {
        let mut config = AppConfig::default();
        config.storage.data_dir = PathBuf::from("/tmp/ranker");
        assert_eq!(config.slot_path(), PathBuf::from("/tmp/ranker/oshi-data.json"));
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("FILE".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("redis".parse::<StorageBackend>().is_err());
    }
}
