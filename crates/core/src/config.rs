use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_STORAGE_KEY: &str = "lamp-grid-state";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Store settings, read from an optional TOML file.
///
/// ```toml
/// storage_key = "lamp-grid-state"
/// debounce_ms = 300
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LampGridConfig {
    /// Name of the persisted blob.
    pub storage_key: String,
    /// Quiet period before a mutation is written, in milliseconds.
    pub debounce_ms: u64,
    /// Seed for the random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for LampGridConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            seed: None,
        }
    }
}

impl LampGridConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = LampGridConfig::from_toml_str("").ok();
        assert_eq!(cfg, Some(LampGridConfig::default()));
    }

    #[test]
    fn partial_override() {
        let cfg = LampGridConfig::from_toml_str("debounce_ms = 50\nseed = 9\n").ok();
        let cfg = cfg.unwrap_or_default();
        assert_eq!(cfg.debounce_ms, 50);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(matches!(
            LampGridConfig::from_toml_str("debounce_ms = \"soon\""),
            Err(ConfigError::Toml(_))
        ));
    }
}
