use decklist_engine::RenderSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Persistent settings: the engine's render settings plus paths to the
/// local collection and metadata files the CLI loads.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Plain values stay ahead of the settings table for TOML emission.
    pub collection_path: Option<PathBuf>,
    pub metadata_path: Option<PathBuf>,
    pub settings: RenderSettings,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.collection_path = config.collection_path.map(|p| expand_path(&p).unwrap_or(p));
        config.metadata_path = config.metadata_path.map(|p| expand_path(&p).unwrap_or(p));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/decklist");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}

fn expand_path(path: &Path) -> Option<PathBuf> {
    let path_str = path.to_string_lossy();
    match shellexpand::full(&path_str) {
        Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decklist_engine::{Currency, DocumentMode};
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/decklist/config.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            settings: RenderSettings {
                mode: DocumentMode::List,
                sort_by_cost: true,
                currency: Currency::Eur,
                ..RenderSettings::default()
            },
            collection_path: Some(PathBuf::from("/tmp/collection.csv")),
            metadata_path: None,
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(deserialized.settings, original.settings);
        assert_eq!(deserialized.collection_path, original.collection_path);
        assert_eq!(deserialized.metadata_path, None);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.settings, RenderSettings::default());
        assert_eq!(config.collection_path, None);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        let test_config = Config {
            settings: RenderSettings {
                group_by_type: true,
                ..RenderSettings::default()
            },
            collection_path: Some(PathBuf::from("/tmp/collection.csv")),
            metadata_path: Some(PathBuf::from("/tmp/cards.json")),
        };

        test_config.save_to_path(&config_file).unwrap();

        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(loaded_config.settings, test_config.settings);
        assert_eq!(loaded_config.collection_path, test_config.collection_path);
    }

    #[test]
    fn test_config_with_tilde_in_path() {
        let config_content = r#"
collection_path = "~/decks/collection.csv"
"#;
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, config_content).unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        let expanded = config.collection_path.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("decks/collection.csv"));
    }

    #[test]
    fn test_config_with_env_var_in_path() {
        unsafe {
            env::set_var("DECKLIST_TEST_ROOT", "/custom/decks");
        }

        let config_content = r#"
metadata_path = "$DECKLIST_TEST_ROOT/cards.json"
"#;
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, config_content).unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(
            config.metadata_path,
            Some(PathBuf::from("/custom/decks/cards.json"))
        );

        unsafe {
            env::remove_var("DECKLIST_TEST_ROOT");
        }
    }
}
