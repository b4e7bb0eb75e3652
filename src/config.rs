use crate::error::{MicroBioError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DATASET_ENV: &str = "MICROBIOBASE_DATASET";
pub const STORAGE_ENV: &str = "MICROBIOBASE_STORAGE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Primary dataset file
    pub dataset_path: PathBuf,
    /// Fallback dataset; the embedded dataset is used when unset
    pub fallback_path: Option<PathBuf>,
    /// Key-value storage file for favorites and theme
    pub storage_path: Option<PathBuf>,
    /// Extra alias dialect merged over the built-in one
    pub aliases_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data.json"),
            fallback_path: None,
            storage_path: None,
            aliases_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Read `path`; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| MicroBioError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MicroBioError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("microbiobase"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Environment variables override the file
    pub fn apply_env(&mut self) {
        if let Ok(dataset) = std::env::var(DATASET_ENV) {
            self.dataset_path = PathBuf::from(dataset);
        }
        if let Ok(storage) = std::env::var(STORAGE_ENV) {
            self.storage_path = Some(PathBuf::from(storage));
        }
    }

    /// Configured storage file, or `storage.json` next to the config file
    pub fn resolved_storage_path(&self) -> Result<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("storage.json")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.dataset_path, PathBuf::from("data.json"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            dataset_path: PathBuf::from("/srv/microbio/data.json"),
            storage_path: Some(PathBuf::from("/tmp/storage.json")),
            ..Default::default()
        };
        config.save_to(&path).expect("save failed");

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"aliases_path": "dialect.json"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("data.json"));
        assert_eq!(config.aliases_path, Some(PathBuf::from("dialect.json")));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{broken").unwrap();

        assert!(matches!(Config::load_from(&path), Err(MicroBioError::Config(_))));
    }

    #[test]
    fn test_explicit_storage_path() {
        let config = Config {
            storage_path: Some(PathBuf::from("favs.json")),
            ..Default::default()
        };
        assert_eq!(config.resolved_storage_path().unwrap(), PathBuf::from("favs.json"));
    }
}
