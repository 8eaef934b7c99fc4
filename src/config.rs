use crate::app::view::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const STORAGE_DIR_ENV: &str = "LAZYFILES_STORAGE_DIR";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_dir: default_storage_dir(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_storage_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "lazyfiles")
        .map(|dirs| dirs.data_dir().join("files"))
        .unwrap_or_else(|| PathBuf::from("lazyfiles-data"))
}

pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|base_dirs| base_dirs.config_dir().join("lazyfiles").join("lazyfiles.toml"))
}

impl Config {
    /// Loads `path`, or the platform config file when `path` is None. A missing
    /// file is created with defaults; an unreadable one falls back to defaults
    /// in memory. The storage directory env var wins over either.
    pub fn load(path: Option<&Path>) -> Self {
        let mut config = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(config_file_path) => Self::load_from(&config_file_path),
            None => {
                log::warn!("Could not determine config directory. Using default in-memory config.");
                Self::default()
            }
        };
        if let Some(dir) = std::env::var_os(STORAGE_DIR_ENV) {
            config.storage_dir = PathBuf::from(dir);
        }
        if config.page_size == 0 {
            log::warn!("page_size must be positive, using {}", DEFAULT_PAGE_SIZE);
            config.page_size = DEFAULT_PAGE_SIZE;
        }
        config
    }

    fn load_from(config_file_path: &Path) -> Self {
        if config_file_path.exists() {
            match fs::read_to_string(config_file_path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => log::warn!(
                        "Failed to parse config file at '{}': {}. Using default in-memory config.",
                        config_file_path.display(),
                        e
                    ),
                },
                Err(e) => log::warn!(
                    "Failed to read config file at '{}': {}. Using default in-memory config.",
                    config_file_path.display(),
                    e
                ),
            }
            return Self::default();
        }

        log::info!(
            "Config file not found at '{}'. Attempting to create a default one.",
            config_file_path.display()
        );
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(toml_string) => {
                let written = config_file_path
                    .parent()
                    .map_or(Ok(()), fs::create_dir_all)
                    .and_then(|_| fs::write(config_file_path, toml_string));
                match written {
                    Ok(()) => log::info!("Default config file created at '{}'", config_file_path.display()),
                    Err(e) => log::warn!(
                        "Failed to write default config file to '{}': {}",
                        config_file_path.display(),
                        e
                    ),
                }
            }
            Err(e) => log::warn!("Failed to serialize default config: {}", e),
        }
        default_cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("lazyfiles.toml");
        let config = Config::load(Some(&path));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(path.exists());
        let written: Config = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, Config::default());
    }

    #[test]
    #[serial]
    fn reads_values_and_fills_missing_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lazyfiles.toml");
        fs::write(&path, "page_size = 25\n").unwrap();
        let config = Config::load(Some(&path));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.storage_dir, default_storage_dir());
    }

    #[test]
    #[serial]
    fn invalid_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lazyfiles.toml");
        fs::write(&path, "page_size = \"many\"").unwrap();
        assert_eq!(Config::load(Some(&path)), Config::default());
    }

    #[test]
    #[serial]
    fn zero_page_size_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lazyfiles.toml");
        fs::write(&path, "page_size = 0").unwrap();
        assert_eq!(Config::load(Some(&path)).page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    #[serial]
    fn env_var_overrides_storage_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lazyfiles.toml");
        fs::write(&path, "storage_dir = \"/from/file\"").unwrap();

        std::env::set_var(STORAGE_DIR_ENV, "/from/env");
        let config = Config::load(Some(&path));
        std::env::remove_var(STORAGE_DIR_ENV);

        assert_eq!(config.storage_dir, PathBuf::from("/from/env"));
    }
}
