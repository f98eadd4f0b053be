//! Client configuration at `~/.happy/config.yaml`.
//!
//! # API pattern
//!
//! Every filesystem function has two forms:
//! - `fn_at(home: &Path, …)`: explicit home; used in tests with `TempDir`
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::map::DEFAULT_ZOOM;
use crate::types::Position;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Overrides `api_url`.
pub const API_URL_ENV: &str = "HAPPY_API_URL";

/// Overrides `mapbox_token`.
pub const MAPBOX_TOKEN_ENV: &str = "MAPBOX_TOKEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapbox_token: Option<String>,
    /// Where this device is. Seeds the map centre of new drafts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_location: Option<Position>,
    #[serde(default = "default_zoom")]
    pub map_zoom: u8,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            mapbox_token: None,
            default_location: None,
            map_zoom: DEFAULT_ZOOM,
        }
    }
}

impl Config {
    /// Apply environment overrides through `lookup` (empty values ignored).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = lookup(API_URL_ENV) {
            self.api_url = url;
        }
        if let Some(token) = lookup(MAPBOX_TOKEN_ENV) {
            self.mapbox_token = Some(token);
        }
        self
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }
}

// ---------------------------------------------------------------------------
// 1. Paths
// ---------------------------------------------------------------------------

/// `<home>/.happy/`: pure, no I/O.
pub fn config_dir_at(home: &Path) -> PathBuf {
    home.join(".happy")
}

/// `<home>/.happy/config.yaml`: pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    config_dir_at(home).join("config.yaml")
}

/// `config_path_at` convenience wrapper.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load the config file, or defaults when it does not exist.
///
/// Returns `ConfigError::Parse` (with path) if the YAML is malformed.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, ConfigError> {
    load_at(&home()?)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically write `config` to `<home>/.happy/config.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_at(home: &Path, config: &Config) -> Result<PathBuf, ConfigError> {
    let dir = config_dir_at(home);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    let path = config_path_at(home);
    let tmp_path = path.with_file_name("config.yaml.tmp");

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(path)
}

/// `save_at` convenience wrapper.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    save_at(&home()?, config)
}

/// Write the default config unless one exists. Returns the file's path and
/// whether it was created.
pub fn init_at(home: &Path) -> Result<(PathBuf, bool), ConfigError> {
    let path = config_path_at(home);
    if path.exists() {
        return Ok((path, false));
    }
    Ok((save_at(home, &Config::default())?, true))
}

/// `init_at` convenience wrapper.
pub fn init() -> Result<(PathBuf, bool), ConfigError> {
    init_at(&home()?)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_path_is_correct() {
        let home = TempDir::new().expect("tempdir");
        assert!(config_path_at(home.path()).ends_with(".happy/config.yaml"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let home = TempDir::new().expect("tempdir");
        let config = load_at(home.path()).expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.map_zoom, 15);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let config = Config::default().with_overrides(|key| match key {
            API_URL_ENV => Some("https://api.example".to_owned()),
            MAPBOX_TOKEN_ENV => Some("pk.abc".to_owned()),
            _ => None,
        });
        assert_eq!(config.api_url, "https://api.example");
        assert_eq!(config.mapbox_token.as_deref(), Some("pk.abc"));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let config = Config::default().with_overrides(|_| Some("  ".to_owned()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn atomic_write_cleans_up_tmp() {
        let home = TempDir::new().expect("tempdir");
        save_at(home.path(), &Config::default()).expect("save");
        let tmp = config_path_at(home.path()).with_file_name("config.yaml.tmp");
        assert!(!tmp.exists(), ".tmp must be gone after successful save");
    }

    #[test]
    fn home_not_found_error_message() {
        assert!(ConfigError::HomeNotFound.to_string().contains("home directory"));
    }
}
