//! Runtime configuration.
//!
//! Each field is resolved independently with the priority
//! env var > config file (`~/.config/tf-itemdb/config.toml`) > default.
//! The resolved [`Settings`] value is passed explicitly to every stage.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::SnapshotStore;

const DEFAULT_PAGE_DELAY_MS: u64 = 1000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOCALE_REPOSITORY: &str = "SteamDatabase/GameTracking-TF2";
const DEFAULT_LOCALE_BRANCH: &str = "master";
const DEFAULT_PRICING_FILE: &str = "tradetf-spreadsheet.json";

/// Resolved configuration for all pipeline stages.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Steam Web API key. Only required by stages that call the Steam API.
    pub steam_api_key: Option<String>,
    /// Directory holding all snapshots.
    pub data_dir: PathBuf,
    /// Explicit pricing spreadsheet location; defaults to a file in `data_dir`.
    pub pricing_path: Option<PathBuf>,
    /// Pause between catalog page requests.
    pub page_delay: Duration,
    pub request_timeout: Duration,
    /// GitHub `owner/repo` mirroring the game's resource files.
    pub locale_repository: String,
    pub locale_branch: String,
}

/// TOML config file format.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub steam: Option<SteamConfig>,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
    #[serde(default)]
    pub locale: Option<LocaleConfig>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SteamConfig {
    pub api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
    pub pricing_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FetchConfig {
    pub page_delay_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocaleConfig {
    pub repository: Option<String>,
    pub branch: Option<String>,
}

impl Settings {
    /// Load settings from the process environment and the config file.
    pub fn load() -> Result<Self, StoreError> {
        let file = load_config_file();
        Self::resolve(|name| std::env::var(name).ok(), file.unwrap_or_default())
    }

    /// Resolve settings from an environment lookup and a parsed config file.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        file: ConfigFile,
    ) -> Result<Self, StoreError> {
        let steam = file.steam.unwrap_or_default();
        let storage = file.storage.unwrap_or_default();
        let fetch = file.fetch.unwrap_or_default();
        let locale = file.locale.unwrap_or_default();

        let steam_api_key = env("STEAM_API_KEY")
            .or(steam.api_key)
            .filter(|k| !k.is_empty());

        let data_dir = env("TF_ITEMDB_DATA_DIR")
            .map(PathBuf::from)
            .or(storage.data_dir)
            .unwrap_or_else(default_data_dir);

        let pricing_path = env("TF_ITEMDB_PRICING")
            .map(PathBuf::from)
            .or(storage.pricing_path);

        let page_delay_ms = match env("TF_ITEMDB_PAGE_DELAY_MS") {
            Some(v) => parse_u64("TF_ITEMDB_PAGE_DELAY_MS", &v)?,
            None => fetch.page_delay_ms.unwrap_or(DEFAULT_PAGE_DELAY_MS),
        };

        let request_timeout_secs = match env("TF_ITEMDB_REQUEST_TIMEOUT_SECS") {
            Some(v) => parse_u64("TF_ITEMDB_REQUEST_TIMEOUT_SECS", &v)?,
            None => fetch
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            steam_api_key,
            data_dir,
            pricing_path,
            page_delay: Duration::from_millis(page_delay_ms),
            request_timeout: Duration::from_secs(request_timeout_secs),
            locale_repository: locale
                .repository
                .unwrap_or_else(|| DEFAULT_LOCALE_REPOSITORY.to_string()),
            locale_branch: locale
                .branch
                .unwrap_or_else(|| DEFAULT_LOCALE_BRANCH.to_string()),
        })
    }

    /// Override the data directory (CLI `--data-dir`).
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// The Steam API key, or a config error naming where to set it.
    pub fn require_api_key(&self) -> Result<&str, StoreError> {
        self.steam_api_key.as_deref().ok_or_else(|| {
            StoreError::config(
                "Missing Steam API key. Set STEAM_API_KEY or add [steam] api_key to the config file",
            )
        })
    }

    pub fn pricing_path(&self) -> PathBuf {
        self.pricing_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_PRICING_FILE))
    }

    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.data_dir)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            steam_api_key: None,
            data_dir: default_data_dir(),
            pricing_path: None,
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            locale_repository: DEFAULT_LOCALE_REPOSITORY.to_string(),
            locale_branch: DEFAULT_LOCALE_BRANCH.to_string(),
        }
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tf-itemdb").join("config.toml"))
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tf-itemdb")
}

fn parse_u64(name: &str, value: &str) -> Result<u64, StoreError> {
    value
        .trim()
        .parse()
        .map_err(|_| StoreError::config(format!("{name} must be a non-negative integer, got '{value}'")))
}

fn load_config_file() -> Option<ConfigFile> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring invalid config file {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(env_from(&[]), ConfigFile::default()).unwrap();
        assert!(settings.steam_api_key.is_none());
        assert_eq!(settings.page_delay, Duration::from_millis(1000));
        assert_eq!(settings.locale_repository, "SteamDatabase/GameTracking-TF2");
        assert_eq!(
            settings.pricing_path(),
            settings.data_dir.join("tradetf-spreadsheet.json")
        );
        assert!(settings.require_api_key().is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let file: ConfigFile = toml::from_str(
            r#"
[steam]
api_key = "from-file"

[storage]
data_dir = "/srv/file"

[fetch]
page_delay_ms = 250
"#,
        )
        .unwrap();
        let env = env_from(&[("STEAM_API_KEY", "from-env"), ("TF_ITEMDB_DATA_DIR", "/srv/env")]);
        let settings = Settings::resolve(env, file).unwrap();

        assert_eq!(settings.require_api_key().unwrap(), "from-env");
        assert_eq!(settings.data_dir, PathBuf::from("/srv/env"));
        assert_eq!(settings.page_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_empty_api_key_is_missing() {
        let settings =
            Settings::resolve(env_from(&[("STEAM_API_KEY", "")]), ConfigFile::default()).unwrap();
        assert!(settings.steam_api_key.is_none());
    }

    #[test]
    fn test_invalid_delay_is_config_error() {
        let err = Settings::resolve(
            env_from(&[("TF_ITEMDB_PAGE_DELAY_MS", "soon")]),
            ConfigFile::default(),
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_pricing_path_override() {
        let settings = Settings::resolve(
            env_from(&[("TF_ITEMDB_PRICING", "/tmp/prices.json")]),
            ConfigFile::default(),
        )
        .unwrap()
        .with_data_dir("/elsewhere");
        assert_eq!(settings.pricing_path(), PathBuf::from("/tmp/prices.json"));
        assert_eq!(settings.data_dir, PathBuf::from("/elsewhere"));
    }
}
