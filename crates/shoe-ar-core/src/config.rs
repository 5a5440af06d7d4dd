//! Configuration loading for the shoe-ar tools.
//!
//! Every field is optional; accessors fill in defaults. The project root is
//! not part of the file: it is passed explicitly by each entry point.

use crate::error::AssetError;
use crate::provision::{default_sources, AssetSource};
use crate::store::{default_model_ids, ModelId};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "shoe-ar.toml";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address (all interfaces, so phones on the LAN can connect)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default per-download timeout in seconds
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub store: Option<StoreConfig>,
    pub server: Option<ServerConfig>,
    pub download: Option<DownloadConfig>,
    pub sources: Option<Vec<AssetSource>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub ids: Option<Vec<ModelId>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct DownloadConfig {
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Model identifiers to process, `1`, `2`, `3` unless configured
    pub fn model_ids(&self) -> Vec<ModelId> {
        self.store
            .as_ref()
            .and_then(|store| store.ids.clone())
            .unwrap_or_else(default_model_ids)
    }

    pub fn server_host(&self) -> String {
        self.server
            .as_ref()
            .and_then(|server| server.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|server| server.port)
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn download_timeout(&self) -> Duration {
        let secs = self
            .download
            .as_ref()
            .and_then(|download| download.timeout_secs)
            .unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// Remote sources for GLB files, the Khronos samples unless configured
    pub fn sources(&self) -> Vec<AssetSource> {
        self.sources.clone().unwrap_or_else(default_sources)
    }
}

/// Per-user config file, e.g. `~/.config/shoe-ar/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "shoe-ar").map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(PROJECT_CONFIG_FILE)
}

/// Load `path`, or defaults when it does not exist
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<Config, AssetError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents).map_err(|source| AssetError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Resolve the effective config for a project root.
///
/// Lookup order: `explicit` (must exist), `<root>/shoe-ar.toml`, the per-user
/// config file, built-in defaults.
///
/// # Errors
/// Returns [`AssetError::ConfigNotFound`] for a missing explicit path, or any
/// read/parse error of the file that was selected.
pub fn resolve_config(root: &Path, explicit: Option<&Path>) -> Result<Config, AssetError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(AssetError::ConfigNotFound(path.to_path_buf()));
        }
        return load_config(path);
    }

    let project = project_config_path(root);
    if project.exists() {
        return load_config(&project);
    }

    match default_config_path() {
        Some(user) => load_config(&user),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.server_port(), 8000);
        assert_eq!(config.server_host(), "0.0.0.0");
        assert_eq!(config.download_timeout(), Duration::from_secs(60));
        assert_eq!(config.model_ids(), default_model_ids());
        assert_eq!(config.sources(), default_sources());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [store]
            ids = ["1", "7"]

            [server]
            host = "127.0.0.1"
            port = 9000

            [download]
            timeout_secs = 5

            [[sources]]
            file = "7.glb"
            url = "https://cdn.test/7.glb"
            "#,
        )
        .unwrap();

        let ids: Vec<String> = config.model_ids().into_iter().map(String::from).collect();
        assert_eq!(ids, vec!["1", "7"]);
        assert_eq!(config.server_host(), "127.0.0.1");
        assert_eq!(config.server_port(), 9000);
        assert_eq!(config.download_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.sources(),
            vec![AssetSource::new("7.glb", "https://cdn.test/7.glb")]
        );
    }

    #[test]
    fn test_invalid_id_in_config_is_rejected() {
        let parsed: Result<Config, _> = toml::from_str("[store]\nids = [\"../1\"]\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_project_file_wins_over_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            project_config_path(dir.path()),
            "[server]\nport = 8123\n",
        )
        .unwrap();
        let config = resolve_config(dir.path(), None).unwrap();
        assert_eq!(config.server_port(), 8123);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("custom.toml");
        let err = resolve_config(dir.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, AssetError::ConfigNotFound(_)));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[server\nport = 1").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
