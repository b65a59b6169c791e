//! Endpoint configuration store
//!
//! The two endpoint identifiers every request needs live in a small JSON
//! key/value file under the platform config directory. Absence of either
//! key is a fatal precondition for all network operations: the console
//! points the user at `solwatch setup` instead of running degraded.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The two endpoint identifiers, immutable for the session.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Repository holding the solution sources
    pub repo_url: String,
    /// Target game server the solutions play against
    pub server_url: String,
}

/// On-disk form; either key may be missing.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredConfig {
    repo_url: Option<String>,
    server_url: Option<String>,
}

/// File-backed key/value store for [`EndpointConfig`].
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at the platform default location
    /// (`<config_dir>/solwatch/config.json`).
    pub fn open_default() -> Result<Self> {
        let dir = dirs::config_dir().context("no config directory available on this platform")?;
        Ok(Self {
            path: dir.join("solwatch").join("config.json"),
        })
    }

    /// Store at an explicit location (tests, `--config-path`).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the configured endpoints.
    ///
    /// Returns `Ok(None)` when the file or either key is absent; partial
    /// configuration is treated the same as none at all.
    pub fn load(&self) -> Result<Option<EndpointConfig>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read config store at {}", self.path.display())
                });
            }
        };

        let stored: StoredConfig = serde_json::from_str(&raw)
            .with_context(|| format!("config store at {} is not valid", self.path.display()))?;

        Ok(match (stored.repo_url, stored.server_url) {
            (Some(repo_url), Some(server_url)) => Some(EndpointConfig {
                repo_url,
                server_url,
            }),
            _ => None,
        })
    }

    /// Write both endpoints, creating parent directories as needed.
    pub fn store(&self, config: &EndpointConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory {}", parent.display())
            })?;
        }

        let stored = StoredConfig {
            repo_url: Some(config.repo_url.clone()),
            server_url: Some(config.server_url.clone()),
        };
        let raw = serde_json::to_string_pretty(&stored).context("failed to encode config")?;
        fs::write(&self.path, raw).with_context(|| {
            format!("failed to write config store at {}", self.path.display())
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> ConfigStore {
        let dir = std::env::temp_dir().join(format!(
            "solwatch-config-test-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        ConfigStore::with_path(dir.join("config.json"))
    }

    #[test]
    fn missing_file_loads_as_none() {
        let store = temp_store("missing");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn store_then_load_roundtrips() {
        let store = temp_store("roundtrip");
        store
            .store(&EndpointConfig {
                repo_url: "https://github.com/user/bot.git".to_string(),
                server_url: "https://game.example.com/p1".to_string(),
            })
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.repo_url, "https://github.com/user/bot.git");
        assert_eq!(loaded.server_url, "https://game.example.com/p1");
    }

    #[test]
    fn partial_config_loads_as_none() {
        let store = temp_store("partial");
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"repoUrl":"https://example.com/r.git"}"#).unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let store = temp_store("malformed");
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        assert!(store.load().is_err());
    }
}
