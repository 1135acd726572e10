use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used when neither flag, environment nor config names a database
pub const DEFAULT_DB_FILE: &str = "research_sessions.db";

const DB_ENV: &str = "DELVE_DB";
const CONFIG_ENV: &str = "DELVE_CONFIG";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. DELVE_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.delve/config.toml (fallback for systems without XDG)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("delve").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".delve").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Resolve the session database path based on priority:
/// 1. Explicit path
/// 2. DELVE_DB environment variable
/// 3. `database_path` from the config file
/// 4. `research_sessions.db` in the working directory
pub fn resolve_database_path(explicit_path: Option<&str>, config: &Config) -> PathBuf {
    resolve_database_path_with(explicit_path, std::env::var(DB_ENV).ok(), config)
}

fn resolve_database_path_with(
    explicit_path: Option<&str>,
    env_path: Option<String>,
    config: &Config,
) -> PathBuf {
    if let Some(path) = explicit_path {
        return expand_tilde(path);
    }

    if let Some(path) = env_path {
        return expand_tilde(&path);
    }

    if let Some(path) = &config.database_path {
        return path.clone();
    }

    PathBuf::from(DEFAULT_DB_FILE)
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_model() -> String {
    "o4-mini".to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

fn default_list_limit() -> usize {
    delve_index::DEFAULT_LIST_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            default_model: default_model(),
            export_dir: default_export_dir(),
            list_limit: default_list_limit(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.database_path, None);
        assert_eq!(config.list_limit, 10);
        assert_eq!(config.export_dir, PathBuf::from("exports"));
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("delve").join("config.toml");

        let config = Config {
            database_path: Some(PathBuf::from("/var/lib/delve/sessions.db")),
            default_model: "claude-sonnet-4".to_string(),
            list_limit: 25,
            ..Config::default()
        };

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "default_model = \"gpt-4o\"\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.default_model, "gpt-4o");
        assert_eq!(loaded.list_limit, 10);
        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_malformed_file_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "list_limit = \"many\"\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        Ok(())
    }

    #[test]
    fn test_database_path_priority() {
        let config = Config {
            database_path: Some(PathBuf::from("from-config.db")),
            ..Config::default()
        };

        assert_eq!(
            resolve_database_path_with(Some("flag.db"), Some("env.db".to_string()), &config),
            PathBuf::from("flag.db")
        );
        assert_eq!(
            resolve_database_path_with(None, Some("env.db".to_string()), &config),
            PathBuf::from("env.db")
        );
        assert_eq!(
            resolve_database_path_with(None, None, &config),
            PathBuf::from("from-config.db")
        );
        assert_eq!(
            resolve_database_path_with(None, None, &Config::default()),
            PathBuf::from(DEFAULT_DB_FILE)
        );
    }
}
