//! Configuration for the alex CLI.
//!
//! alex reads an optional TOML file named `.alex.toml`, preferring the one
//! in the current directory and falling back to `~/.alex.toml`. Every
//! setting has a default, so alex runs without any configuration at all.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use thiserror::Error;

use alex_fetch::{DEFAULT_LANGUAGE, DEFAULT_USER_AGENT};

/// Name of the configuration file, in the current directory or `$HOME`.
pub const CONFIG_FILENAME: &str = ".alex.toml";

/// Default configuration template written by `alex init`.
pub const CONFIG_TEMPLATE: &str = "\
# alex configuration.

# Where the document collection file lives. Relative paths are resolved
# against the directory containing this file.
# store_path = \".alex/documents.json\"

# Wikipedia language edition to fetch from.
# language = \"en\"

# User agent sent to the Wikipedia API. Please include contact details if
# you fetch at volume.
# user_agent = \"alex/0.1 (you@example.com)\"
";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A configuration file is not valid TOML.
    #[error("invalid config {path}: {message}")]
    Parse {
        /// Path to the invalid file.
        path: PathBuf,
        /// Error message from the TOML parser.
        message: String,
    },
}

/// Raw configuration as it appears on disk; every field optional.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    /// Path of the document collection file.
    store_path: Option<PathBuf>,
    /// Wikipedia language edition.
    language: Option<String>,
    /// User agent for API requests.
    user_agent: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the document collection file.
    pub store_path: PathBuf,
    /// Wikipedia language edition.
    pub language: String,
    /// User agent for API requests.
    pub user_agent: String,
}

impl Config {
    /// Loads configuration for a working directory.
    ///
    /// Tries `cwd/.alex.toml`, then `~/.alex.toml`; missing files mean
    /// defaults. A present-but-invalid file is an error.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let local = cwd.join(CONFIG_FILENAME);
        if local.exists() {
            let raw = read_raw(&local)?;
            return Ok(Self::resolve(raw, cwd));
        }

        if let Some(global) = global_config_path()
            && global.exists()
        {
            let base = global.parent().map(Path::to_path_buf).unwrap_or_default();
            let raw = read_raw(&global)?;
            return Ok(Self::resolve(raw, &base));
        }

        Ok(Self::resolve(RawConfig::default(), cwd))
    }

    /// Applies defaults and resolves relative paths against `base`.
    fn resolve(raw: RawConfig, base: &Path) -> Self {
        let store_path = match raw.store_path {
            Some(path) if path.is_relative() => base.join(path),
            Some(path) => path,
            None => default_store_path(),
        };

        Self {
            store_path,
            language: raw
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            user_agent: raw
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

/// Reads and parses one configuration file.
fn read_raw(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Path of the global configuration file, `~/.alex.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Default location of the document collection file.
pub fn default_store_path() -> PathBuf {
    ProjectDirs::from("", "", "alex")
        .map(|dirs| dirs.data_dir().join("documents.json"))
        .unwrap_or_else(|| PathBuf::from(".alex").join("documents.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.language, "en");
        assert!(config.user_agent.starts_with("alex/"));
    }

    #[test]
    fn test_local_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "language = \"de\"\nstore_path = \"data/docs.json\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.language, "de");
        assert_eq!(config.store_path, dir.path().join("data/docs.json"));
    }

    #[test]
    fn test_absolute_store_path_kept() {
        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("elsewhere.json");
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            format!("store_path = {:?}\n", absolute),
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.store_path, absolute);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "language = [broken").unwrap();

        assert!(matches!(
            Config::load(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_template_is_valid_toml() {
        let raw: RawConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert!(raw.store_path.is_none());
        assert!(raw.language.is_none());
    }
}
