//! Configuration loader.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

fn env_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| match Regex::new(r"\$\{([^}]+)\}") {
        Ok(re) => re,
        Err(e) => unreachable!("placeholder pattern: {}", e),
    })
}

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    ///
    /// Returns whether the file was found alongside the config.
    pub fn load_or_default(path: &Path) -> Result<(Config, bool), ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok((config, true)),
            Err(ConfigError::NotFound(_)) => Ok((Config::default(), false)),
            Err(e) => Err(e),
        }
    }

    /// Default config location: `~/.config/splitscreen/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("splitscreen").join("config.toml"))
    }

    /// Substitute `${VAR}` placeholders from the environment.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut missing = None;
        let expanded = env_placeholder().replace_all(content, |cap: &regex::Captures<'_>| {
            std::env::var(&cap[1]).unwrap_or_else(|_| {
                missing.get_or_insert_with(|| cap[1].to_string());
                String::new()
            })
        });
        match missing {
            Some(var) => Err(ConfigError::EnvVarNotSet(var)),
            None => Ok(expanded.into_owned()),
        }
    }

    /// Expand shell-style paths (e.g., `~/.local/state`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}
