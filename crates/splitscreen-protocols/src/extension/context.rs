//! Extension context for initialization.

use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::ToolRegistryAccess;

/// Handed to [`Extension::initialize`](super::Extension::initialize).
#[derive(Clone)]
pub struct ExtensionContext {
    /// JSON form of the extension's TOML table; `Null` when absent.
    pub config: serde_json::Value,
    pub tool_registry: Arc<dyn ToolRegistryAccess>,
    pub work_dir: PathBuf,
}

impl ExtensionContext {
    pub fn new(
        config: serde_json::Value,
        tool_registry: Arc<dyn ToolRegistryAccess>,
        work_dir: PathBuf,
    ) -> Self {
        Self {
            config,
            tool_registry,
            work_dir,
        }
    }

    /// Deserialize the config section, using `T::default()` when it is absent.
    pub fn parse_config<T: DeserializeOwned + Default>(&self) -> Result<T, serde_json::Error> {
        if self.config.is_null() {
            Ok(T::default())
        } else {
            serde_json::from_value(self.config.clone())
        }
    }
}
