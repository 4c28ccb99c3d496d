//! Static description of an extension.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionManifest {
    /// Unique across loaded extensions; the kernel refuses a second load.
    pub id: String,
    pub name: String,
    /// Usually the providing crate's `CARGO_PKG_VERSION`.
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub provides: Provides,
}

impl ExtensionManifest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            description: String::new(),
            provides: Provides::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare the tool ids `initialize` will register.
    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provides.tools = tools.into_iter().map(Into::into).collect();
        self
    }
}

/// Tool ids an extension registers, listed up front for logging and tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Provides {
    #[serde(default)]
    pub tools: Vec<String>,
}
