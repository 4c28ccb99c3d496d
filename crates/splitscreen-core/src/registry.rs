//! Tool registry.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use splitscreen_protocols::error::ExtensionError;
use splitscreen_protocols::extension::ToolRegistryAccess;
use splitscreen_protocols::tool::{Tool, ToolDefinition};

/// Tool id to tool, shared between extensions (which register) and the
/// server (which looks up and lists).
#[derive(Default)]
pub struct ToolRegistry {
    tools: DashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with `AlreadyRegistered` if the id is taken; the first
    /// registration wins.
    pub fn register(&self, tool: Arc<dyn Tool>) -> Result<(), ExtensionError> {
        let id = tool.definition().id.clone();
        match self.tools.entry(id) {
            Entry::Occupied(entry) => Err(ExtensionError::AlreadyRegistered(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!("Registered tool {}", entry.key());
                entry.insert(tool);
                Ok(())
            }
        }
    }

    pub fn unregister(&self, id: &str) -> Result<(), ExtensionError> {
        self.tools
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ExtensionError::NotFound(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(id).map(|tool| tool.value().clone())
    }

    /// Definitions ordered by id, so `tools/list` is stable across calls.
    pub fn list(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .iter()
            .map(|tool| tool.definition().clone())
            .collect();
        defs.sort_by(|a, b| a.id.cmp(&b.id));
        defs
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl ToolRegistryAccess for ToolRegistry {
    fn register_tool(&self, tool: Arc<dyn Tool>) -> Result<(), ExtensionError> {
        self.register(tool)
    }

    fn unregister_tool(&self, tool_id: &str) -> Result<(), ExtensionError> {
        self.unregister(tool_id)
    }
}
