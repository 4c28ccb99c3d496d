//! Extension host: loads extensions, owns the tool registry, dispatches calls.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use splitscreen_protocols::error::{ExtensionError, ToolError};
use splitscreen_protocols::extension::{Extension, ExtensionContext, ExtensionManifest};
use splitscreen_protocols::tool::{ToolContext, ToolResult};
use splitscreen_protocols::types::RiskLevel;

use crate::registry::ToolRegistry;

/// The host managing extension lifecycle.
pub struct Kernel {
    tool_registry: Arc<ToolRegistry>,
    // Load order is kept so shutdown can run in reverse.
    extensions: Mutex<Vec<Arc<dyn Extension>>>,
    work_dir: PathBuf,
}

impl Kernel {
    /// Create a new kernel.
    pub fn new(work_dir: PathBuf) -> Self {
        Self {
            tool_registry: Arc::new(ToolRegistry::new()),
            extensions: Mutex::new(Vec::new()),
            work_dir,
        }
    }

    /// Load and initialize an extension.
    pub async fn load_extension(
        &self,
        mut extension: Box<dyn Extension>,
        config: serde_json::Value,
    ) -> Result<(), ExtensionError> {
        let manifest = extension.manifest().clone();

        if self.extensions.lock().iter().any(|e| e.id() == manifest.id) {
            return Err(ExtensionError::AlreadyRegistered(manifest.id));
        }

        info!("Loading extension: {} v{}", manifest.name, manifest.version);

        let ctx = ExtensionContext::new(config, self.tool_registry.clone(), self.work_dir.clone());
        extension.initialize(ctx).await?;

        self.extensions.lock().push(Arc::from(extension));
        info!(
            tools = manifest.provides.tools.len(),
            "Extension loaded: {}", manifest.id
        );
        Ok(())
    }

    /// Shut down all extensions in reverse load order.
    pub async fn stop(&self) {
        let extensions: Vec<Arc<dyn Extension>> = self.extensions.lock().drain(..).collect();
        for extension in extensions.iter().rev() {
            let id = extension.id();
            if let Err(e) = extension.shutdown().await {
                warn!("Failed to shut down {}: {}", id, e);
            } else {
                debug!("Extension stopped: {}", id);
            }
        }
    }

    /// Look up, validate and execute a tool.
    pub async fn call_tool(
        &self,
        tool_id: &str,
        params: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let tool = self
            .tool_registry
            .get(tool_id)
            .ok_or_else(|| ToolError::NotFound(tool_id.to_string()))?;

        tool.validate(&params)?;
        if tool.risk_level() >= RiskLevel::Medium {
            info!(tool = tool_id, correlation_id = %ctx.correlation_id, "Executing tool");
        } else {
            debug!(tool = tool_id, correlation_id = %ctx.correlation_id, "Executing tool");
        }
        tool.execute(params, ctx).await
    }

    /// Get the tool registry.
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Working directory handed to tools.
    pub fn work_dir(&self) -> &PathBuf {
        &self.work_dir
    }

    /// List all loaded extensions in load order.
    pub fn list_extensions(&self) -> Vec<ExtensionManifest> {
        self.extensions
            .lock()
            .iter()
            .map(|e| e.manifest().clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
