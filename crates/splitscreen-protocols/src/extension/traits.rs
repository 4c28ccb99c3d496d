//! Extension and registry-access traits.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use super::{ExtensionContext, ExtensionManifest};
use crate::error::ExtensionError;
use crate::tool::Tool;

/// A bundle of tools loaded by the kernel.
///
/// `initialize` runs once with the extension's config section and registers
/// tools; `shutdown` runs in reverse load order when the server stops.
#[async_trait]
pub trait Extension: Send + Sync + 'static {
    fn manifest(&self) -> &ExtensionManifest;

    /// Shorthand for `manifest().id`.
    fn id(&self) -> &str {
        &self.manifest().id
    }

    async fn initialize(&mut self, ctx: ExtensionContext) -> Result<(), ExtensionError>;

    /// Release background work. Default is a no-op.
    async fn shutdown(&self) -> Result<(), ExtensionError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;
}

/// What an extension may do to the tool registry during `initialize`.
pub trait ToolRegistryAccess: Send + Sync {
    fn register_tool(&self, tool: Arc<dyn Tool>) -> Result<(), ExtensionError>;

    fn unregister_tool(&self, tool_id: &str) -> Result<(), ExtensionError>;
}
