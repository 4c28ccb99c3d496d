//! Window tools extension.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use splitscreen_config::WindowConfig;
use splitscreen_protocols::error::ExtensionError;
use splitscreen_protocols::extension::{Extension, ExtensionContext, ExtensionManifest};

use crate::automation::{AutomationChannel, ShellChannel};
use crate::screen::{PrimaryScreen, ScreenGeometry};
use crate::window::{ControllerSettings, Platform, TargetRegistry, UniversalController};
use crate::window_tools::*;

/// Split-screen window control extension.
///
/// The extension config is the JSON form of the `[window]` table.
pub struct WindowToolsExtension {
    manifest: ExtensionManifest,
    platform: Platform,
    channel: Arc<dyn AutomationChannel>,
    screen: Arc<dyn ScreenGeometry>,
    controller: Option<Arc<UniversalController>>,
}

impl WindowToolsExtension {
    pub fn new() -> Self {
        Self::with_parts(Platform::current(), Arc::new(ShellChannel::new()), Arc::new(PrimaryScreen))
    }

    /// Build with an explicit platform, channel and screen source.
    pub fn with_parts(
        platform: Platform,
        channel: Arc<dyn AutomationChannel>,
        screen: Arc<dyn ScreenGeometry>,
    ) -> Self {
        let manifest =
            ExtensionManifest::new("tools-window", "Window Tools", env!("CARGO_PKG_VERSION"))
                .with_description("Split-screen window control with permission-aware fallback")
                .with_tools([
                    "window_control",
                    "window_permission_status",
                    "window_list_targets",
                    "window_screen_info",
                ]);

        Self {
            manifest,
            platform,
            channel,
            screen,
            controller: None,
        }
    }

    /// Controller built during `initialize`.
    pub fn controller(&self) -> Option<&Arc<UniversalController>> {
        self.controller.as_ref()
    }
}

impl Default for WindowToolsExtension {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extension for WindowToolsExtension {
    fn manifest(&self) -> &ExtensionManifest {
        &self.manifest
    }

    async fn initialize(&mut self, ctx: ExtensionContext) -> Result<(), ExtensionError> {
        let config: WindowConfig = ctx
            .parse_config()
            .map_err(|e| ExtensionError::InitializationFailed(format!("[window] config: {}", e)))?;

        let registry = Arc::new(TargetRegistry::with_configured(&config.targets));
        let settings = ControllerSettings {
            settle_delay_ms: config.settle_delay_ms,
            request_elevation: config.request_elevation,
        };
        let controller = Arc::new(UniversalController::new(
            self.platform,
            self.channel.clone(),
            registry.clone(),
            settings,
        ));
        let timeout_ms = config.command_timeout_ms;

        ctx.tool_registry.register_tool(Arc::new(WindowControlTool::new(
            controller.clone(),
            self.screen.clone(),
            timeout_ms,
        )))?;
        ctx.tool_registry.register_tool(Arc::new(WindowPermissionStatusTool::new(
            controller.clone(),
            timeout_ms,
        )))?;
        ctx.tool_registry
            .register_tool(Arc::new(WindowListTargetsTool::new(controller.clone())))?;
        ctx.tool_registry.register_tool(Arc::new(WindowScreenInfoTool::new(
            self.screen.clone(),
            timeout_ms,
        )))?;

        info!(
            "Window tools ready: platform={:?} targets={}",
            self.platform,
            registry.len()
        );
        self.controller = Some(controller);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeChannel, FakeScreen};
    use splitscreen_protocols::extension::ToolRegistryAccess;
    use splitscreen_protocols::tool::Tool;

    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingRegistry {
        ids: Mutex<Vec<String>>,
    }

    impl ToolRegistryAccess for RecordingRegistry {
        fn register_tool(&self, tool: Arc<dyn Tool>) -> Result<(), ExtensionError> {
            self.ids.lock().push(tool.definition().id.clone());
            Ok(())
        }

        fn unregister_tool(&self, _tool_id: &str) -> Result<(), ExtensionError> {
            Ok(())
        }
    }

    fn extension() -> WindowToolsExtension {
        WindowToolsExtension::with_parts(
            Platform::MacOs,
            Arc::new(FakeChannel::new()),
            Arc::new(FakeScreen(None)),
        )
    }

    #[test]
    fn test_extension_manifest() {
        let ext = extension();
        assert_eq!(ext.manifest().id, "tools-window");
        assert_eq!(ext.manifest().provides.tools.len(), 4);
        assert!(ext.controller().is_none());
    }

    #[tokio::test]
    async fn test_initialize_registers_provided_tools() {
        let mut ext = extension();
        let registry = Arc::new(RecordingRegistry::default());
        let ctx = ExtensionContext::new(serde_json::Value::Null, registry.clone(), "/tmp".into());

        ext.initialize(ctx).await.unwrap();

        assert_eq!(*registry.ids.lock(), ext.manifest().provides.tools);
        assert!(ext.controller().is_some());
    }

    #[tokio::test]
    async fn test_initialize_with_configured_targets() {
        let mut ext = extension();
        let registry = Arc::new(RecordingRegistry::default());
        let config = serde_json::json!({
            "command_timeout_ms": 3000,
            "targets": [{"name": "Sublime Text", "aliases": ["sublime"]}]
        });
        let ctx = ExtensionContext::new(config, registry, "/tmp".into());

        ext.initialize(ctx).await.unwrap();

        let controller = ext.controller().unwrap();
        assert_eq!(
            controller.registry().lookup("Sublime Text").unwrap().name,
            "Sublime Text"
        );
    }

    #[tokio::test]
    async fn test_initialize_rejects_bad_config() {
        let mut ext = extension();
        let registry = Arc::new(RecordingRegistry::default());
        let config = serde_json::json!({"command_timeout_ms": "soon"});
        let ctx = ExtensionContext::new(config, registry, "/tmp".into());

        let err = ext.initialize(ctx).await.unwrap_err();
        assert!(matches!(err, ExtensionError::InitializationFailed(_)));
    }

    #[test]
    fn test_as_any() {
        let ext = extension();
        assert!(ext.as_any().downcast_ref::<WindowToolsExtension>().is_some());
    }
}
