//! Read-only window tools: permission status, targets, screen info.

use std::sync::Arc;

use async_trait::async_trait;

use splitscreen_protocols::error::ToolError;
use splitscreen_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};

use crate::screen::ScreenGeometry;
use crate::window::{UniversalController, WindowAction, WindowBounds};

use super::run_blocking;

// ============================================================================
// Permission Status Tool
// ============================================================================

/// Report what the dispatcher can currently do.
pub struct WindowPermissionStatusTool {
    definition: ToolDefinition,
    controller: Arc<UniversalController>,
    timeout_ms: u64,
}

impl WindowPermissionStatusTool {
    pub fn new(controller: Arc<UniversalController>, timeout_ms: u64) -> Self {
        Self {
            definition: ToolDefinition::new(
                "window_permission_status",
                "Window Permission Status",
                "Check Accessibility permission, the foreground application and which control tier is available",
            ),
            controller,
            timeout_ms,
        }
    }
}

#[async_trait]
impl Tool for WindowPermissionStatusTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let controller = self.controller.clone();
        let status = run_blocking(self.timeout_ms, move || Ok(controller.permission_status())).await?;

        let mut summary = format!(
            "Accessibility: {}. Foreground app: {}. Tier: {:?}.",
            if status.has_accessibility { "granted" } else { "not granted" },
            status.current_app.as_deref().unwrap_or("unknown"),
            status.control_tier
        );
        for suggestion in &status.suggestions {
            summary.push_str("\n- ");
            summary.push_str(suggestion);
        }

        let output = serde_json::to_value(&status)
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        Ok(ToolResult::success_json(summary, output))
    }
}

// ============================================================================
// List Targets Tool
// ============================================================================

/// List registered target applications.
pub struct WindowListTargetsTool {
    definition: ToolDefinition,
    controller: Arc<UniversalController>,
}

impl WindowListTargetsTool {
    pub fn new(controller: Arc<UniversalController>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "window_list_targets",
                "Window List Targets",
                "List applications with dedicated window control recipes",
            ),
            controller,
        }
    }
}

#[async_trait]
impl Tool for WindowListTargetsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let targets = self.controller.registry().targets();
        let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
        let output = serde_json::to_value(targets)
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        Ok(ToolResult::success_json(
            format!("{} targets: {}", targets.len(), names.join(", ")),
            output,
        ))
    }
}

// ============================================================================
// Screen Info Tool
// ============================================================================

/// Primary screen size and the bounds each action would use.
pub struct WindowScreenInfoTool {
    definition: ToolDefinition,
    screen: Arc<dyn ScreenGeometry>,
    timeout_ms: u64,
}

impl WindowScreenInfoTool {
    pub fn new(screen: Arc<dyn ScreenGeometry>, timeout_ms: u64) -> Self {
        Self {
            definition: ToolDefinition::new(
                "window_screen_info",
                "Window Screen Info",
                "Get the primary screen size and the window bounds for each layout",
            ),
            screen,
            timeout_ms,
        }
    }
}

#[async_trait]
impl Tool for WindowScreenInfoTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let screen = self.screen.clone();
        let size = run_blocking(self.timeout_ms, move || {
            screen.primary_screen().map_err(|e| e.to_string())
        })
        .await?;

        let layouts: serde_json::Map<String, serde_json::Value> = WindowAction::ALL
            .iter()
            .filter(|a| a.is_geometric())
            .map(|a| {
                let bounds = WindowBounds::for_action(*a, size);
                (a.as_str().to_string(), serde_json::json!(bounds))
            })
            .collect();

        Ok(ToolResult::success_json(
            format!("Primary screen: {}x{}", size.width, size.height),
            serde_json::json!({
                "width": size.width,
                "height": size.height,
                "layouts": layouts
            }),
        ))
    }
}
