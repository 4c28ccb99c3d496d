//! Window control tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use splitscreen_protocols::error::ToolError;
use splitscreen_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};
use splitscreen_protocols::types::RiskLevel;

use crate::screen::ScreenGeometry;
use crate::window::{UniversalController, WindowAction, WindowBounds};

use super::run_blocking;

#[derive(Debug, Deserialize)]
pub struct WindowControlParams {
    /// Action name, e.g. `set-left-half`.
    pub action: String,
}

/// Arrange the foreground window.
pub struct WindowControlTool {
    definition: ToolDefinition,
    controller: Arc<UniversalController>,
    screen: Arc<dyn ScreenGeometry>,
    timeout_ms: u64,
}

impl WindowControlTool {
    pub fn new(
        controller: Arc<UniversalController>,
        screen: Arc<dyn ScreenGeometry>,
        timeout_ms: u64,
    ) -> Self {
        let actions: Vec<&str> = WindowAction::ALL.iter().map(|a| a.as_str()).collect();
        Self {
            definition: ToolDefinition::new(
                "window_control",
                "Window Control",
                "Arrange the foreground window: halves, quarters, maximize, minimize or \
                 fullscreen. Falls back to manual instructions when automation is not permitted.",
            )
            .with_parameters_schema(serde_json::json!({
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": actions,
                        "description": "Window action to apply"
                    }
                },
                "required": ["action"]
            }))
            .with_risk_level(RiskLevel::Medium),
            controller,
            screen,
            timeout_ms,
        }
    }
}

#[async_trait]
impl Tool for WindowControlTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: WindowControlParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParameters(format!("Invalid params: {}", e)))?;
        let action: WindowAction = params
            .action
            .parse()
            .map_err(|e: crate::window::WindowError| ToolError::InvalidParameters(e.to_string()))?;

        let controller = self.controller.clone();
        let screen = self.screen.clone();

        let result = run_blocking(self.timeout_ms, move || {
            let size = screen.primary_screen().map_err(|e| e.to_string())?;
            let bounds = WindowBounds::for_action(action, size);
            bounds.validate().map_err(|e| e.to_string())?;
            debug!("{} -> {:?} on {}x{}", action, bounds, size.width, size.height);
            Ok(controller.control_window(action, bounds))
        })
        .await?;

        info!(
            "window_control {}: success={} method={}",
            action, result.success, result.method
        );
        let output = serde_json::to_value(&result)
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        Ok(ToolResult::success_json(result.message.clone(), output)
            .with_metadata("method", serde_json::json!(result.method.as_str())))
    }
}
