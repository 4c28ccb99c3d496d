//! Cancel and list reminders.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use splitscreen_protocols::error::ToolError;
use splitscreen_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};

use crate::scheduler::RepeatScheduler;

// ============================================================================
// Cancel Tool
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ReminderCancelParams {
    pub id: String,
}

pub struct ReminderCancelTool {
    definition: ToolDefinition,
    scheduler: Arc<RepeatScheduler>,
}

impl ReminderCancelTool {
    pub fn new(scheduler: Arc<RepeatScheduler>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "reminder_cancel",
                "Reminder Cancel",
                "Stop a scheduled reminder",
            )
            .with_parameters_schema(serde_json::json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Reminder id returned by reminder_schedule"
                    }
                },
                "required": ["id"]
            })),
            scheduler,
        }
    }
}

#[async_trait]
impl Tool for ReminderCancelTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: ReminderCancelParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParameters(format!("Invalid params: {}", e)))?;

        let info = self.scheduler.cancel(params.id.trim())?;
        let output = serde_json::to_value(&info)
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        Ok(ToolResult::success_json(
            format!(
                "Reminder {} cancelled after {} of {} deliveries",
                info.id, info.delivered, info.repeat
            ),
            output,
        ))
    }
}

// ============================================================================
// List Tool
// ============================================================================

pub struct ReminderListTool {
    definition: ToolDefinition,
    scheduler: Arc<RepeatScheduler>,
}

impl ReminderListTool {
    pub fn new(scheduler: Arc<RepeatScheduler>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "reminder_list",
                "Reminder List",
                "List reminders that are still running",
            ),
            scheduler,
        }
    }
}

#[async_trait]
impl Tool for ReminderListTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let active = self.scheduler.list_active();

        let mut content = format!("{} active reminders", active.len());
        for info in &active {
            content.push_str(&format!(
                "\n- {} \"{}\": {} of {} delivered, every {}s",
                info.id, info.message, info.delivered, info.repeat, info.interval_secs
            ));
        }

        let output = serde_json::to_value(&active)
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        Ok(ToolResult::success_json(content, output))
    }
}
