//! Schedule a repeating reminder.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use splitscreen_protocols::error::ToolError;
use splitscreen_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};
use splitscreen_protocols::types::RiskLevel;

use crate::scheduler::RepeatScheduler;
use crate::scheduler_types::ReminderSpec;

#[derive(Debug, Deserialize)]
pub struct ReminderScheduleParams {
    pub message: String,
    #[serde(default)]
    pub title: Option<String>,
    pub interval_secs: u64,
    pub repeat: u32,
}

/// Start a bounded repeating reminder.
pub struct ReminderScheduleTool {
    definition: ToolDefinition,
    scheduler: Arc<RepeatScheduler>,
    default_title: String,
}

impl ReminderScheduleTool {
    pub fn new(scheduler: Arc<RepeatScheduler>, default_title: impl Into<String>) -> Self {
        let limits = *scheduler.limits();
        Self {
            definition: ToolDefinition::new(
                "reminder_schedule",
                "Reminder Schedule",
                "Deliver a notification every interval_secs seconds, repeat times",
            )
            .with_parameters_schema(serde_json::json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "Reminder text"
                    },
                    "title": {
                        "type": "string",
                        "description": "Notification title"
                    },
                    "interval_secs": {
                        "type": "integer",
                        "minimum": limits.min_interval.as_secs(),
                        "description": "Seconds between deliveries"
                    },
                    "repeat": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": limits.max_repeat,
                        "description": "Number of deliveries"
                    }
                },
                "required": ["message", "interval_secs", "repeat"]
            }))
            .with_risk_level(RiskLevel::Low),
            scheduler,
            default_title: default_title.into(),
        }
    }
}

#[async_trait]
impl Tool for ReminderScheduleTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: ReminderScheduleParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParameters(format!("Invalid params: {}", e)))?;

        let title = params
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.default_title.clone());
        let spec = ReminderSpec::new(
            title,
            params.message,
            Duration::from_secs(params.interval_secs),
            params.repeat,
        );

        let handle = self.scheduler.schedule(spec)?;
        let output = serde_json::json!({
            "id": handle.id,
            "interval_secs": params.interval_secs,
            "repeat": params.repeat,
        });

        Ok(ToolResult::success_json(
            format!(
                "Reminder {} scheduled: every {}s, {} times",
                handle.id, params.interval_secs, params.repeat
            ),
            output,
        ))
    }
}
