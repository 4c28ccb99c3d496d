//! Reminder tools extension definition.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use splitscreen_config::ReminderConfig;
use splitscreen_protocols::error::ExtensionError;
use splitscreen_protocols::extension::{Extension, ExtensionContext, ExtensionManifest};

use crate::notifier::{Notifier, notifier_for};
use crate::scheduler::RepeatScheduler;
use crate::scheduler_types::SchedulerLimits;
use crate::tools::{ReminderCancelTool, ReminderListTool, ReminderScheduleTool};

/// Repeating reminder extension.
///
/// The extension config is the JSON form of the `[reminder]` table.
pub struct ReminderToolsExtension {
    manifest: ExtensionManifest,
    notifier: Option<Arc<dyn Notifier>>,
    scheduler: Option<Arc<RepeatScheduler>>,
}

impl ReminderToolsExtension {
    pub fn new() -> Self {
        let manifest =
            ExtensionManifest::new("tools-reminder", "Reminder Tools", env!("CARGO_PKG_VERSION"))
                .with_description("Bounded repeating reminders delivered as notifications")
                .with_tools(["reminder_schedule", "reminder_cancel", "reminder_list"]);

        Self {
            manifest,
            notifier: None,
            scheduler: None,
        }
    }

    /// Deliver through `notifier` instead of the configured channel.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn scheduler(&self) -> Option<&Arc<RepeatScheduler>> {
        self.scheduler.as_ref()
    }
}

impl Default for ReminderToolsExtension {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extension for ReminderToolsExtension {
    fn manifest(&self) -> &ExtensionManifest {
        &self.manifest
    }

    async fn initialize(&mut self, ctx: ExtensionContext) -> Result<(), ExtensionError> {
        let config: ReminderConfig = ctx.parse_config().map_err(|e| {
            ExtensionError::InitializationFailed(format!("[reminder] config: {}", e))
        })?;

        let notifier = match &self.notifier {
            Some(notifier) => notifier.clone(),
            None => notifier_for(&config.channel)
                .map_err(|e| ExtensionError::InitializationFailed(e.to_string()))?,
        };
        let channel = notifier.channel();
        let scheduler = Arc::new(RepeatScheduler::new(notifier, SchedulerLimits::from(&config)));

        ctx.tool_registry.register_tool(Arc::new(ReminderScheduleTool::new(
            scheduler.clone(),
            config.default_title.clone(),
        )))?;
        ctx.tool_registry
            .register_tool(Arc::new(ReminderCancelTool::new(scheduler.clone())))?;
        ctx.tool_registry
            .register_tool(Arc::new(ReminderListTool::new(scheduler.clone())))?;

        info!(
            "Reminder tools ready: channel={} max_repeat={}",
            channel, config.max_repeat
        );
        self.scheduler = Some(scheduler);
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ExtensionError> {
        if let Some(scheduler) = &self.scheduler {
            scheduler.cancel_all();
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
