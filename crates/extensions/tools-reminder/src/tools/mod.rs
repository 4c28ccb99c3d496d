//! Reminder tools.

mod reminder_manage;
mod reminder_schedule;

pub use reminder_manage::{ReminderCancelParams, ReminderCancelTool, ReminderListTool};
pub use reminder_schedule::{ReminderScheduleParams, ReminderScheduleTool};

use splitscreen_protocols::error::ToolError;

use crate::scheduler_types::SchedulerError;

impl From<SchedulerError> for ToolError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::NotFound(_) => ToolError::ExecutionFailed(err.to_string()),
            SchedulerError::InvalidSpec(_) => ToolError::InvalidParameters(err.to_string()),
        }
    }
}
