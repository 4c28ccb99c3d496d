//! Repeating reminder tools for splitscreen.
//!
//! ## Tools
//!
//! - `reminder_schedule`: Deliver a notification every N seconds, a bounded number of times
//! - `reminder_cancel`: Stop a scheduled reminder
//! - `reminder_list`: List reminders that are still running

mod extension;
mod notifier;
mod scheduler;
mod scheduler_types;
mod tools;

#[cfg(test)]
mod testing;

pub use extension::ReminderToolsExtension;
pub use notifier::{DesktopNotifier, LogNotifier, Notifier, NotifyError, desktop_command, notifier_for};
pub use scheduler::RepeatScheduler;
pub use scheduler_types::{ReminderHandle, ReminderInfo, ReminderSpec, SchedulerError, SchedulerLimits};
pub use tools::*;
