//! Types shared by [`RepeatScheduler`](crate::scheduler::RepeatScheduler) and the reminder tools.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use splitscreen_config::ReminderConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Reminder not found: {0}")]
    NotFound(String),

    #[error("Invalid reminder: {0}")]
    InvalidSpec(String),
}

/// Bounds applied to every scheduled reminder.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerLimits {
    pub max_repeat: u32,
    pub min_interval: Duration,
}

impl SchedulerLimits {
    pub fn new(max_repeat: u32, min_interval: Duration) -> Self {
        Self {
            max_repeat,
            min_interval,
        }
    }
}

impl Default for SchedulerLimits {
    fn default() -> Self {
        Self::from(&ReminderConfig::default())
    }
}

impl From<&ReminderConfig> for SchedulerLimits {
    fn from(config: &ReminderConfig) -> Self {
        Self::new(config.max_repeat, Duration::from_secs(config.min_interval_secs))
    }
}

/// What to deliver and how often.
#[derive(Debug, Clone)]
pub struct ReminderSpec {
    pub title: String,
    pub message: String,
    pub interval: Duration,
    pub repeat: u32,
}

impl ReminderSpec {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        interval: Duration,
        repeat: u32,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            interval,
            repeat,
        }
    }

    /// Reject reminders outside the scheduler limits.
    pub fn validate(&self, limits: &SchedulerLimits) -> Result<(), SchedulerError> {
        if self.message.trim().is_empty() {
            return Err(SchedulerError::InvalidSpec("message must not be empty".to_string()));
        }
        if self.repeat == 0 || self.repeat > limits.max_repeat {
            return Err(SchedulerError::InvalidSpec(format!(
                "repeat must be between 1 and {}, got {}",
                limits.max_repeat, self.repeat
            )));
        }
        if self.interval < limits.min_interval {
            return Err(SchedulerError::InvalidSpec(format!(
                "interval must be at least {}s, got {}s",
                limits.min_interval.as_secs(),
                self.interval.as_secs()
            )));
        }
        Ok(())
    }
}

/// Snapshot of a live reminder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderInfo {
    pub id: String,
    pub title: String,
    pub message: String,
    pub interval_secs: u64,
    pub repeat: u32,
    pub delivered: u32,
    pub created_at: DateTime<Utc>,
}

impl ReminderInfo {
    pub fn remaining(&self) -> u32 {
        self.repeat.saturating_sub(self.delivered)
    }
}

/// Returned by `schedule`; cancelling it stops delivery.
#[derive(Debug, Clone)]
pub struct ReminderHandle {
    pub id: String,
    pub(crate) token: CancellationToken,
}

impl ReminderHandle {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

pub(crate) struct ReminderEntry {
    pub(crate) info: ReminderInfo,
    pub(crate) token: CancellationToken,
}
