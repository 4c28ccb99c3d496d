//! Repeat scheduler for bounded reminders.
//!
//! Every reminder runs as its own tokio task guarded by a
//! [`CancellationToken`]. The scheduler owns the map of live tasks; callers
//! hold an `Arc<RepeatScheduler>` instead of reaching for a global.
//!
//! A reminder delivers once per interval, starting one interval after it is
//! scheduled, and removes itself after its last delivery.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::notifier::Notifier;
use crate::scheduler_types::{
    ReminderEntry, ReminderHandle, ReminderInfo, ReminderSpec, SchedulerError, SchedulerLimits,
};

pub struct RepeatScheduler {
    notifier: Arc<dyn Notifier>,
    limits: SchedulerLimits,
    tasks: Arc<DashMap<String, ReminderEntry>>,
}

impl RepeatScheduler {
    pub fn new(notifier: Arc<dyn Notifier>, limits: SchedulerLimits) -> Self {
        Self {
            notifier,
            limits,
            tasks: Arc::new(DashMap::new()),
        }
    }

    pub fn limits(&self) -> &SchedulerLimits {
        &self.limits
    }

    /// Start a reminder. Must be called from within a tokio runtime.
    pub fn schedule(&self, spec: ReminderSpec) -> Result<ReminderHandle, SchedulerError> {
        spec.validate(&self.limits)?;

        let id = Uuid::new_v4().to_string();
        let token = CancellationToken::new();
        let info = ReminderInfo {
            id: id.clone(),
            title: spec.title.clone(),
            message: spec.message.clone(),
            interval_secs: spec.interval.as_secs(),
            repeat: spec.repeat,
            delivered: 0,
            created_at: Utc::now(),
        };
        self.tasks.insert(
            id.clone(),
            ReminderEntry {
                info,
                token: token.clone(),
            },
        );

        info!(
            "Reminder {} scheduled: every {}s x{} via {}",
            id,
            spec.interval.as_secs(),
            spec.repeat,
            self.notifier.channel()
        );

        let tasks = self.tasks.clone();
        let notifier = self.notifier.clone();
        let task_id = id.clone();
        let task_token = token.clone();

        tokio::spawn(async move {
            for n in 1..=spec.repeat {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        debug!("Reminder {} cancelled after {} deliveries", task_id, n - 1);
                        break;
                    }
                    _ = tokio::time::sleep(spec.interval) => {}
                }

                if let Err(e) = notifier.notify(&spec.title, &spec.message).await {
                    warn!("Reminder {} delivery {} failed: {}", task_id, n, e);
                }
                if let Some(mut entry) = tasks.get_mut(&task_id) {
                    entry.info.delivered = n;
                }
            }
            tasks.remove(&task_id);
        });

        Ok(ReminderHandle { id, token })
    }

    /// Stop a reminder and forget it.
    pub fn cancel(&self, id: &str) -> Result<ReminderInfo, SchedulerError> {
        let (_, entry) = self
            .tasks
            .remove(id)
            .ok_or_else(|| SchedulerError::NotFound(id.to_string()))?;
        entry.token.cancel();
        info!("Reminder {} cancelled", id);
        Ok(entry.info)
    }

    /// Live reminders, oldest first.
    pub fn list_active(&self) -> Vec<ReminderInfo> {
        let mut active: Vec<ReminderInfo> =
            self.tasks.iter().map(|entry| entry.info.clone()).collect();
        active.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        active
    }

    /// Cancel everything; returns how many reminders were stopped.
    pub fn cancel_all(&self) -> usize {
        let ids: Vec<String> = self.tasks.iter().map(|entry| entry.key().clone()).collect();
        let mut stopped = 0;
        for id in ids {
            if let Some((_, entry)) = self.tasks.remove(&id) {
                entry.token.cancel();
                stopped += 1;
            }
        }
        if stopped > 0 {
            info!("Cancelled {} reminders", stopped);
        }
        stopped
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for RepeatScheduler {
    fn drop(&mut self) {
        for entry in self.tasks.iter() {
            entry.token.cancel();
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
