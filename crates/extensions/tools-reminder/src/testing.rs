//! Test doubles shared by the reminder tests.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::notifier::{Notifier, NotifyError};

/// Records every delivery; optionally fails each one.
#[derive(Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn channel(&self) -> &'static str {
        "recording"
    }

    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        self.delivered
            .lock()
            .push((title.to_string(), message.to_string()));
        if self.fail {
            Err(NotifyError::Failed("boom".to_string()))
        } else {
            Ok(())
        }
    }
}
