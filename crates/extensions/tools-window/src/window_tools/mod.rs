//! Window control tools.

mod control;
mod info;

pub use control::*;
pub use info::*;


use std::time::Duration;

use splitscreen_protocols::error::ToolError;

// Helper to run blocking code under the request timeout
pub(crate) async fn run_blocking<F, T>(timeout_ms: u64, f: F) -> Result<T, ToolError>
where
    F: FnOnce() -> Result<T, String> + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(f);
    tokio::time::timeout(Duration::from_millis(timeout_ms), task)
        .await
        .map_err(|_| ToolError::Timeout(timeout_ms))?
        .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?
        .map_err(ToolError::ExecutionFailed)
}
