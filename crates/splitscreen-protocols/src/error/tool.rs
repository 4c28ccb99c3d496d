//! Tool call errors.
//!
//! These surface as JSON-RPC errors, except `ExecutionFailed` and `Timeout`,
//! which the server reports as an `isError` tool result.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    /// Arguments that deserialize but make no sense (unknown action, out of range).
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Arguments rejected against the schema before the tool ran.
    #[error("Parameter validation failed: {0}")]
    ValidationFailed(String),

    #[error("Tool execution timed out after {0} ms")]
    Timeout(u64),
}

impl ToolError {
    pub fn rpc_code(&self) -> i32 {
        match self {
            ToolError::NotFound(_) => -32601,
            ToolError::InvalidParameters(_) | ToolError::ValidationFailed(_) => -32602,
            ToolError::ExecutionFailed(_) | ToolError::Timeout(_) => -32603,
        }
    }
}
