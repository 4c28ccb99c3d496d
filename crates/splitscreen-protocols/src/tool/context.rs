//! Per-call tool context.

use std::path::PathBuf;

/// Built fresh for every `tools/call`.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Identifies the MCP connection (or `cli` for one-shot commands).
    pub session_id: String,
    /// Unique per call; shows up in the kernel's dispatch log.
    pub correlation_id: String,
    pub work_dir: PathBuf,
}

impl ToolContext {
    pub fn new(session_id: impl Into<String>, work_dir: PathBuf) -> Self {
        Self {
            session_id: session_id.into(),
            correlation_id: uuid::Uuid::new_v4().to_string(),
            work_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context() {
        let ctx = ToolContext::new("stdio-1", PathBuf::from("/tmp"));
        assert_eq!(ctx.session_id, "stdio-1");
        assert_eq!(ctx.work_dir, PathBuf::from("/tmp"));
        assert!(!ctx.correlation_id.is_empty());
    }

    #[test]
    fn test_correlation_ids_differ() {
        let a = ToolContext::new("cli", PathBuf::from("/tmp"));
        let b = ToolContext::new("cli", PathBuf::from("/tmp"));
        assert_ne!(a.correlation_id, b.correlation_id);
    }
}
