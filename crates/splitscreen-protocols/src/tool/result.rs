//! What a tool hands back to the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::types::Metadata;

/// Outcome of one tool call.
///
/// `content` is the human summary. `structured_output` carries the same
/// facts for programmatic callers (the CLI's `--json` prints it verbatim).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn success_json(content: impl Into<String>, output: Value) -> Self {
        Self {
            structured_output: Some(output),
            ..Self::success(content)
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// `tools/call` result payload.
    ///
    /// Structured output becomes a second, pretty-printed text block so
    /// clients that only render text still see it.
    pub fn to_mcp_content(&self) -> Value {
        let text = match (&self.error, self.content.is_empty()) {
            (Some(err), true) => err.clone(),
            (Some(err), false) => format!("{}\n{}", self.content, err),
            (None, _) => self.content.clone(),
        };

        let mut blocks = vec![json!({"type": "text", "text": text})];
        if let Some(output) = &self.structured_output {
            let rendered = serde_json::to_string_pretty(output).unwrap_or_default();
            blocks.push(json!({"type": "text", "text": rendered}));
        }

        json!({"content": blocks, "isError": !self.success})
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
