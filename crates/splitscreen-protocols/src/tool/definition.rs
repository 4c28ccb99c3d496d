//! Tool definitions as advertised through `tools/list`.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::types::{Metadata, RiskLevel};

/// Static description of a tool.
///
/// `id` doubles as the MCP tool name; `name` is only for humans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters_schema: Option<Value>,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl ToolDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            parameters_schema: None,
            risk_level: RiskLevel::default(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_parameters_schema(mut self, schema: Value) -> Self {
        self.parameters_schema = Some(schema);
        self
    }

    pub fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    /// `tools/list` entry. Tools without a schema advertise an empty object.
    pub fn to_mcp_tool(&self) -> Value {
        let input_schema = self
            .parameters_schema
            .clone()
            .unwrap_or_else(|| json!({"type": "object", "properties": {}}));
        json!({
            "name": self.id,
            "description": self.description,
            "inputSchema": input_schema,
        })
    }
}
