//! The `Tool` trait.

use async_trait::async_trait;
use serde_json::Value;

use super::{ToolContext, ToolDefinition, ToolResult};
use crate::error::ToolError;
use crate::types::RiskLevel;

/// Something an MCP client can call by name.
///
/// The kernel calls [`Tool::validate`] before [`Tool::execute`], so `execute`
/// may assume the arguments are an object carrying every `required` key of
/// the parameter schema. Value types are still the tool's problem.
#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    async fn execute(&self, params: Value, ctx: ToolContext) -> Result<ToolResult, ToolError>;

    /// Shallow check of `params` against the declared schema.
    fn validate(&self, params: &Value) -> Result<(), ToolError> {
        let Some(schema) = &self.definition().parameters_schema else {
            return Ok(());
        };
        if schema.get("type").and_then(Value::as_str) != Some("object") {
            return Ok(());
        }

        let Some(args) = params.as_object() else {
            return Err(ToolError::ValidationFailed(
                "Parameters must be an object".to_string(),
            ));
        };

        let missing: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .filter(|key| !args.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(ToolError::ValidationFailed(format!(
                "Missing required parameter(s): {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    fn risk_level(&self) -> RiskLevel {
        self.definition().risk_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    struct SchemaTool {
        definition: ToolDefinition,
    }

    impl SchemaTool {
        fn new(schema: Option<Value>) -> Self {
            let mut definition = ToolDefinition::new("schema_tool", "Schema Tool", "Echoes nothing");
            if let Some(schema) = schema {
                definition = definition.with_parameters_schema(schema);
            }
            Self { definition }
        }

        fn action_required() -> Self {
            Self::new(Some(json!({
                "type": "object",
                "properties": {"action": {"type": "string"}, "dry_run": {"type": "boolean"}},
                "required": ["action"]
            })))
        }
    }

    #[async_trait]
    impl Tool for SchemaTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(&self, _params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::success("done"))
        }
    }

    #[test]
    fn test_validate_accepts_required_present() {
        let tool = SchemaTool::action_required();
        assert!(tool.validate(&json!({"action": "maximize"})).is_ok());
        assert!(tool.validate(&json!({"action": "maximize", "dry_run": true})).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_object() {
        let tool = SchemaTool::action_required();
        for bad in [json!("maximize"), Value::Null, json!([1, 2])] {
            match tool.validate(&bad) {
                Err(ToolError::ValidationFailed(msg)) => assert!(msg.contains("must be an object")),
                other => panic!("expected ValidationFailed, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_names_missing_keys() {
        let tool = SchemaTool::action_required();
        match tool.validate(&json!({"dry_run": true})) {
            Err(ToolError::ValidationFailed(msg)) => assert!(msg.ends_with("action")),
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_without_schema_accepts_anything() {
        let tool = SchemaTool::new(None);
        assert!(tool.validate(&json!("anything")).is_ok());
    }

    #[tokio::test]
    async fn test_execute_and_risk_level() {
        let tool = SchemaTool::new(None);
        assert_eq!(tool.risk_level(), RiskLevel::Low);

        let ctx = ToolContext::new("session-1", PathBuf::from("/tmp"));
        let result = tool.execute(json!({}), ctx).await.unwrap();
        assert_eq!(result.content, "done");
    }
}
