//! Stdio MCP server: one JSON-RPC message per line in, one response per line out.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use splitscreen_config::ServerConfig;
use splitscreen_core::Kernel;
use splitscreen_protocols::tool::{ToolContext, ToolResult};

use crate::protocol::{
    CallToolParams, InitializeResult, JSONRPC_VERSION, McpError, McpRequest, McpResponse,
    ServerCapabilities, ServerInfo, ToolsCapability, methods,
};

pub(crate) struct McpServer {
    kernel: Arc<Kernel>,
    name: String,
    protocol_version: String,
    session_id: String,
}

impl McpServer {
    pub fn new(kernel: Arc<Kernel>, config: &ServerConfig) -> Self {
        Self {
            kernel,
            name: config.name.clone(),
            protocol_version: config.protocol_version.clone(),
            session_id: format!("stdio-{}", std::process::id()),
        }
    }

    /// Serve until `reader` reaches EOF.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("MCP server {} listening on stdio", self.name);
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(trimmed).await {
                let mut json = serde_json::to_string(&response).map_err(std::io::Error::other)?;
                json.push('\n');
                writer.write_all(json.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("stdin closed, MCP server stopping");
        Ok(())
    }

    /// Handle one raw line. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => return Some(McpResponse::error(Value::Null, McpError::parse_error(e))),
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<McpRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(McpResponse::error(
                id,
                McpError::invalid_request(format!("Invalid request: {}", e)),
            )),
        }
    }

    pub async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        let Some(id) = request.id.clone() else {
            debug!("Notification: {}", request.method);
            return None;
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(McpResponse::error(
                id,
                McpError::invalid_request(format!("Unsupported jsonrpc version: {}", request.jsonrpc)),
            ));
        }

        debug!("Request {}: {}", id, request.method);
        let result = match request.method.as_str() {
            methods::INITIALIZE => self.initialize(),
            methods::PING => Ok(serde_json::json!({})),
            methods::LIST_TOOLS => Ok(self.list_tools()),
            methods::CALL_TOOL => self.call_tool(request.params).await,
            // A client sending this with an id still gets an ack.
            methods::INITIALIZED => Ok(serde_json::json!({})),
            other => Err(McpError::method_not_found(other)),
        };

        Some(match result {
            Ok(value) => McpResponse::success(id, value),
            Err(error) => McpResponse::error(id, error),
        })
    }

    fn initialize(&self) -> Result<Value, McpError> {
        let result = InitializeResult {
            protocol_version: self.protocol_version.clone(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };
        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .kernel
            .tool_registry()
            .list()
            .iter()
            .map(|def| def.to_mcp_tool())
            .collect();
        serde_json::json!({ "tools": tools })
    }

    /// Unknown tools and bad arguments are protocol errors. Failures while
    /// running a tool come back as an `isError` result.
    async fn call_tool(&self, params: Value) -> Result<Value, McpError> {
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| McpError::invalid_params(format!("Invalid tools/call params: {}", e)))?;
        let arguments = params.arguments.unwrap_or_else(|| serde_json::json!({}));
        let ctx = ToolContext::new(self.session_id.clone(), self.kernel.work_dir().clone());

        match self.kernel.call_tool(&params.name, arguments, ctx).await {
            Ok(result) => Ok(result.to_mcp_content()),
            Err(e) if e.rpc_code() == McpError::INTERNAL_ERROR => {
                warn!("Tool {} failed: {}", params.name, e);
                Ok(ToolResult::error(e.to_string()).to_mcp_content())
            }
            Err(e) => Err(McpError::new(e.rpc_code(), e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
