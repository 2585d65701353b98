use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, instrument, warn};

use super::{
    ToolError, ToolRegistry,
    protocol::{
        INVALID_PARAMS, METHOD_NOT_FOUND, Request, Response, RpcError, parse_request,
    },
};

/// Protocol revisions this server can speak, newest first
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

const SERVER_NAME: &str = "konnect";

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Model Context Protocol server over newline-delimited JSON-RPC.
///
/// Requests are handled one at a time in arrival order, so tools never run
/// concurrently against the same device.
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    /// Serves the tools in `registry`
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Tools served by this server
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serves requests from stdin until it is closed.
    ///
    /// # Errors
    /// Returns error if reading stdin or writing stdout fails
    pub async fn serve_stdio(&self) -> io::Result<()> {
        self.serve(BufReader::new(io::stdin()), io::stdout()).await
    }

    /// Serves requests line by line from `reader`, writing responses to `writer`.
    ///
    /// Blank lines are skipped; the loop ends at end of input.
    ///
    /// # Errors
    /// Returns error if reading or writing fails
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Serving tools over stdio");
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut encoded = serde_json::to_vec(&response)?;
                encoded.push(b'\n');
                writer.write_all(&encoded).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handles one raw input line, returning the response to send if any.
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        match parse_request(line) {
            Ok(request) => self.handle(request).await,
            Err(response) => {
                warn!("Rejected malformed message");
                Some(response)
            }
        }
    }

    /// Dispatches a parsed request. Notifications yield no response.
    #[instrument(skip(self, request), fields(method = %request.method))]
    pub async fn handle(&self, request: Request) -> Option<Response> {
        let Some(id) = request.id.clone() else {
            debug!("Received notification");
            return None;
        };

        let outcome = match request.method.as_str() {
            "initialize" => Ok(initialize(&request.params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.list() })),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            )),
        };

        Some(match outcome {
            Ok(result) => Response::success(id, result),
            Err(error) => Response::failure(id, error),
        })
    }

    async fn call_tool(&self, params: Value) -> Result<Value, RpcError> {
        let params: CallParams = serde_json::from_value(params)
            .map_err(|e| RpcError::new(INVALID_PARAMS, e.to_string()))?;

        match self.registry.call(&params.name, params.arguments).await {
            Ok(result) => Ok(tool_success(result)),
            Err(ToolError::NotFound(name)) => Err(RpcError::new(
                INVALID_PARAMS,
                format!("Unknown tool: {name}"),
            )),
            Err(e) => Ok(tool_failure(&e)),
        }
    }
}

fn initialize(params: &Value) -> Value {
    let requested = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let protocol_version = SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .find(|version| **version == requested)
        .unwrap_or(&SUPPORTED_PROTOCOL_VERSIONS[0]);

    json!({
        "protocolVersion": protocol_version,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
    })
}

fn tool_success(result: Value) -> Value {
    let text = serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string());

    json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": result,
        "isError": false,
    })
}

fn tool_failure(error: &ToolError) -> Value {
    json!({
        "content": [{ "type": "text", "text": error.to_string() }],
        "isError": true,
    })
}
