use serde_json::Value;
use tracing::info;

use super::formatting::{format_command, format_description, format_header};
use crate::{
    KonnectError, Result,
    mcp::{McpServer, ToolError, ToolRegistry},
};

/// Runs the protocol server until stdin closes.
///
/// # Errors
/// Returns error if stdio fails
pub async fn serve(registry: ToolRegistry) -> Result<()> {
    info!("Starting Konnect server");
    McpServer::new(registry).serve_stdio().await?;
    Ok(())
}

/// Renders the tool list for the terminal.
pub fn list_tools(registry: &ToolRegistry) -> String {
    let mut output = format_header("Available tools");
    output.push('\n');

    for tool in registry.list() {
        output.push_str(&format!(
            "\n  {}\n    {}\n",
            format_command(&tool.name),
            format_description(&tool.description)
        ));
    }

    output
}

/// Calls one tool and renders its result as pretty JSON.
///
/// # Errors
/// Returns `InvalidArguments` if `arguments` is not a JSON object, and the
/// tool's own error otherwise
pub async fn call_tool(
    registry: &ToolRegistry,
    tool: &str,
    arguments: Option<&str>,
) -> Result<String> {
    let arguments = match arguments {
        Some(raw) => {
            let parsed: Value = serde_json::from_str(raw)
                .map_err(|e| KonnectError::InvalidArguments(e.to_string()))?;
            if !parsed.is_object() {
                return Err(KonnectError::InvalidArguments(
                    "arguments must be a JSON object".to_string(),
                ));
            }
            parsed
        }
        None => Value::Object(Default::default()),
    };

    let result = registry.call(tool, arguments).await?;

    serde_json::to_string_pretty(&result).map_err(|e| ToolError::from(e).into())
}
