use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::services::{files::FileError, kdeconnect::KdeConnectError};

/// Errors that can occur while dispatching or running a tool.
///
/// Only `NotFound` is a protocol error; every other variant is reported to
/// the client as a tool result flagged with `isError`.
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool is registered under the requested name.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Arguments are missing, mistyped or out of range.
    ///
    /// Raised before any bus call or filesystem access is made.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The KDE Connect daemon rejected or failed the request.
    #[error(transparent)]
    Service(#[from] KdeConnectError),

    /// A local file operation failed.
    #[error(transparent)]
    File(#[from] FileError),

    /// The result could not be encoded as JSON.
    #[error("failed to encode result: {0}")]
    Output(#[from] serde_json::Error),
}

/// Type alias for tool execution results.
///
/// Successful tools return a JSON object that is handed to the client as is.
pub type ToolResult = Result<Value, ToolError>;

/// Everything a client needs to discover and call a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolMetadata {
    /// Tool name used in `tools/call`
    pub name: String,

    /// What the tool does, shown to the model choosing tools
    pub description: String,

    /// JSON schema of the arguments object
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Trait implemented by every tool exposed over the protocol.
///
/// Tools receive their dependencies through their constructors and parse
/// their own arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Runs the tool with the raw `arguments` object from the request.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InvalidArguments` when the arguments do not
    /// validate, and service or file errors when the operation fails.
    async fn call(&self, arguments: Value) -> ToolResult;

    /// Returns the name, description and input schema of this tool.
    fn metadata(&self) -> ToolMetadata;
}

/// JSON schema for an argument struct, as sent in `tools/list`.
pub fn input_schema<T: JsonSchema>() -> Value {
    schemars::schema_for!(T).to_value()
}

/// Deserializes tool arguments into their typed form.
///
/// A missing or `null` arguments object is treated as `{}`.
///
/// # Errors
///
/// Returns `ToolError::InvalidArguments` describing the first field that
/// does not match.
pub fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };

    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Serializes a tool's typed output into the JSON returned to the client.
///
/// # Errors
///
/// Returns `ToolError::Output` if the value cannot be represented as JSON.
pub fn to_result<T: Serialize>(output: &T) -> ToolResult {
    Ok(serde_json::to_value(output)?)
}
