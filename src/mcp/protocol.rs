//! JSON-RPC 2.0 framing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version string every message carries
pub const JSONRPC_VERSION: &str = "2.0";

/// Invalid JSON was received
pub const PARSE_ERROR: i64 = -32700;
/// The JSON is not a valid request object
pub const INVALID_REQUEST: i64 = -32600;
/// The method does not exist
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Invalid method parameters, including unknown tool names
pub const INVALID_PARAMS: i64 = -32602;

/// An incoming request or notification.
///
/// Requests without an `id` are notifications and never get a response.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Protocol version, must be `"2.0"`
    pub jsonrpc: String,
    /// Correlation id echoed in the response
    #[serde(default)]
    pub id: Option<Value>,
    /// Method name
    pub method: String,
    /// Method parameters
    #[serde(default)]
    pub params: Value,
}

impl Request {
    /// Whether the sender expects no response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Error object of a failed response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code
    pub code: i64,
    /// Short description
    pub message: String,
    /// Extra detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// Creates an error without extra data
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// An outgoing response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Protocol version
    pub jsonrpc: String,
    /// Id of the request being answered, `null` if it could not be read
    pub id: Value,
    /// Result on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    /// Successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Failed response
    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Reads one request from a line of input.
///
/// # Errors
///
/// Returns the response to send back when the line is not JSON
/// (`PARSE_ERROR`) or not a request object (`INVALID_REQUEST`).
pub fn parse_request(line: &str) -> Result<Request, Response> {
    let value: Value = serde_json::from_str(line)
        .map_err(|e| Response::failure(Value::Null, RpcError::new(PARSE_ERROR, e.to_string())))?;

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: Request = serde_json::from_value(value)
        .map_err(|e| Response::failure(id.clone(), RpcError::new(INVALID_REQUEST, e.to_string())))?;

    if request.jsonrpc != JSONRPC_VERSION {
        return Err(Response::failure(
            id,
            RpcError::new(
                INVALID_REQUEST,
                format!("unsupported jsonrpc version '{}'", request.jsonrpc),
            ),
        ));
    }

    Ok(request)
}
