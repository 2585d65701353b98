//! Model Context Protocol surface.
//!
//! Exposes the KDE Connect services as tools over JSON-RPC 2.0 on stdio.
//! Each tool validates its arguments before touching the bus and returns a
//! flat JSON object.

mod context;
pub mod protocol;
mod registry;
mod server;
pub mod tools;
mod types;

pub use context::ToolContext;
pub use registry::ToolRegistry;
pub use server::{McpServer, SUPPORTED_PROTOCOL_VERSIONS};
pub use types::{Tool, ToolError, ToolMetadata, ToolResult, input_schema, parse_arguments};
