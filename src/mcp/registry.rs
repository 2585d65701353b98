use std::{collections::HashMap, sync::Arc};

use serde_json::Value;
use tracing::{info, instrument, warn};

use super::{
    ToolContext, tools,
    types::{Tool, ToolError, ToolMetadata, ToolResult},
};

/// Registry of the tools served to clients.
///
/// Tools are keyed by the name in their metadata and listed in registration
/// order, so `tools/list` is stable across runs.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Creates a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in tool.
    pub fn with_context(context: Arc<ToolContext>) -> Self {
        let mut registry = Self::new();
        tools::register_tools(&mut registry, context);
        registry
    }

    /// Registers a tool under the name from its metadata.
    ///
    /// A tool registered under an existing name replaces the previous one
    /// and keeps its position.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.metadata().name;
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    /// Metadata of every registered tool in registration order.
    pub fn list(&self) -> Vec<ToolMetadata> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.metadata())
            .collect()
    }

    /// Whether a tool is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Runs a tool by name.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::NotFound` if no tool has that name; other errors
    /// come from the tool itself.
    #[instrument(skip(self, arguments))]
    pub async fn call(&self, name: &str, arguments: Value) -> ToolResult {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        info!("Calling tool");
        let result = tool.call(arguments).await;
        if let Err(e) = &result {
            warn!("Tool failed: {e}");
        }

        result
    }
}
