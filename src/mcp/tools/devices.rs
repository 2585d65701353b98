use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde_json::{Value, json};

use super::DeviceIdInput;
use crate::mcp::{
    ToolContext,
    types::{Tool, ToolMetadata, ToolResult, input_schema, parse_arguments, to_result},
};

/// `list_devices` takes no arguments
#[derive(Debug, JsonSchema)]
pub struct NoInput {}

/// Lists paired, reachable devices with their descriptions
pub struct ListDevicesTool {
    context: Arc<ToolContext>,
}

impl ListDevicesTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for ListDevicesTool {
    async fn call(&self, _arguments: Value) -> ToolResult {
        let devices = self
            .context
            .kdeconnect
            .devices
            .list_described(true, true)
            .await?;
        let count = devices.len();

        Ok(json!({
            "devices": devices,
            "count": count,
        }))
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "list_devices".to_string(),
            description: "List all paired and reachable KDE Connect devices with their IDs, \
                          names, types and connection status. A device whose details cannot \
                          be read is listed with an error instead."
                .to_string(),
            input_schema: input_schema::<NoInput>(),
        }
    }
}

/// Reads battery charge and charging state
pub struct GetBatteryTool {
    context: Arc<ToolContext>,
}

impl GetBatteryTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for GetBatteryTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: DeviceIdInput = parse_arguments(arguments)?;
        let status = self
            .context
            .kdeconnect
            .battery
            .status(&input.device_id)
            .await?;

        to_result(&status)
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "get_battery".to_string(),
            description: "Get the battery charge percentage and charging status of a device."
                .to_string(),
            input_schema: input_schema::<DeviceIdInput>(),
        }
    }
}

/// Makes the device ring
pub struct RingDeviceTool {
    context: Arc<ToolContext>,
}

impl RingDeviceTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for RingDeviceTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: DeviceIdInput = parse_arguments(arguments)?;
        self.context
            .kdeconnect
            .find_my_phone
            .ring(&input.device_id)
            .await?;

        Ok(json!({ "status": "ringing" }))
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "ring_device".to_string(),
            description: "Make a device ring at full volume, even when silenced, to help \
                          locate it."
                .to_string(),
            input_schema: input_schema::<DeviceIdInput>(),
        }
    }
}
