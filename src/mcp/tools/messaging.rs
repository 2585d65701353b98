use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::DeviceIdInput;
use crate::mcp::{
    ToolContext, ToolError,
    types::{Tool, ToolMetadata, ToolResult, input_schema, parse_arguments},
};

const MAX_MESSAGE_CHARS: usize = 500;

/// Arguments of `send_notification`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SendNotificationInput {
    /// The unique identifier of the KDE Connect device
    pub device_id: String,
    /// The notification message to send
    #[schemars(length(min = 1, max = 500))]
    pub message: String,
}

impl SendNotificationInput {
    fn validate(&self) -> Result<(), ToolError> {
        let length = self.message.chars().count();
        if length == 0 || length > MAX_MESSAGE_CHARS {
            return Err(ToolError::InvalidArguments(format!(
                "message must be 1 to {MAX_MESSAGE_CHARS} characters, got {length}"
            )));
        }
        Ok(())
    }
}

/// Shows a message on the device through the ping plugin
pub struct SendNotificationTool {
    context: Arc<ToolContext>,
}

impl SendNotificationTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for SendNotificationTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: SendNotificationInput = parse_arguments(arguments)?;
        input.validate()?;

        self.context
            .kdeconnect
            .ping
            .send(&input.device_id, Some(&input.message))
            .await?;

        Ok(json!({ "status": "sent", "message": input.message }))
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "send_notification".to_string(),
            description: "Display a short message on the device, for reminders, alerts or \
                          quick notes."
                .to_string(),
            input_schema: input_schema::<SendNotificationInput>(),
        }
    }
}

/// Reads the notifications currently shown on the device
pub struct GetNotificationsTool {
    context: Arc<ToolContext>,
}

impl GetNotificationsTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for GetNotificationsTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: DeviceIdInput = parse_arguments(arguments)?;
        let notifications = self
            .context
            .kdeconnect
            .notifications
            .list(&input.device_id)
            .await?;
        let count = notifications.len();

        Ok(json!({
            "notifications": notifications,
            "count": count,
        }))
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "get_notifications".to_string(),
            description: "Get the notifications currently active on a device with app name, \
                          title, text and flags. Unreadable notifications are listed with an \
                          error."
                .to_string(),
            input_schema: input_schema::<DeviceIdInput>(),
        }
    }
}
