use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::mcp::{
    ToolContext, ToolError,
    types::{Tool, ToolMetadata, ToolResult, input_schema, parse_arguments},
};

const URL_PATTERN: &str = r"^https?://.+";

fn url_pattern() -> Result<&'static Regex, ToolError> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

    PATTERN
        .get_or_init(|| Regex::new(URL_PATTERN))
        .as_ref()
        .map_err(|e| ToolError::InvalidArguments(format!("URL pattern unusable: {e}")))
}

/// Arguments of `share_url`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ShareUrlInput {
    /// The unique identifier of the KDE Connect device
    pub device_id: String,
    /// The http or https URL to share with the device
    #[schemars(pattern(r"^https?://.+"))]
    pub url: String,
}

impl ShareUrlInput {
    fn validate(&self) -> Result<(), ToolError> {
        if !url_pattern()?.is_match(&self.url) {
            return Err(ToolError::InvalidArguments(format!(
                "url '{}' must start with http:// or https://",
                self.url
            )));
        }
        Ok(())
    }
}

/// Arguments of `share_file`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ShareFileInput {
    /// The unique identifier of the KDE Connect device
    pub device_id: String,
    /// The absolute path to the file to share (e.g. /home/user/document.pdf)
    pub file_path: String,
}

/// Opens a URL on the device
pub struct ShareUrlTool {
    context: Arc<ToolContext>,
}

impl ShareUrlTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for ShareUrlTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: ShareUrlInput = parse_arguments(arguments)?;
        input.validate()?;

        self.context
            .kdeconnect
            .share
            .share_url(&input.device_id, &input.url)
            .await?;

        Ok(json!({ "status": "shared", "url": input.url }))
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "share_url".to_string(),
            description: "Send a URL to the device, which usually opens it in its default \
                          browser."
                .to_string(),
            input_schema: input_schema::<ShareUrlInput>(),
        }
    }
}

/// Transfers a local file to the device
pub struct ShareFileTool {
    context: Arc<ToolContext>,
}

impl ShareFileTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for ShareFileTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: ShareFileInput = parse_arguments(arguments)?;
        self.context
            .kdeconnect
            .share
            .share_file(&input.device_id, &input.file_path)
            .await?;

        Ok(json!({ "status": "shared", "file": input.file_path }))
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "share_file".to_string(),
            description: "Transfer a file from this computer to the device, where it is saved \
                          to the configured download location."
                .to_string(),
            input_schema: input_schema::<ShareFileInput>(),
        }
    }
}
