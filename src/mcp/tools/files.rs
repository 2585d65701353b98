use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    config::MAX_FILE_LIMIT,
    mcp::{
        ToolContext, ToolError,
        types::{Tool, ToolMetadata, ToolResult, input_schema, parse_arguments},
    },
};


/// Arguments of `list_received_files`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListReceivedFilesInput {
    /// The unique identifier of the KDE Connect device
    pub device_id: String,
    /// Maximum number of files to return (1-100, default 10)
    #[schemars(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl ListReceivedFilesInput {
    fn limit(&self, default_limit: u32) -> Result<usize, ToolError> {
        let limit = self.limit.unwrap_or(i64::from(default_limit));
        if !(1..=i64::from(MAX_FILE_LIMIT)).contains(&limit) {
            return Err(ToolError::InvalidArguments(format!(
                "limit must be between 1 and {MAX_FILE_LIMIT}, got {limit}"
            )));
        }
        Ok(limit as usize)
    }
}

/// Arguments of `open_file`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct OpenFileInput {
    /// The absolute path to the file to open
    pub file_path: String,
}

/// Lists the newest files a device sent to this computer
pub struct ListReceivedFilesTool {
    context: Arc<ToolContext>,
}

impl ListReceivedFilesTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for ListReceivedFilesTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: ListReceivedFilesInput = parse_arguments(arguments)?;
        let limit = input.limit(self.context.default_limit)?;

        let listing = self.context.files.scan(&input.device_id, limit).await?;
        let count = listing.files.len();

        Ok(json!({
            "files": listing.files,
            "count": count,
            "download_directory": listing.download_directory.to_string_lossy(),
        }))
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "list_received_files".to_string(),
            description: "List files recently transferred from the device to this computer, \
                          newest first, with size and modification time."
                .to_string(),
            input_schema: input_schema::<ListReceivedFilesInput>(),
        }
    }
}

/// Opens a local file with the desktop's default application
pub struct OpenFileTool {
    context: Arc<ToolContext>,
}

impl OpenFileTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for OpenFileTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: OpenFileInput = parse_arguments(arguments)?;
        self.context.opener.open(Path::new(&input.file_path))?;

        Ok(json!({ "status": "opened", "file_path": input.file_path }))
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "open_file".to_string(),
            description: "Open a local file, typically one received from a device, with the \
                          default application for its type."
                .to_string(),
            input_schema: input_schema::<OpenFileInput>(),
        }
    }
}
