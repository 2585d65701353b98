use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::DeviceIdInput;
use crate::{
    mcp::{
        ToolContext,
        types::{Tool, ToolMetadata, ToolResult, input_schema, parse_arguments, to_result},
    },
    services::kdeconnect::MediaAction,
};

/// Arguments of `media_control`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MediaControlInput {
    /// The unique identifier of the KDE Connect device
    pub device_id: String,
    /// Media control action to perform
    pub action: MediaAction,
}

/// Arguments of `set_media_player`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetMediaPlayerInput {
    /// The unique identifier of the KDE Connect device
    pub device_id: String,
    /// The name of the media player to activate (e.g. 'YouTube', 'Spotify', 'VLC')
    pub player: String,
}

/// Reports what the selected player is playing
pub struct GetNowPlayingTool {
    context: Arc<ToolContext>,
}

impl GetNowPlayingTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for GetNowPlayingTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: DeviceIdInput = parse_arguments(arguments)?;
        let report = self
            .context
            .kdeconnect
            .media
            .now_playing(&input.device_id)
            .await;

        to_result(&report)
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "get_now_playing".to_string(),
            description: "Get the track title, artist, album, playback state, position, \
                          length and volume of the selected media player, plus the \
                          available players. Failures are reported in an `error` field."
                .to_string(),
            input_schema: input_schema::<DeviceIdInput>(),
        }
    }
}

/// Sends a playback command to the selected player
pub struct MediaControlTool {
    context: Arc<ToolContext>,
}

impl MediaControlTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for MediaControlTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: MediaControlInput = parse_arguments(arguments)?;
        self.context
            .kdeconnect
            .media
            .control(&input.device_id, input.action)
            .await?;

        Ok(json!({ "status": "success", "action": input.action.as_str() }))
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "media_control".to_string(),
            description: "Control playback on the selected media player: Play, Pause, \
                          PlayPause, Next, Previous or Stop."
                .to_string(),
            input_schema: input_schema::<MediaControlInput>(),
        }
    }
}

/// Lists the media players on a device
pub struct GetMediaPlayersTool {
    context: Arc<ToolContext>,
}

impl GetMediaPlayersTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for GetMediaPlayersTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: DeviceIdInput = parse_arguments(arguments)?;
        let players = self
            .context
            .kdeconnect
            .media
            .players(&input.device_id)
            .await;

        to_result(&players)
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "get_media_players".to_string(),
            description: "List the media players on a device that can be remote controlled, \
                          and which one is currently selected."
                .to_string(),
            input_schema: input_schema::<DeviceIdInput>(),
        }
    }
}

/// Selects the player that later media commands address
pub struct SetMediaPlayerTool {
    context: Arc<ToolContext>,
}

impl SetMediaPlayerTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for SetMediaPlayerTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: SetMediaPlayerInput = parse_arguments(arguments)?;
        self.context
            .kdeconnect
            .media
            .set_player(&input.device_id, &input.player)
            .await?;

        Ok(json!({ "status": "player_set", "player": input.player }))
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "set_media_player".to_string(),
            description: "Select the media player that media_control and get_now_playing \
                          address. Needed when several players are running."
                .to_string(),
            input_schema: input_schema::<SetMediaPlayerInput>(),
        }
    }
}

/// Scans every player to find the ones actually playing
pub struct DetectActivePlayerTool {
    context: Arc<ToolContext>,
}

impl DetectActivePlayerTool {
    /// Creates the tool
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for DetectActivePlayerTool {
    async fn call(&self, arguments: Value) -> ToolResult {
        let input: DeviceIdInput = parse_arguments(arguments)?;
        let result = self
            .context
            .kdeconnect
            .prober
            .detect_active_player(&input.device_id)
            .await;

        to_result(&result)
    }

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "detect_active_player".to_string(),
            description: "Find which media players are playing by briefly selecting each \
                          one in turn. The previously selected player is restored afterwards."
                .to_string(),
            input_schema: input_schema::<DeviceIdInput>(),
        }
    }
}
