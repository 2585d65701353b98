//! Built-in tools, one struct per tool.

mod devices;
mod files;
mod media;
mod messaging;
mod sharing;

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;

use super::{ToolContext, ToolRegistry};

pub use devices::{GetBatteryTool, ListDevicesTool, RingDeviceTool};
pub use files::{ListReceivedFilesTool, OpenFileTool};
pub use media::{
    DetectActivePlayerTool, GetMediaPlayersTool, GetNowPlayingTool, MediaControlTool,
    SetMediaPlayerTool,
};
pub use messaging::{GetNotificationsTool, SendNotificationTool};
pub use sharing::{ShareFileTool, ShareUrlTool};

/// Arguments of tools that only address a device
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeviceIdInput {
    /// The unique identifier of the KDE Connect device (use list_devices to find device IDs)
    pub device_id: String,
}

/// Registers every built-in tool.
pub fn register_tools(registry: &mut ToolRegistry, context: Arc<ToolContext>) {
    registry.register(Box::new(ListDevicesTool::new(context.clone())));
    registry.register(Box::new(GetBatteryTool::new(context.clone())));
    registry.register(Box::new(GetNowPlayingTool::new(context.clone())));
    registry.register(Box::new(MediaControlTool::new(context.clone())));
    registry.register(Box::new(SendNotificationTool::new(context.clone())));
    registry.register(Box::new(ShareUrlTool::new(context.clone())));
    registry.register(Box::new(ShareFileTool::new(context.clone())));
    registry.register(Box::new(RingDeviceTool::new(context.clone())));
    registry.register(Box::new(GetMediaPlayersTool::new(context.clone())));
    registry.register(Box::new(SetMediaPlayerTool::new(context.clone())));
    registry.register(Box::new(DetectActivePlayerTool::new(context.clone())));
    registry.register(Box::new(GetNotificationsTool::new(context.clone())));
    registry.register(Box::new(ListReceivedFilesTool::new(context.clone())));
    registry.register(Box::new(OpenFileTool::new(context)));
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::test_support;
    use crate::services::kdeconnect::testing::FakeBridge;

    #[test]
    fn registers_every_tool_in_order() {
        let home = TempDir::new().unwrap();
        let registry = test_support::registry(Arc::new(FakeBridge::new()), home.path());

        let names: Vec<String> = registry.list().into_iter().map(|tool| tool.name).collect();

        assert_eq!(
            names,
            vec![
                "list_devices",
                "get_battery",
                "get_now_playing",
                "media_control",
                "send_notification",
                "share_url",
                "share_file",
                "ring_device",
                "get_media_players",
                "set_media_player",
                "detect_active_player",
                "get_notifications",
                "list_received_files",
                "open_file",
            ]
        );
    }

    #[test]
    fn schemas_describe_objects() {
        let home = TempDir::new().unwrap();
        let registry = test_support::registry(Arc::new(FakeBridge::new()), home.path());

        for tool in registry.list() {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            assert!(!tool.description.is_empty());
        }
    }

    #[test]
    fn device_tools_require_device_id() {
        let home = TempDir::new().unwrap();
        let registry = test_support::registry(Arc::new(FakeBridge::new()), home.path());

        let battery = registry
            .list()
            .into_iter()
            .find(|tool| tool.name == "get_battery")
            .unwrap();

        assert_eq!(battery.input_schema["required"][0], "device_id");
    }
}
