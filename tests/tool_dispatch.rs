//! End-to-end tests: JSON-RPC lines in, JSON-RPC lines out, against a
//! scripted bridge standing in for the KDE Connect daemon.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use konnect::{
    config::Config,
    mcp::{McpServer, ToolContext, ToolRegistry, protocol::Response},
    services::{
        files::ReceivedFiles,
        kdeconnect::{
            Bridge, BusValue, Endpoint, KdeConnectError, KdeConnectService, RemoteFailure,
            plugins,
        },
    },
};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Daemon stand-in: fixed properties, plus media properties that follow the
/// selected player.
#[derive(Default)]
struct ScriptedBridge {
    properties: Mutex<HashMap<(String, String), BusValue>>,
    player_tracks: HashMap<String, (bool, String)>,
    replies: HashMap<(String, String), Vec<String>>,
    invoked: Mutex<Vec<String>>,
}

impl ScriptedBridge {
    fn property(self, endpoint: &Endpoint, name: &str, value: BusValue) -> Self {
        self.properties
            .lock()
            .unwrap()
            .insert((endpoint.path().to_string(), name.to_string()), value);
        self
    }

    fn reply(mut self, endpoint: &Endpoint, method: &str, items: &[&str]) -> Self {
        self.replies.insert(
            (endpoint.path().to_string(), method.to_string()),
            items.iter().map(|item| item.to_string()).collect(),
        );
        self
    }

    fn player(mut self, name: &str, is_playing: bool, title: &str) -> Self {
        self.player_tracks
            .insert(name.to_string(), (is_playing, title.to_string()));
        self
    }

    fn selected(&self, endpoint: &Endpoint) -> Option<String> {
        match self
            .properties
            .lock()
            .unwrap()
            .get(&(endpoint.path().to_string(), "player".to_string()))
        {
            Some(BusValue::Str(player)) => Some(player.clone()),
            _ => None,
        }
    }
}

fn not_found(endpoint: &Endpoint, member: &str) -> KdeConnectError {
    KdeConnectError::RemoteCall {
        path: endpoint.path().to_string(),
        member: member.to_string(),
        kind: RemoteFailure::ObjectNotFound,
        details: "no such object".to_string(),
    }
}

#[async_trait]
impl Bridge for ScriptedBridge {
    async fn get_property(
        &self,
        endpoint: &Endpoint,
        name: &str,
    ) -> Result<BusValue, KdeConnectError> {
        if endpoint.path().ends_with(plugins::MPRIS_REMOTE) && matches!(name, "isPlaying" | "title")
        {
            if let Some((is_playing, title)) = self
                .selected(endpoint)
                .and_then(|player| self.player_tracks.get(&player).cloned())
            {
                return Ok(match name {
                    "isPlaying" => BusValue::Bool(is_playing),
                    _ => BusValue::Str(title),
                });
            }
        }

        self.properties
            .lock()
            .unwrap()
            .get(&(endpoint.path().to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| not_found(endpoint, name))
    }

    async fn set_property(
        &self,
        endpoint: &Endpoint,
        name: &str,
        value: BusValue,
    ) -> Result<(), KdeConnectError> {
        self.properties
            .lock()
            .unwrap()
            .insert((endpoint.path().to_string(), name.to_string()), value);
        Ok(())
    }

    async fn invoke(
        &self,
        endpoint: &Endpoint,
        method: &str,
        _args: &[BusValue],
    ) -> Result<(), KdeConnectError> {
        self.invoked
            .lock()
            .unwrap()
            .push(format!("{}.{method}", endpoint.interface()));
        Ok(())
    }

    async fn invoke_for_strings(
        &self,
        endpoint: &Endpoint,
        method: &str,
        _args: &[BusValue],
    ) -> Result<Vec<String>, KdeConnectError> {
        self.replies
            .get(&(endpoint.path().to_string(), method.to_string()))
            .cloned()
            .ok_or_else(|| not_found(endpoint, method))
    }
}

fn phone() -> ScriptedBridge {
    let device = Endpoint::resolve("phone1", None);
    let remote = Endpoint::resolve("phone1", Some(plugins::MPRIS_REMOTE));

    ScriptedBridge::default()
        .reply(&Endpoint::daemon(), "devices", &["phone1"])
        .property(&device, "name", BusValue::from("Pixel"))
        .property(&device, "type", BusValue::from("smartphone"))
        .property(&device, "isPaired", BusValue::Bool(true))
        .property(&device, "isReachable", BusValue::Bool(true))
        .property(
            &remote,
            "playerList",
            BusValue::StrList(vec!["Podcasts".to_string(), "Spotify".to_string()]),
        )
        .property(&remote, "player", BusValue::from("Podcasts"))
        .property(&remote, "artist", BusValue::from(""))
        .player("Podcasts", false, "Episode 12")
        .player("Spotify", true, "Song")
}

fn server(bridge: Arc<ScriptedBridge>, home: &TempDir) -> McpServer {
    let kdeconnect = KdeConnectService::new(bridge, Duration::from_millis(1));
    let context = ToolContext::new(
        kdeconnect,
        ReceivedFiles::new(home.path()),
        &Config::default(),
    );
    McpServer::new(ToolRegistry::with_context(Arc::new(context)))
}

async fn exchange(server: &McpServer, requests: &[Value]) -> Vec<Response> {
    let input: String = requests
        .iter()
        .map(|request| format!("{request}\n"))
        .collect();
    let mut output = Vec::new();

    server.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: u64, tool: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": tool, "arguments": arguments },
    })
}

#[tokio::test]
async fn handshake_then_list_devices() {
    let home = TempDir::new().unwrap();
    let server = server(Arc::new(phone()), &home);

    let responses = exchange(
        &server,
        &[
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": { "protocolVersion": "2025-06-18", "capabilities": {} },
            }),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
            call(2, "list_devices", json!({})),
        ],
    )
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].id, json!(1));
    let devices = &responses[1].result.as_ref().unwrap()["structuredContent"];
    assert_eq!(devices["count"], 1);
    assert_eq!(devices["devices"][0]["name"], "Pixel");
    assert_eq!(devices["devices"][0]["type"], "smartphone");
}

#[tokio::test]
async fn detection_finds_the_playing_player_and_restores_selection() {
    let home = TempDir::new().unwrap();
    let bridge = Arc::new(phone());
    let server = server(bridge.clone(), &home);

    let responses = exchange(
        &server,
        &[call(1, "detect_active_player", json!({ "device_id": "phone1" }))],
    )
    .await;

    let result = &responses[0].result.as_ref().unwrap()["structuredContent"];
    assert_eq!(result["active_players"], json!(["Spotify"]));
    assert_eq!(result["original_player"], "Podcasts");
    assert_eq!(result["player_details"]["Podcasts"]["has_media"], true);
    assert_eq!(result["player_details"]["Podcasts"]["is_playing"], false);
    assert_eq!(
        bridge.selected(&Endpoint::resolve("phone1", Some(plugins::MPRIS_REMOTE))),
        Some("Podcasts".to_string())
    );
}

#[tokio::test]
async fn invalid_arguments_never_reach_the_daemon() {
    let home = TempDir::new().unwrap();
    let bridge = Arc::new(phone());
    let server = server(bridge.clone(), &home);

    let responses = exchange(
        &server,
        &[
            call(1, "share_url", json!({ "device_id": "phone1", "url": "mailto:a@b.c" })),
            call(2, "send_notification", json!({ "device_id": "phone1", "message": "" })),
            call(3, "media_control", json!({ "device_id": "phone1", "action": "Shuffle" })),
            call(4, "list_received_files", json!({ "device_id": "phone1", "limit": 500 })),
        ],
    )
    .await;

    for response in &responses {
        assert_eq!(response.result.as_ref().unwrap()["isError"], true);
    }
    assert!(bridge.invoked.lock().unwrap().is_empty());
}

#[tokio::test]
async fn commands_reach_the_right_plugins() {
    let home = TempDir::new().unwrap();
    let bridge = Arc::new(phone());
    let server = server(bridge.clone(), &home);

    exchange(
        &server,
        &[
            call(1, "ring_device", json!({ "device_id": "phone1" })),
            call(2, "media_control", json!({ "device_id": "phone1", "action": "Next" })),
            call(3, "share_url", json!({ "device_id": "phone1", "url": "https://kde.org" })),
        ],
    )
    .await;

    assert_eq!(
        *bridge.invoked.lock().unwrap(),
        vec![
            "org.kde.kdeconnect.device.findmyphone.ring",
            "org.kde.kdeconnect.device.mprisremote.sendAction",
            "org.kde.kdeconnect.device.share.shareUrl",
        ]
    );
}

#[tokio::test]
async fn daemon_failures_are_tool_errors() {
    let home = TempDir::new().unwrap();
    let server = server(Arc::new(phone()), &home);

    let responses = exchange(
        &server,
        &[call(1, "get_battery", json!({ "device_id": "phone1" }))],
    )
    .await;

    let result = responses[0].result.as_ref().unwrap();
    assert_eq!(result["isError"], true);
    assert!(
        result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("battery")
    );
}
