use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

/// A paired companion device as currently reported by the daemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    /// Stable device identifier
    pub id: String,
    /// User-visible device name
    pub name: String,
    /// Device category (phone, tablet, desktop, ...)
    #[serde(rename = "type")]
    pub device_type: String,
    /// Whether the device is paired with this host
    pub is_paired: bool,
    /// Whether the device is currently reachable
    pub is_reachable: bool,
}

/// Battery level and charging state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatteryStatus {
    /// Charge percentage
    pub charge: i64,
    /// Whether the device is plugged in
    pub is_charging: bool,
}

/// Playback commands understood by the media plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MediaAction {
    /// Start playback
    Play,
    /// Pause playback
    Pause,
    /// Toggle between playing and paused
    PlayPause,
    /// Skip to the next track
    Next,
    /// Go back to the previous track
    Previous,
    /// Stop playback
    Stop,
}

impl MediaAction {
    /// Action name as sent to the daemon
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Pause => "Pause",
            Self::PlayPause => "PlayPause",
            Self::Next => "Next",
            Self::Previous => "Previous",
            Self::Stop => "Stop",
        }
    }
}

impl fmt::Display for MediaAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media players available on a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaPlayers {
    /// Player names in the order reported by the device
    pub available_players: Vec<String>,
    /// Player currently selected for remote control, empty if none
    pub current_player: String,
    /// Number of available players
    pub count: usize,
}

/// Snapshot of the selected player's track and playback state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlaying {
    /// Track title
    pub title: String,
    /// Track artist
    pub artist: String,
    /// Album name
    pub album: String,
    /// Whether the player is playing
    pub is_playing: bool,
    /// Playback position in milliseconds
    pub position: i64,
    /// Track length in milliseconds
    pub length: i64,
    /// Player volume (0-100)
    pub volume: i64,
    /// Player names available on the device
    pub available_players: Vec<String>,
    /// Currently selected player
    pub current_player: String,
}

/// Outcome of a now-playing read; failures are reported inline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NowPlayingReport {
    /// All fields were read
    Playing(NowPlaying),
    /// Some read failed
    Failed {
        /// Description of the failure
        error: String,
    },
}

/// State of one player sampled during an active scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    /// Player name
    #[serde(skip)]
    pub player: String,
    /// Whether the player reported it is playing
    pub is_playing: bool,
    /// Whether a title or artist is present
    pub has_media: bool,
    /// Track title, may be empty
    pub title: String,
    /// Track artist, may be empty
    pub artist: String,
}

impl PlayerState {
    /// Builds a sample, deriving `has_media` from the metadata.
    pub fn sampled(player: &str, is_playing: bool, title: String, artist: String) -> Self {
        Self {
            player: player.to_string(),
            is_playing,
            has_media: !title.is_empty() || !artist.is_empty(),
            title,
            artist,
        }
    }

    /// A player is active only when it is playing something with metadata.
    pub fn is_active(&self) -> bool {
        self.is_playing && self.has_media
    }
}

/// Per-player outcome of an active scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlayerProbe {
    /// The player was switched to and sampled
    Sampled(PlayerState),
    /// Switching to or sampling the player failed
    Failed {
        /// Description of the failure
        error: String,
    },
}

/// Probe outcomes keyed by player name, in scan order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerDetails(Vec<(String, PlayerProbe)>);

impl PlayerDetails {
    /// Records the outcome for a player, replacing any earlier entry for the same name.
    pub fn insert(&mut self, player: &str, probe: PlayerProbe) {
        match self.0.iter_mut().find(|(name, _)| name == player) {
            Some(entry) => entry.1 = probe,
            None => self.0.push((player.to_string(), probe)),
        }
    }

    /// Looks up the outcome for a player
    pub fn get(&self, player: &str) -> Option<&PlayerProbe> {
        self.0
            .iter()
            .find(|(name, _)| name == player)
            .map(|(_, probe)| probe)
    }

    /// Player names in scan order
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// Number of recorded players
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for PlayerDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (player, probe) in &self.0 {
            map.serialize_entry(player, probe)?;
        }
        map.end()
    }
}

/// Result of scanning every player for active playback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    /// Players found playing with metadata, in scan order
    pub active_players: Vec<String>,
    /// Outcome for every scanned player
    pub player_details: PlayerDetails,
    /// Player selected before the scan, empty if none
    pub original_player: String,
}

/// A notification mirrored from the device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Notification identifier
    pub id: String,
    /// Posting application
    pub app_name: String,
    /// Notification title
    pub title: String,
    /// Notification body
    pub text: String,
    /// Ticker text
    pub ticker: String,
    /// Whether it can be dismissed from this host
    pub dismissable: bool,
    /// Whether an icon is attached
    pub has_icon: bool,
    /// Whether it was posted silently
    pub silent: bool,
    /// Reply identifier, empty when replies are not supported
    pub reply_id: String,
}

/// One entry of a notification listing; unreadable notifications are reported inline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NotificationEntry {
    /// All properties were read
    Available(Notification),
    /// Reading this notification failed
    Failed {
        /// Notification identifier
        id: String,
        /// Description of the failure
        error: String,
    },
}

impl NotificationEntry {
    /// Identifier of the notification
    pub fn id(&self) -> &str {
        match self {
            Self::Available(notification) => &notification.id,
            Self::Failed { id, .. } => id,
        }
    }
}
