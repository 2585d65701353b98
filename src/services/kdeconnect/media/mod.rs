/// Active player detection by switching through every player
pub mod probe;

use std::sync::Arc;

use tracing::{debug, instrument};

use super::{
    Bridge, BusValue, Endpoint, KdeConnectError, MediaAction, MediaPlayers, NowPlaying,
    NowPlayingReport, plugins,
};

pub use probe::{PlayerProber, PlayerSelectionGuard};

/// Passive reads and playback control through the `mprisremote` plugin.
///
/// Read failures on the player list and selection degrade to empty values:
/// a device without the plugin looks like a device without players.
#[derive(Clone)]
pub struct MediaRemote {
    bridge: Arc<dyn Bridge>,
}

impl MediaRemote {
    /// Creates the remote on top of the given bridge
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    pub(crate) fn endpoint(device_id: &str) -> Endpoint {
        Endpoint::resolve(device_id, Some(plugins::MPRIS_REMOTE))
    }

    /// Player names known to the device, empty on any failure
    pub async fn list_players(&self, device_id: &str) -> Vec<String> {
        let endpoint = Self::endpoint(device_id);
        let players = match self.bridge.get_property(&endpoint, "playerList").await {
            Ok(value) => value.into_string_list("playerList"),
            Err(e) => Err(e),
        };

        players.unwrap_or_else(|e| {
            debug!("No player list for {device_id}: {e}");
            Vec::new()
        })
    }

    /// Currently selected player, empty on any failure
    pub async fn current_player(&self, device_id: &str) -> String {
        let endpoint = Self::endpoint(device_id);
        let player = match self.bridge.get_property(&endpoint, "player").await {
            Ok(value) => value.into_string("player"),
            Err(e) => Err(e),
        };

        player.unwrap_or_else(|e| {
            debug!("No current player for {device_id}: {e}");
            String::new()
        })
    }

    /// Available players together with the current selection. Never fails.
    #[instrument(skip(self))]
    pub async fn players(&self, device_id: &str) -> MediaPlayers {
        let available_players = self.list_players(device_id).await;
        let current_player = self.current_player(device_id).await;

        MediaPlayers {
            count: available_players.len(),
            available_players,
            current_player,
        }
    }

    /// Selects the player that subsequent commands address.
    ///
    /// # Errors
    /// Returns error if the remote write fails
    #[instrument(skip(self))]
    pub async fn set_player(&self, device_id: &str, player: &str) -> Result<(), KdeConnectError> {
        self.bridge
            .set_property(&Self::endpoint(device_id), "player", BusValue::from(player))
            .await
    }

    /// Sends a playback command to the selected player.
    ///
    /// # Errors
    /// Returns error if the remote call fails
    #[instrument(skip(self))]
    pub async fn control(&self, device_id: &str, action: MediaAction) -> Result<(), KdeConnectError> {
        self.bridge
            .invoke(
                &Self::endpoint(device_id),
                "sendAction",
                &[BusValue::from(action.as_str())],
            )
            .await
    }

    /// Track and playback state of the selected player.
    ///
    /// Failures are captured in [`NowPlayingReport::Failed`] rather than returned.
    #[instrument(skip(self))]
    pub async fn now_playing(&self, device_id: &str) -> NowPlayingReport {
        match self.read_now_playing(device_id).await {
            Ok(now_playing) => NowPlayingReport::Playing(now_playing),
            Err(e) => {
                debug!("Failed to read now playing for {device_id}: {e}");
                NowPlayingReport::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn read_now_playing(&self, device_id: &str) -> Result<NowPlaying, KdeConnectError> {
        let endpoint = Self::endpoint(device_id);
        let available_players = self.list_players(device_id).await;
        let current_player = self.current_player(device_id).await;

        let title = self.string(&endpoint, "title").await?;
        let artist = self.string(&endpoint, "artist").await?;
        let album = self.string(&endpoint, "album").await?;
        let is_playing = self
            .bridge
            .get_property(&endpoint, "isPlaying")
            .await?
            .into_bool("isPlaying")?;
        let position = self.int(&endpoint, "position").await?;
        let length = self.int(&endpoint, "length").await?;
        let volume = self.int(&endpoint, "volume").await?;

        Ok(NowPlaying {
            title,
            artist,
            album,
            is_playing,
            position,
            length,
            volume,
            available_players,
            current_player,
        })
    }

    async fn string(&self, endpoint: &Endpoint, name: &str) -> Result<String, KdeConnectError> {
        self.bridge
            .get_property(endpoint, name)
            .await?
            .into_string(name)
    }

    async fn int(&self, endpoint: &Endpoint, name: &str) -> Result<i64, KdeConnectError> {
        self.bridge.get_property(endpoint, name).await?.into_int(name)
    }
}
