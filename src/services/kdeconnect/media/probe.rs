use std::{sync::Arc, time::Duration};

use tokio::runtime::Handle;
use tracing::{debug, instrument, warn};

use super::MediaRemote;
use crate::services::kdeconnect::{
    Bridge, BusValue, Endpoint, KdeConnectError, PlayerDetails, PlayerProbe, PlayerState,
    ProbeResult,
};

/// Wait after switching players before sampling derived state
pub const DEFAULT_SETTLE_INTERVAL: Duration = Duration::from_millis(300);

/// Finds the players that are actually playing by selecting each in turn.
///
/// The scan mutates the device's player selection. It is restored when the
/// scan finishes and, best effort, when the scan future is dropped early.
/// Two scans against the same device must not run concurrently.
#[derive(Clone)]
pub struct PlayerProber {
    bridge: Arc<dyn Bridge>,
    settle_interval: Duration,
}

impl PlayerProber {
    /// Creates a prober with the given settle interval
    pub fn new(bridge: Arc<dyn Bridge>, settle_interval: Duration) -> Self {
        Self {
            bridge,
            settle_interval,
        }
    }

    /// Wait applied after each player switch
    pub fn settle_interval(&self) -> Duration {
        self.settle_interval
    }

    /// Scans every player on the device.
    ///
    /// A player counts as active when it reports playing and has a title or
    /// artist. Per-player failures are recorded in the details and never
    /// abort the scan.
    #[instrument(skip(self))]
    pub async fn detect_active_player(&self, device_id: &str) -> ProbeResult {
        let remote = MediaRemote::new(self.bridge.clone());
        let original_player = remote.current_player(device_id).await;
        let players = remote.list_players(device_id).await;
        let endpoint = MediaRemote::endpoint(device_id);

        let selection =
            PlayerSelectionGuard::acquire(self.bridge.clone(), endpoint.clone(), &original_player);

        let mut active_players = Vec::new();
        let mut player_details = PlayerDetails::default();

        for player in &players {
            match self.probe(&endpoint, player).await {
                Ok(state) => {
                    debug!(
                        player = %player,
                        is_playing = state.is_playing,
                        has_media = state.has_media,
                        "Sampled player"
                    );
                    if state.is_active() {
                        active_players.push(player.clone());
                    }
                    player_details.insert(player, PlayerProbe::Sampled(state));
                }
                Err(e) => {
                    debug!(player = %player, "Probe failed: {e}");
                    player_details.insert(
                        player,
                        PlayerProbe::Failed {
                            error: e.to_string(),
                        },
                    );
                }
            }
        }

        selection.restore().await;

        ProbeResult {
            active_players,
            player_details,
            original_player,
        }
    }

    async fn probe(&self, endpoint: &Endpoint, player: &str) -> Result<PlayerState, KdeConnectError> {
        self.bridge
            .set_property(endpoint, "player", BusValue::from(player))
            .await?;

        tokio::time::sleep(self.settle_interval).await;

        let is_playing = self
            .bridge
            .get_property(endpoint, "isPlaying")
            .await?
            .into_bool("isPlaying")?;
        let title = self
            .bridge
            .get_property(endpoint, "title")
            .await?
            .into_string("title")?;
        let artist = self
            .bridge
            .get_property(endpoint, "artist")
            .await?
            .into_string("artist")?;

        Ok(PlayerState::sampled(player, is_playing, title, artist))
    }
}

/// Scoped hold on a device's player selection.
///
/// [`PlayerSelectionGuard::restore`] writes the original selection back.
/// Dropping the guard without restoring (for example when the owning future
/// is cancelled) spawns the restore on the current tokio runtime instead.
/// Nothing is restored when there was no original selection.
pub struct PlayerSelectionGuard {
    bridge: Arc<dyn Bridge>,
    endpoint: Endpoint,
    original: Option<String>,
}

impl PlayerSelectionGuard {
    /// Takes responsibility for restoring `original` on `endpoint`.
    pub fn acquire(bridge: Arc<dyn Bridge>, endpoint: Endpoint, original: &str) -> Self {
        Self {
            bridge,
            endpoint,
            original: (!original.is_empty()).then(|| original.to_string()),
        }
    }

    /// Restores the original selection. Failures are logged and swallowed.
    ///
    /// The guard stays armed until the write completes, so cancelling this
    /// future still leaves the restore to `Drop`.
    pub async fn restore(mut self) {
        if let Some(original) = self.original.clone() {
            restore_selection(self.bridge.as_ref(), &self.endpoint, original).await;
            self.original = None;
        }
    }
}

impl Drop for PlayerSelectionGuard {
    fn drop(&mut self) {
        let Some(original) = self.original.take() else {
            return;
        };

        match Handle::try_current() {
            Ok(handle) => {
                let bridge = self.bridge.clone();
                let endpoint = self.endpoint.clone();
                handle.spawn(async move {
                    restore_selection(bridge.as_ref(), &endpoint, original).await;
                });
            }
            Err(_) => warn!(
                path = self.endpoint.path(),
                "Player scan interrupted outside a runtime, selection not restored"
            ),
        }
    }
}

async fn restore_selection(bridge: &dyn Bridge, endpoint: &Endpoint, original: String) {
    if let Err(e) = bridge
        .set_property(endpoint, "player", BusValue::Str(original))
        .await
    {
        warn!("Failed to restore media player selection: {e}");
    }
}
