/// Battery plugin
pub mod battery;
/// Bridge trait and values exchanged with the bus
pub mod bridge;
/// zbus implementation of the bridge
pub mod dbus;
/// Device enumeration and description
pub mod devices;
/// Object paths and interface names
pub mod endpoint;
/// KDE Connect error types
pub mod error;
/// Ring-to-locate plugin
pub mod findmyphone;
/// Media players: passive reads, control and active scanning
pub mod media;
/// Mirrored notifications
pub mod notifications;
/// Ping plugin
pub mod ping;
/// URL and file sharing
pub mod share;
/// Value types returned to callers
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

use std::{sync::Arc, time::Duration};

pub use battery::BatteryService;
pub use bridge::{Bridge, BusValue};
pub use dbus::DbusBridge;
pub use devices::{DeviceEntry, DeviceRegistry};
pub use endpoint::*;
pub use error::*;
pub use findmyphone::FindMyPhoneService;
pub use media::{MediaRemote, PlayerProber, PlayerSelectionGuard, probe::DEFAULT_SETTLE_INTERVAL};
pub use notifications::NotificationService;
pub use ping::PingService;
pub use share::ShareService;
pub use types::*;

/// Every KDE Connect capability, sharing one bridge
#[derive(Clone)]
pub struct KdeConnectService {
    /// Device listing and descriptions
    pub devices: DeviceRegistry,
    /// Battery state
    pub battery: BatteryService,
    /// Pings and messages
    pub ping: PingService,
    /// URL and file sharing
    pub share: ShareService,
    /// Ringing the device
    pub find_my_phone: FindMyPhoneService,
    /// Mirrored notifications
    pub notifications: NotificationService,
    /// Media player reads and control
    pub media: MediaRemote,
    /// Active media player detection
    pub prober: PlayerProber,
}

impl KdeConnectService {
    /// Builds every service on top of one bridge
    pub fn new(bridge: Arc<dyn Bridge>, settle_interval: Duration) -> Self {
        Self {
            devices: DeviceRegistry::new(bridge.clone()),
            battery: BatteryService::new(bridge.clone()),
            ping: PingService::new(bridge.clone()),
            share: ShareService::new(bridge.clone()),
            find_my_phone: FindMyPhoneService::new(bridge.clone()),
            notifications: NotificationService::new(bridge.clone()),
            media: MediaRemote::new(bridge.clone()),
            prober: PlayerProber::new(bridge, settle_interval),
        }
    }

    /// Connects to the session bus and builds every service.
    ///
    /// # Errors
    /// Returns error if the session bus connection cannot be established
    pub async fn connect(settle_interval: Duration) -> Result<Self, KdeConnectError> {
        let bridge = DbusBridge::connect().await?;
        Ok(Self::new(Arc::new(bridge), settle_interval))
    }
}
