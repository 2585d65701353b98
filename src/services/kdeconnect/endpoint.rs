/// Well-known bus name of the KDE Connect daemon
pub const BUS_NAME: &str = "org.kde.kdeconnect";

/// Object path of the daemon itself
pub const DAEMON_PATH: &str = "/modules/kdeconnect";

/// Interface implemented by the daemon object
pub const DAEMON_INTERFACE: &str = "org.kde.kdeconnect.daemon";

/// Prefix under which every device object lives
pub const DEVICE_PATH_PREFIX: &str = "/modules/kdeconnect/devices";

/// Interface implemented by a device object
pub const DEVICE_INTERFACE: &str = "org.kde.kdeconnect.device";

/// Standard interface used for every property read and write
pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// Plugin names as exposed in device object paths
pub mod plugins {
    /// Battery level reporting
    pub const BATTERY: &str = "battery";
    /// Remote control of the device's media players
    pub const MPRIS_REMOTE: &str = "mprisremote";
    /// Mirrored device notifications
    pub const NOTIFICATIONS: &str = "notifications";
    /// File and URL sharing
    pub const SHARE: &str = "share";
    /// Ping messages
    pub const PING: &str = "ping";
    /// Make the device ring
    pub const FIND_MY_PHONE: &str = "findmyphone";
}

/// Resolved address of a device or plugin object on the bus.
///
/// Properties of the endpoint are read through [`PROPERTIES_INTERFACE`] at
/// [`Endpoint::path`], keyed by [`Endpoint::interface`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    path: String,
    interface: String,
}

impl Endpoint {
    /// Resolves a device, or one of its plugins, to an endpoint.
    ///
    /// Never fails: malformed ids surface later as remote lookup errors.
    pub fn resolve(device_id: &str, plugin: Option<&str>) -> Self {
        match plugin {
            Some(plugin) => Self {
                path: format!("{DEVICE_PATH_PREFIX}/{device_id}/{plugin}"),
                interface: format!("{DEVICE_INTERFACE}.{plugin}"),
            },
            None => Self {
                path: format!("{DEVICE_PATH_PREFIX}/{device_id}"),
                interface: DEVICE_INTERFACE.to_string(),
            },
        }
    }

    /// Endpoint of the daemon object used for device enumeration.
    pub fn daemon() -> Self {
        Self {
            path: DAEMON_PATH.to_string(),
            interface: DAEMON_INTERFACE.to_string(),
        }
    }

    /// Endpoint of a single notification nested under the notifications plugin.
    pub fn notification(device_id: &str, notification_id: &str) -> Self {
        let plugin = Self::resolve(device_id, Some(plugins::NOTIFICATIONS));
        Self {
            path: format!("{}/{notification_id}", plugin.path),
            interface: format!("{}.notification", plugin.interface),
        }
    }

    /// Object path of the endpoint
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Interface name used for methods and as the property namespace
    pub fn interface(&self) -> &str {
        &self.interface
    }
}
