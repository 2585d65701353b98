use std::fmt;

/// Classification of a failed remote call, derived from the D-Bus error name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFailure {
    /// No object exists at the requested path (unknown device or plugin)
    ObjectNotFound,
    /// The object exists but does not implement the interface
    InterfaceNotFound,
    /// The interface has no such property
    PropertyNotFound,
    /// The interface has no such method
    MethodNotFound,
    /// The KDE Connect daemon is not on the bus or the device is unreachable
    ServiceUnavailable,
    /// Anything else reported by the transport
    Other,
}

impl RemoteFailure {
    /// Maps a D-Bus error name onto a failure class.
    pub fn from_error_name(name: &str) -> Self {
        match name {
            "org.freedesktop.DBus.Error.UnknownObject" => Self::ObjectNotFound,
            "org.freedesktop.DBus.Error.UnknownInterface" => Self::InterfaceNotFound,
            "org.freedesktop.DBus.Error.UnknownProperty"
            | "org.freedesktop.DBus.Error.InvalidArgs" => Self::PropertyNotFound,
            "org.freedesktop.DBus.Error.UnknownMethod" => Self::MethodNotFound,
            "org.freedesktop.DBus.Error.ServiceUnknown"
            | "org.freedesktop.DBus.Error.NameHasNoOwner"
            | "org.freedesktop.DBus.Error.NoReply"
            | "org.freedesktop.DBus.Error.Timeout" => Self::ServiceUnavailable,
            _ => Self::Other,
        }
    }

    /// Whether this failure means the addressed plugin is not loaded on the device.
    pub fn means_missing_plugin(self) -> bool {
        matches!(
            self,
            Self::ObjectNotFound | Self::InterfaceNotFound | Self::PropertyNotFound
        )
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ObjectNotFound => "object not found",
            Self::InterfaceNotFound => "interface not found",
            Self::PropertyNotFound => "property not found",
            Self::MethodNotFound => "method not found",
            Self::ServiceUnavailable => "service unavailable",
            Self::Other => "remote error",
        };
        write!(f, "{label}")
    }
}

/// Errors that can occur while talking to the KDE Connect daemon
#[derive(thiserror::Error, Debug)]
pub enum KdeConnectError {
    /// A property read/write or method call failed on the bus
    #[error("{kind} calling '{member}' on {path}: {details}")]
    RemoteCall {
        /// Object path the call was addressed to
        path: String,
        /// Property or method name
        member: String,
        /// Failure class
        kind: RemoteFailure,
        /// Message reported by the transport
        details: String,
    },

    /// The device does not have the requested plugin loaded
    #[error("plugin '{plugin}' is not available on device {device_id}")]
    PluginUnavailable {
        /// Device that was addressed
        device_id: String,
        /// Plugin that is missing
        plugin: String,
    },

    /// The daemon returned a value of a different type than expected
    #[error("unexpected value for '{member}': expected {expected}")]
    UnexpectedValue {
        /// Property or method name
        member: String,
        /// Expected type name
        expected: &'static str,
    },

    /// The argument list cannot be encoded for the bus
    #[error("unsupported argument list for '{member}'")]
    UnsupportedArguments {
        /// Method name
        member: String,
    },

    /// Failed to open the session bus connection
    #[error("D-Bus connection failed: {0}")]
    Connection(String),
}

impl KdeConnectError {
    /// Failure class of a remote call error, if this is one.
    pub fn remote_failure(&self) -> Option<RemoteFailure> {
        match self {
            Self::RemoteCall { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Converts a remote "not found" failure into [`KdeConnectError::PluginUnavailable`].
    ///
    /// Other errors are returned unchanged.
    pub fn into_plugin_unavailable(self, device_id: &str, plugin: &str) -> Self {
        match self.remote_failure() {
            Some(kind) if kind.means_missing_plugin() => Self::PluginUnavailable {
                device_id: device_id.to_string(),
                plugin: plugin.to_string(),
            },
            _ => self,
        }
    }
}
