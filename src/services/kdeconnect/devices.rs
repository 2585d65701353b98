use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use super::{Bridge, BusValue, Device, Endpoint, KdeConnectError};

/// Listing entry that reports a device whose description could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeviceEntry {
    /// Description was read
    Described(Device),
    /// Reading the description failed
    Failed {
        /// Device identifier
        id: String,
        /// Description of the failure
        error: String,
    },
}

/// Enumerates devices known to the daemon and reads their descriptions
#[derive(Clone)]
pub struct DeviceRegistry {
    bridge: Arc<dyn Bridge>,
}

impl DeviceRegistry {
    /// Creates a registry on top of the given bridge
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    /// Lists device ids known to the daemon.
    ///
    /// The flags are forwarded to the daemon, which does the filtering.
    ///
    /// # Errors
    /// Returns error if the daemon call fails
    #[instrument(skip(self))]
    pub async fn list_devices(
        &self,
        paired_only: bool,
        reachable_only: bool,
    ) -> Result<Vec<String>, KdeConnectError> {
        self.bridge
            .invoke_for_strings(
                &Endpoint::daemon(),
                "devices",
                &[BusValue::Bool(reachable_only), BusValue::Bool(paired_only)],
            )
            .await
    }

    /// Reads the descriptive record of one device.
    ///
    /// # Errors
    /// Fails as a whole if any of the four properties cannot be read
    #[instrument(skip(self))]
    pub async fn describe(&self, device_id: &str) -> Result<Device, KdeConnectError> {
        let endpoint = Endpoint::resolve(device_id, None);
        let bridge = &self.bridge;

        let name = bridge
            .get_property(&endpoint, "name")
            .await?
            .into_string("name")?;
        let device_type = bridge
            .get_property(&endpoint, "type")
            .await?
            .into_string("type")?;
        let is_paired = bridge
            .get_property(&endpoint, "isPaired")
            .await?
            .into_bool("isPaired")?;
        let is_reachable = bridge
            .get_property(&endpoint, "isReachable")
            .await?
            .into_bool("isReachable")?;

        Ok(Device {
            id: device_id.to_string(),
            name,
            device_type,
            is_paired,
            is_reachable,
        })
    }

    /// Lists devices and describes each one.
    ///
    /// A device whose description fails is reported inline and does not
    /// affect the others.
    ///
    /// # Errors
    /// Returns error only if the device listing itself fails
    pub async fn list_described(
        &self,
        paired_only: bool,
        reachable_only: bool,
    ) -> Result<Vec<DeviceEntry>, KdeConnectError> {
        let ids = self.list_devices(paired_only, reachable_only).await?;
        let mut entries = Vec::with_capacity(ids.len());

        for id in ids {
            match self.describe(&id).await {
                Ok(device) => entries.push(DeviceEntry::Described(device)),
                Err(e) => {
                    debug!("Failed to describe device {id}: {e}");
                    entries.push(DeviceEntry::Failed {
                        id,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(entries)
    }
}
