use std::sync::Arc;

use tracing::instrument;

use super::{BatteryStatus, Bridge, Endpoint, KdeConnectError, plugins};

/// Reads battery state through the battery plugin
#[derive(Clone)]
pub struct BatteryService {
    bridge: Arc<dyn Bridge>,
}

impl BatteryService {
    /// Creates the service on top of the given bridge
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    /// Reads charge level and charging state.
    ///
    /// # Errors
    /// Returns `PluginUnavailable` when the device has no battery plugin,
    /// any other remote error unchanged
    #[instrument(skip(self))]
    pub async fn status(&self, device_id: &str) -> Result<BatteryStatus, KdeConnectError> {
        self.read(device_id)
            .await
            .map_err(|e| e.into_plugin_unavailable(device_id, plugins::BATTERY))
    }

    async fn read(&self, device_id: &str) -> Result<BatteryStatus, KdeConnectError> {
        let endpoint = Endpoint::resolve(device_id, Some(plugins::BATTERY));

        let charge = self
            .bridge
            .get_property(&endpoint, "charge")
            .await?
            .into_int("charge")?;
        let is_charging = self
            .bridge
            .get_property(&endpoint, "isCharging")
            .await?
            .into_bool("isCharging")?;

        Ok(BatteryStatus {
            charge,
            is_charging,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::kdeconnect::{RemoteFailure, testing::FakeBridge};

    #[tokio::test]
    async fn reads_charge_and_state() {
        let endpoint = Endpoint::resolve("abc", Some(plugins::BATTERY));
        let bridge = FakeBridge::new()
            .with_int(&endpoint, "charge", 64)
            .with_property(&endpoint, "isCharging", true);

        let status = BatteryService::new(Arc::new(bridge))
            .status("abc")
            .await
            .unwrap();

        assert_eq!(
            status,
            BatteryStatus {
                charge: 64,
                is_charging: true
            }
        );
    }

    #[tokio::test]
    async fn missing_plugin_is_reported_distinctly() {
        let error = BatteryService::new(Arc::new(FakeBridge::new()))
            .status("abc")
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            KdeConnectError::PluginUnavailable { ref plugin, .. } if plugin == "battery"
        ));
    }

    #[tokio::test]
    async fn partial_read_fails_the_whole_status() {
        let endpoint = Endpoint::resolve("abc", Some(plugins::BATTERY));
        let bridge = FakeBridge::new()
            .with_int(&endpoint, "charge", 64)
            .with_failure(&endpoint, "isCharging", RemoteFailure::ServiceUnavailable);

        let error = BatteryService::new(Arc::new(bridge))
            .status("abc")
            .await
            .unwrap_err();

        assert_eq!(
            error.remote_failure(),
            Some(RemoteFailure::ServiceUnavailable)
        );
    }
}
