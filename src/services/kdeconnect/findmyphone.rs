use std::sync::Arc;

use tracing::instrument;

use super::{Bridge, Endpoint, KdeConnectError, plugins};

/// Makes a device ring so it can be located
#[derive(Clone)]
pub struct FindMyPhoneService {
    bridge: Arc<dyn Bridge>,
}

impl FindMyPhoneService {
    /// Creates the service on top of the given bridge
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    /// Rings the device.
    ///
    /// # Errors
    /// Returns error if the remote call fails
    #[instrument(skip(self))]
    pub async fn ring(&self, device_id: &str) -> Result<(), KdeConnectError> {
        let endpoint = Endpoint::resolve(device_id, Some(plugins::FIND_MY_PHONE));
        self.bridge.invoke(&endpoint, "ring", &[]).await
    }
}
