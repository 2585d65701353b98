use std::sync::Arc;

use tracing::instrument;

use super::{Bridge, BusValue, Endpoint, KdeConnectError, plugins};

/// Sends URLs and local files to a device through the share plugin
#[derive(Clone)]
pub struct ShareService {
    bridge: Arc<dyn Bridge>,
}

impl ShareService {
    /// Creates the service on top of the given bridge
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    /// Shares a single URL.
    ///
    /// # Errors
    /// Returns error if the remote call fails
    #[instrument(skip(self))]
    pub async fn share_url(&self, device_id: &str, url: &str) -> Result<(), KdeConnectError> {
        let endpoint = Endpoint::resolve(device_id, Some(plugins::SHARE));
        self.bridge
            .invoke(&endpoint, "shareUrl", &[BusValue::from(url)])
            .await
    }

    /// Shares a local file as a `file://` URL.
    ///
    /// The daemon's plural `shareUrls` method is used with a single element.
    ///
    /// # Errors
    /// Returns error if the remote call fails
    #[instrument(skip(self))]
    pub async fn share_file(&self, device_id: &str, file_path: &str) -> Result<(), KdeConnectError> {
        let endpoint = Endpoint::resolve(device_id, Some(plugins::SHARE));
        let urls = vec![format!("file://{file_path}")];

        self.bridge
            .invoke(&endpoint, "shareUrls", &[BusValue::StrList(urls)])
            .await
    }
}
