use std::sync::Arc;

use tracing::instrument;

use super::{Bridge, BusValue, Endpoint, KdeConnectError, plugins};

/// Sends pings, optionally carrying a message, through the ping plugin
#[derive(Clone)]
pub struct PingService {
    bridge: Arc<dyn Bridge>,
}

impl PingService {
    /// Creates the service on top of the given bridge
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    /// Sends a ping. An absent or empty message sends a bare ping.
    ///
    /// # Errors
    /// Returns error if the remote call fails
    #[instrument(skip(self))]
    pub async fn send(&self, device_id: &str, message: Option<&str>) -> Result<(), KdeConnectError> {
        let endpoint = Endpoint::resolve(device_id, Some(plugins::PING));

        match message.filter(|text| !text.is_empty()) {
            Some(text) => {
                self.bridge
                    .invoke(&endpoint, "sendPing", &[BusValue::from(text)])
                    .await
            }
            None => self.bridge.invoke(&endpoint, "sendPing", &[]).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::kdeconnect::testing::FakeBridge;

    #[tokio::test]
    async fn message_is_sent_as_argument() {
        let bridge = Arc::new(FakeBridge::new());
        PingService::new(bridge.clone())
            .send("abc", Some("dinner is ready"))
            .await
            .unwrap();

        assert_eq!(
            bridge.invocations(),
            vec![(
                "org.kde.kdeconnect.device.ping".to_string(),
                "sendPing".to_string(),
                vec![BusValue::from("dinner is ready")]
            )]
        );
    }

    #[tokio::test]
    async fn empty_message_sends_bare_ping() {
        let bridge = Arc::new(FakeBridge::new());
        let service = PingService::new(bridge.clone());

        service.send("abc", None).await.unwrap();
        service.send("abc", Some("")).await.unwrap();

        for (_, method, args) in bridge.invocations() {
            assert_eq!(method, "sendPing");
            assert!(args.is_empty());
        }
    }
}
