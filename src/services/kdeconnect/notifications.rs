use std::sync::Arc;

use tracing::{debug, instrument};

use super::{Bridge, Endpoint, KdeConnectError, Notification, NotificationEntry, plugins};

/// Reads notifications mirrored from a device
#[derive(Clone)]
pub struct NotificationService {
    bridge: Arc<dyn Bridge>,
}

impl NotificationService {
    /// Creates the service on top of the given bridge
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    /// Lists active notifications with their details.
    ///
    /// A notification whose properties cannot be read is reported as
    /// [`NotificationEntry::Failed`]; the others are unaffected.
    ///
    /// # Errors
    /// Returns error only if the list of active notification ids cannot be read
    #[instrument(skip(self))]
    pub async fn list(&self, device_id: &str) -> Result<Vec<NotificationEntry>, KdeConnectError> {
        let endpoint = Endpoint::resolve(device_id, Some(plugins::NOTIFICATIONS));
        let ids = self
            .bridge
            .invoke_for_strings(&endpoint, "activeNotifications", &[])
            .await?;

        let mut entries = Vec::with_capacity(ids.len());
        for id in ids {
            match self.read(device_id, &id).await {
                Ok(notification) => entries.push(NotificationEntry::Available(notification)),
                Err(e) => {
                    debug!("Failed to read notification {id}: {e}");
                    entries.push(NotificationEntry::Failed {
                        id,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(entries)
    }

    async fn read(&self, device_id: &str, id: &str) -> Result<Notification, KdeConnectError> {
        let endpoint = Endpoint::notification(device_id, id);

        let app_name = self.string(&endpoint, "appName").await?;
        let title = self.string(&endpoint, "title").await?;
        let text = self.string(&endpoint, "text").await?;
        let ticker = self.string(&endpoint, "ticker").await?;
        let dismissable = self.flag(&endpoint, "dismissable").await?;
        let has_icon = self.flag(&endpoint, "hasIcon").await?;
        let silent = self.flag(&endpoint, "silent").await?;
        let reply_id = self.string(&endpoint, "replyId").await.unwrap_or_default();

        Ok(Notification {
            id: id.to_string(),
            app_name,
            title,
            text,
            ticker,
            dismissable,
            has_icon,
            silent,
            reply_id,
        })
    }

    async fn string(&self, endpoint: &Endpoint, name: &str) -> Result<String, KdeConnectError> {
        self.bridge
            .get_property(endpoint, name)
            .await?
            .into_string(name)
    }

    async fn flag(&self, endpoint: &Endpoint, name: &str) -> Result<bool, KdeConnectError> {
        self.bridge.get_property(endpoint, name).await?.into_bool(name)
    }
}
