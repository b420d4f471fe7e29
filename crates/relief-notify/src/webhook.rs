use crate::{MessageEnvelope, MessageMetadata};
use relief_core::{now_epoch_millis, MessageId};
use relief_registry::{RegistryEvent, RegistryObserver};
use reqwest::{Client, Url};
use std::fmt;
use std::time::Duration;

const EVENT_SCHEMA: &str = "relief.registry_event.v1";

#[derive(Debug)]
pub enum NotifyError {
    InvalidUrl(String),
    Http(reqwest::Error),
    Status(u16),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(message) => write!(f, "invalid webhook url: {}", message),
            Self::Http(err) => write!(f, "webhook request failed: {}", err),
            Self::Status(code) => write!(f, "webhook responded with status {}", code),
        }
    }
}

impl std::error::Error for NotifyError {}

impl From<reqwest::Error> for NotifyError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Posts registry events to an external webhook. Delivery happens on a
/// spawned task and failures are only logged, so the registry never waits on
/// or rolls back because of the network.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: Url,
    source_service: String,
}

impl WebhookNotifier {
    pub fn new(
        url: &str,
        timeout: Duration,
        source_service: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let url = Url::parse(url).map_err(|err| NotifyError::InvalidUrl(err.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            source_service: source_service.into(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn envelope(&self, event: &RegistryEvent) -> MessageEnvelope<RegistryEvent> {
        MessageEnvelope {
            metadata: MessageMetadata::new(
                MessageId::new(),
                now_epoch_millis(),
                self.source_service.clone(),
            )
            .with_schema(EVENT_SCHEMA),
            payload: event.clone(),
        }
    }

    pub async fn deliver(
        &self,
        envelope: &MessageEnvelope<RegistryEvent>,
    ) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(envelope)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

impl RegistryObserver for WebhookNotifier {
    fn on_event(&self, event: &RegistryEvent) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(
                event = event.kind(),
                report_id = %event.report_id(),
                "no async runtime, webhook notification dropped"
            );
            return;
        };

        let notifier = self.clone();
        let envelope = self.envelope(event);
        runtime.spawn(async move {
            match notifier.deliver(&envelope).await {
                Ok(()) => tracing::debug!(
                    message_id = %envelope.metadata.message_id,
                    event = envelope.payload.kind(),
                    "webhook notification delivered"
                ),
                Err(err) => {
                    metrics::counter!("relief_webhook_failures_total").increment(1);
                    tracing::warn!(
                        message_id = %envelope.metadata.message_id,
                        event = envelope.payload.kind(),
                        error = %err,
                        "webhook notification failed"
                    );
                }
            }
        });
    }
}
