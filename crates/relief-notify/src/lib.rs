use relief_core::{EpochMillis, MessageId};
use serde::{Deserialize, Serialize};

mod webhook;
pub use webhook::{NotifyError, WebhookNotifier};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageMetadata {
    pub message_id: MessageId,
    pub sent_at_ms: EpochMillis,
    pub source_service: String,
    pub schema: Option<String>,
}

impl MessageMetadata {
    pub fn new(message_id: MessageId, sent_at_ms: EpochMillis, source_service: String) -> Self {
        Self {
            message_id,
            sent_at_ms,
            source_service,
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope<T> {
    pub metadata: MessageMetadata,
    pub payload: T,
}
