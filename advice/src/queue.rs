//! Request/response queues.
//!
//! The backend publishes names on the request queue and long-polls the
//! response queue; the responder does the opposite. Both sides talk to the
//! queue through [`MessageQueue`] so handlers can be exercised without AWS.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::{Client, config::Region, error::DisplayErrorContext};
use log::debug;
use std::time::Duration;

/// SQS refuses long-poll waits above this.
pub const MAX_WAIT_SECONDS: u64 = 20;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("failed to send message: {0}")]
    Send(String),

    #[error("failed to receive message: {0}")]
    Receive(String),

    #[error("failed to delete message: {0}")]
    Delete(String),

    #[error("received message has no receipt handle")]
    MissingReceiptHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub body: String,
    pub receipt_handle: String,
}

#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Publishes `body` and returns the id assigned by the queue.
    async fn send(&self, body: &str) -> Result<String, QueueError>;

    /// Waits up to `wait` for a single message. `None` means the wait ran out.
    async fn receive(&self, wait: Duration) -> Result<Option<QueueMessage>, QueueError>;

    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError>;
}

/// Builds an SQS client from the default AWS provider chain, optionally
/// pinned to `region`.
pub async fn sqs_client(region: Option<String>) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }
    let config = loader.load().await;
    Client::new(&config)
}

#[derive(Clone)]
pub struct SqsQueue {
    client: Client,
    queue_url: String,
}

impl SqsQueue {
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }
}

#[async_trait]
impl MessageQueue for SqsQueue {
    async fn send(&self, body: &str) -> Result<String, QueueError> {
        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| QueueError::Send(DisplayErrorContext(e).to_string()))?;

        Ok(output.message_id().unwrap_or_default().to_string())
    }

    async fn receive(&self, wait: Duration) -> Result<Option<QueueMessage>, QueueError> {
        let wait_seconds = wait.as_secs().min(MAX_WAIT_SECONDS) as i32;
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(1)
            .wait_time_seconds(wait_seconds)
            .send()
            .await
            .map_err(|e| QueueError::Receive(DisplayErrorContext(e).to_string()))?;

        let Some(message) = output.messages().first() else {
            debug!("No message on {} after {}s", self.queue_url, wait_seconds);
            return Ok(None);
        };

        let receipt_handle = message
            .receipt_handle()
            .ok_or(QueueError::MissingReceiptHandle)?
            .to_string();

        Ok(Some(QueueMessage {
            body: message.body().unwrap_or_default().to_string(),
            receipt_handle,
        }))
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| QueueError::Delete(DisplayErrorContext(e).to_string()))?;
        Ok(())
    }
}
