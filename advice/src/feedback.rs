use async_trait::async_trait;
use log::{debug, warn};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{FeedbackCounts, FeedbackKind, FeedbackRecord};

pub const DEFAULT_FEEDBACK_SERVICE_URL: &str = "http://localhost:8080";
pub const FEEDBACK_PATH: &str = "/api/v1/feedback";

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("feedback service request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("feedback service answered with status {0}")]
    Status(StatusCode),

    #[error("feedback service returned an unexpected body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The sibling service that owns submitted feedback.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    async fn submit(&self, record: &FeedbackRecord) -> Result<(), FeedbackError>;

    async fn counts(&self) -> Result<FeedbackCounts, FeedbackError>;
}

// Only the kind matters for analytics; the service may add its own fields
// and may hold kinds this crate does not know.
#[derive(Deserialize)]
struct StoredFeedback {
    #[serde(default)]
    feedback: Value,
}

impl StoredFeedback {
    fn kind(self) -> Option<FeedbackKind> {
        match serde_json::from_value::<FeedbackKind>(self.feedback) {
            Ok(kind) => Some(kind),
            Err(e) => {
                warn!("Skipping stored feedback with unknown kind: {}", e);
                None
            }
        }
    }
}

#[derive(Clone)]
pub struct FeedbackClient {
    client: reqwest::Client,
    endpoint: String,
}

impl FeedbackClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), FEEDBACK_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FeedbackSink for FeedbackClient {
    async fn submit(&self, record: &FeedbackRecord) -> Result<(), FeedbackError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(FeedbackError::Request)?;

        if !response.status().is_success() {
            return Err(FeedbackError::Status(response.status()));
        }

        debug!("Forwarded {} feedback from {}", record.feedback, record.name);
        Ok(())
    }

    async fn counts(&self) -> Result<FeedbackCounts, FeedbackError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(FeedbackError::Request)?;

        if !response.status().is_success() {
            return Err(FeedbackError::Status(response.status()));
        }

        let stored = response
            .json::<Vec<StoredFeedback>>()
            .await
            .map_err(FeedbackError::Decode)?;

        Ok(FeedbackCounts::tally(
            stored.into_iter().filter_map(StoredFeedback::kind),
        ))
    }
}
