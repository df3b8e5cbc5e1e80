use async_trait::async_trait;
use reqwest::StatusCode;

use crate::models::{Advice, AdviceEnvelope};

pub const DEFAULT_ADVICE_API_URL: &str = "http://localhost:8000/advice/random";

#[derive(Debug, thiserror::Error)]
pub enum AdviceApiError {
    #[error("advice API request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("advice API answered with status {0}")]
    Status(StatusCode),

    #[error("advice API returned an unexpected body: {0}")]
    Decode(#[source] reqwest::Error),
}

#[async_trait]
pub trait AdviceSource: Send + Sync {
    async fn random_advice(&self) -> Result<Advice, AdviceApiError>;
}

/// Client for the third-party `GET /advice/random` endpoint.
#[derive(Clone)]
pub struct AdviceApi {
    client: reqwest::Client,
    url: String,
}

impl AdviceApi {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl AdviceSource for AdviceApi {
    async fn random_advice(&self) -> Result<Advice, AdviceApiError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(AdviceApiError::Request)?;

        if response.status() != StatusCode::OK {
            return Err(AdviceApiError::Status(response.status()));
        }

        let envelope = response
            .json::<AdviceEnvelope>()
            .await
            .map_err(AdviceApiError::Decode)?;

        Ok(envelope.data)
    }
}
