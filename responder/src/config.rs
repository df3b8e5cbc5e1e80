use advice::{
    api::DEFAULT_ADVICE_API_URL,
    config::{ConfigError, QueueConfig, Vars},
};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub queue: QueueConfig,
    pub advice_api_url: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&Vars::from_env())
    }

    pub fn load(vars: &Vars) -> Result<Self, ConfigError> {
        let queue = QueueConfig::load(vars)?;
        // Replies on the request queue would be read back as new requests.
        if queue.request_url == queue.response_url {
            return Err(ConfigError::Invalid {
                key: "RESPONSE_QUEUE_URL",
                message: "must differ from REQUEST_QUEUE_URL".to_string(),
            });
        }
        // The worker polls back to back; a zero wait would spin on an idle queue.
        if queue.wait.is_zero() {
            return Err(ConfigError::Invalid {
                key: "QUEUE_WAIT_SECONDS",
                message: "the responder needs a long-poll wait of at least 1s".to_string(),
            });
        }

        Ok(Self {
            queue,
            advice_api_url: vars.string_or("ADVICE_API_URL", DEFAULT_ADVICE_API_URL),
            http_timeout: vars.http_timeout()?,
        })
    }
}
