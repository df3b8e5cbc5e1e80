//! Environment-driven settings shared by the backend and the responder.

use log::{info, warn};
use std::{collections::HashMap, env, fmt::Display, str::FromStr, time::Duration};

use crate::queue::MAX_WAIT_SECONDS;

pub const DEFAULT_QUEUE_WAIT_SECONDS: u64 = 10;
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Where settings are looked up. The process environment in production,
/// a fixed map in tests.
pub struct Vars {
    lookup: Box<dyn Fn(&str) -> Option<String> + Send + Sync>,
}

impl Vars {
    pub fn from_env() -> Self {
        Self {
            lookup: Box::new(|key| env::var(key).ok()),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            lookup: Box::new(move |key| map.get(key).cloned()),
        }
    }

    /// Blank values count as unset.
    pub fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    pub fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + Display,
        T::Err: Display,
    {
        match self.optional(key) {
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                key,
                message: format!("{raw:?}: {e}"),
            }),
            None => {
                info!("{key} not set, using default: {default}");
                Ok(default)
            }
        }
    }

    pub fn string_or(&self, key: &'static str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
    }

    pub fn http_timeout(&self) -> Result<Duration, ConfigError> {
        self.parse_or("HTTP_TIMEOUT_SECONDS", DEFAULT_HTTP_TIMEOUT_SECONDS)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    pub request_url: String,
    pub response_url: String,
    pub wait: Duration,
    pub region: Option<String>,
}

impl QueueConfig {
    pub fn load(vars: &Vars) -> Result<Self, ConfigError> {
        let request_url = vars.required("REQUEST_QUEUE_URL")?;
        let response_url = vars.optional("RESPONSE_QUEUE_URL").unwrap_or_else(|| {
            warn!("RESPONSE_QUEUE_URL not set, replies are read from the request queue");
            request_url.clone()
        });

        let wait_seconds: u64 = vars.parse_or("QUEUE_WAIT_SECONDS", DEFAULT_QUEUE_WAIT_SECONDS)?;
        if wait_seconds > MAX_WAIT_SECONDS {
            return Err(ConfigError::Invalid {
                key: "QUEUE_WAIT_SECONDS",
                message: format!("{wait_seconds} exceeds the {MAX_WAIT_SECONDS}s long-poll limit"),
            });
        }

        Ok(Self {
            request_url,
            response_url,
            wait: Duration::from_secs(wait_seconds),
            region: vars.optional("AWS_REGION"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_queue_defaults_to_request_queue() {
        let vars = Vars::from_pairs([("REQUEST_QUEUE_URL", "https://sqs.local/requests")]);
        let config = QueueConfig::load(&vars).unwrap();
        assert_eq!(config.response_url, "https://sqs.local/requests");
        assert_eq!(config.wait, Duration::from_secs(10));
        assert_eq!(config.region, None);
    }

    #[test]
    fn missing_request_queue_is_reported() {
        let err = QueueConfig::load(&Vars::from_pairs::<_, &str, &str>([])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("REQUEST_QUEUE_URL")));
    }

    #[test]
    fn wait_above_long_poll_limit_is_rejected() {
        let vars = Vars::from_pairs([
            ("REQUEST_QUEUE_URL", "https://sqs.local/requests"),
            ("QUEUE_WAIT_SECONDS", "30"),
        ]);
        let err = QueueConfig::load(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "QUEUE_WAIT_SECONDS", .. }));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let vars = Vars::from_pairs([("HTTP_TIMEOUT_SECONDS", "  ")]);
        assert_eq!(vars.http_timeout().unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn unparsable_number_names_the_variable() {
        let vars = Vars::from_pairs([("HTTP_TIMEOUT_SECONDS", "soon")]);
        let err = vars.http_timeout().unwrap_err();
        assert!(err.to_string().contains("HTTP_TIMEOUT_SECONDS"));
    }
}
