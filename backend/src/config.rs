use advice::{
    api::DEFAULT_ADVICE_API_URL,
    config::{ConfigError, QueueConfig, Vars},
    feedback::DEFAULT_FEEDBACK_SERVICE_URL,
};
use std::{fmt, str::FromStr, time::Duration};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5111";

/// Where `/echo_user_input` gets its advice from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceMode {
    /// Publish the name and let the page poll `/get_advice`.
    Queue,
    /// Call the advice API while handling the form.
    Api,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown advice mode `{0}`, expected `queue` or `api`")]
pub struct UnknownMode(String);

impl FromStr for AdviceMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queue" => Ok(AdviceMode::Queue),
            "api" => Ok(AdviceMode::Api),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for AdviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdviceMode::Queue => f.write_str("queue"),
            AdviceMode::Api => f.write_str("api"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub mode: AdviceMode,
    /// Present exactly when `mode` is [`AdviceMode::Queue`].
    pub queue: Option<QueueConfig>,
    pub advice_api_url: String,
    pub feedback_service_url: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&Vars::from_env())
    }

    pub fn load(vars: &Vars) -> Result<Self, ConfigError> {
        let mode = vars.parse_or("ADVICE_MODE", AdviceMode::Queue)?;
        let queue = match mode {
            AdviceMode::Queue => Some(QueueConfig::load(vars)?),
            AdviceMode::Api => None,
        };

        Ok(Self {
            bind_addr: vars.string_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            mode,
            queue,
            advice_api_url: vars.string_or("ADVICE_API_URL", DEFAULT_ADVICE_API_URL),
            feedback_service_url: vars
                .string_or("FEEDBACK_SERVICE_URL", DEFAULT_FEEDBACK_SERVICE_URL),
            http_timeout: vars.http_timeout()?,
        })
    }
}
