use advice::{
    AdviceApi, AdviceSource, FeedbackClient, FeedbackSink, MessageQueue, SqsQueue,
    queue::sqs_client,
};
use log::info;
use std::{sync::Arc, time::Duration};

use crate::config::Config;

/// How advice reaches the user, fixed at startup.
pub enum AdviceChannel {
    Queue {
        requests: Arc<dyn MessageQueue>,
        responses: Arc<dyn MessageQueue>,
        wait: Duration,
    },
    Api(Arc<dyn AdviceSource>),
}

/// Handles injected into every handler. None of them hold mutable state.
pub struct AppState {
    pub channel: AdviceChannel,
    pub feedback: Arc<dyn FeedbackSink>,
}

impl AppState {
    pub fn new(channel: AdviceChannel, feedback: Arc<dyn FeedbackSink>) -> Self {
        Self { channel, feedback }
    }

    pub async fn connect(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let channel = match &config.queue {
            Some(queue) => {
                let sqs = sqs_client(queue.region.clone()).await;
                info!(
                    "Publishing to {} and polling {}",
                    queue.request_url, queue.response_url
                );
                AdviceChannel::Queue {
                    requests: Arc::new(SqsQueue::new(sqs.clone(), &queue.request_url)),
                    responses: Arc::new(SqsQueue::new(sqs, &queue.response_url)),
                    wait: queue.wait,
                }
            }
            None => {
                info!("Fetching advice from {}", config.advice_api_url);
                AdviceChannel::Api(Arc::new(AdviceApi::new(
                    http.clone(),
                    &config.advice_api_url,
                )))
            }
        };

        let feedback = FeedbackClient::new(http, &config.feedback_service_url);
        info!("Forwarding feedback to {}", feedback.endpoint());

        Ok(Self::new(channel, Arc::new(feedback)))
    }
}
