use advice::{AdviceSource, MessageQueue, QueueError};
use log::{error, info, warn};
use std::{sync::Arc, time::Duration};

pub const NO_ADVICE_REPLY: &str = "Sorry, no advice is available right now.";

/// Pause after a failed poll so an unreachable queue is not hammered.
const ERROR_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The long-poll ended without a request.
    Idle,
    Replied { request: String, reply: String },
}

/// Answers advice requests: one request message in, one reply message out.
pub struct Responder {
    requests: Arc<dyn MessageQueue>,
    responses: Arc<dyn MessageQueue>,
    advice: Arc<dyn AdviceSource>,
    wait: Duration,
}

impl Responder {
    pub fn new(
        requests: Arc<dyn MessageQueue>,
        responses: Arc<dyn MessageQueue>,
        advice: Arc<dyn AdviceSource>,
        wait: Duration,
    ) -> Self {
        Self {
            requests,
            responses,
            advice,
            wait,
        }
    }

    pub async fn run(&self) {
        loop {
            match self.poll_once().await {
                Ok(Outcome::Idle) => {}
                Ok(Outcome::Replied { request, .. }) => {
                    info!("Answered advice request from {:?}", request);
                }
                Err(e) => {
                    error!("Advice request not answered: {}", e);
                    tokio::time::sleep(ERROR_BACKOFF).await;
                }
            }
        }
    }

    /// Handles at most one request. The request is deleted only after the
    /// reply has been published, so a failed publish leaves it for redelivery.
    pub async fn poll_once(&self) -> Result<Outcome, QueueError> {
        let Some(message) = self.requests.receive(self.wait).await? else {
            return Ok(Outcome::Idle);
        };

        let reply = self.reply().await;
        self.responses.send(&reply).await?;
        self.requests.delete(&message.receipt_handle).await?;

        Ok(Outcome::Replied {
            request: message.body,
            reply,
        })
    }

    async fn reply(&self) -> String {
        match self.advice.random_advice().await {
            Ok(advice) => advice.to_reply(),
            Err(e) => {
                warn!("Falling back to the no-advice reply: {}", e);
                NO_ADVICE_REPLY.to_string()
            }
        }
    }
}
