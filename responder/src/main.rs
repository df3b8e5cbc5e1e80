use advice::{AdviceApi, SqsQueue, queue::sqs_client};
use dotenv::dotenv;
use log::info;
use responder::{config::Config, worker::Responder};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;
    let sqs = sqs_client(config.queue.region.clone()).await;

    let responder = Responder::new(
        Arc::new(SqsQueue::new(sqs.clone(), &config.queue.request_url)),
        Arc::new(SqsQueue::new(sqs, &config.queue.response_url)),
        Arc::new(AdviceApi::new(http, &config.advice_api_url)),
        config.queue.wait,
    );

    info!(
        "Answering requests from {} on {}",
        config.queue.request_url, config.queue.response_url
    );

    tokio::select! {
        _ = responder.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
