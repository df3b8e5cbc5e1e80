pub mod api;
pub mod config;
pub mod feedback;
pub mod mock;
pub mod models;
pub mod queue;

pub use api::{AdviceApi, AdviceApiError, AdviceSource};
pub use feedback::{FeedbackClient, FeedbackError, FeedbackSink};
pub use queue::{MessageQueue, QueueError, QueueMessage, SqsQueue};
