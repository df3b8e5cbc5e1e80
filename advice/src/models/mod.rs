pub mod advice;
pub mod feedback;

pub use advice::{Advice, AdviceEnvelope};
pub use feedback::{FeedbackCounts, FeedbackKind, FeedbackRecord};
