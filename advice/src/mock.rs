//! In-memory stand-ins for the queue, the advice API and the feedback
//! service. They record every call so tests can assert on them.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::{
    collections::VecDeque,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crate::{
    api::{AdviceApiError, AdviceSource},
    feedback::{FeedbackError, FeedbackSink},
    models::{Advice, FeedbackCounts, FeedbackRecord},
    queue::{MessageQueue, QueueError, QueueMessage},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A FIFO queue. Sent bodies become receivable, received messages are
/// removed immediately and deletes are only recorded.
#[derive(Default)]
pub struct MockQueue {
    pending: Mutex<VecDeque<QueueMessage>>,
    sent: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    waits: Mutex<Vec<Duration>>,
    next_id: AtomicUsize,
    fail_sends: bool,
    fail_receives: bool,
}

impl MockQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_sends() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    pub fn failing_receives() -> Self {
        Self {
            fail_receives: true,
            ..Self::default()
        }
    }

    /// Enqueues a message without recording it as sent. Returns its receipt handle.
    pub fn push(&self, body: &str) -> String {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let receipt_handle = format!("receipt-{id}");
        lock(&self.pending).push_back(QueueMessage {
            body: body.to_string(),
            receipt_handle: receipt_handle.clone(),
        });
        receipt_handle
    }

    pub fn sent(&self) -> Vec<String> {
        lock(&self.sent).clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        lock(&self.deleted).clone()
    }

    /// The `wait` passed to each `receive`, in call order.
    pub fn waits(&self) -> Vec<Duration> {
        lock(&self.waits).clone()
    }

    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }
}

#[async_trait]
impl MessageQueue for MockQueue {
    async fn send(&self, body: &str) -> Result<String, QueueError> {
        if self.fail_sends {
            return Err(QueueError::Send("mock queue rejects sends".to_string()));
        }
        lock(&self.sent).push(body.to_string());
        Ok(self.push(body))
    }

    async fn receive(&self, wait: Duration) -> Result<Option<QueueMessage>, QueueError> {
        lock(&self.waits).push(wait);
        if self.fail_receives {
            return Err(QueueError::Receive("mock queue rejects receives".to_string()));
        }
        Ok(lock(&self.pending).pop_front())
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError> {
        lock(&self.deleted).push(receipt_handle.to_string());
        Ok(())
    }
}

/// Answers every call with the same advice, or with a 503 when built
/// through [`MockAdviceSource::unavailable`].
pub struct MockAdviceSource {
    advice: Option<Advice>,
    calls: AtomicUsize,
}

impl MockAdviceSource {
    pub fn returning(advice: Advice) -> Self {
        Self {
            advice: Some(advice),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            advice: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdviceSource for MockAdviceSource {
    async fn random_advice(&self) -> Result<Advice, AdviceApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.advice
            .clone()
            .ok_or(AdviceApiError::Status(StatusCode::SERVICE_UNAVAILABLE))
    }
}

#[derive(Default)]
pub struct MockFeedbackSink {
    submitted: Mutex<Vec<FeedbackRecord>>,
    fail: bool,
}

impl MockFeedbackSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a 502, after recording the attempt.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn submitted(&self) -> Vec<FeedbackRecord> {
        lock(&self.submitted).clone()
    }
}

#[async_trait]
impl FeedbackSink for MockFeedbackSink {
    async fn submit(&self, record: &FeedbackRecord) -> Result<(), FeedbackError> {
        lock(&self.submitted).push(record.clone());
        if self.fail {
            return Err(FeedbackError::Status(StatusCode::BAD_GATEWAY));
        }
        Ok(())
    }

    async fn counts(&self) -> Result<FeedbackCounts, FeedbackError> {
        if self.fail {
            return Err(FeedbackError::Status(StatusCode::BAD_GATEWAY));
        }
        Ok(FeedbackCounts::tally(
            lock(&self.submitted).iter().map(|record| record.feedback),
        ))
    }
}
