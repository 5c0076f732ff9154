//! Queue of failures waiting to be shown to the user.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::error::Error;

/// Errors from background operations, oldest first.
///
/// Not deduplicated and not bounded.
#[derive(Debug, Default)]
pub struct PendingErrors {
    queue: Mutex<VecDeque<Error>>,
}

impl PendingErrors {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error.
    pub fn push(&self, err: Error) {
        tracing::debug!(error = %err, "queued error for acknowledgment");
        self.queue.lock().push_back(err);
    }

    /// Take the oldest error, if any.
    pub fn ack(&self) -> Option<Error> {
        self.queue.lock().pop_front()
    }

    /// Number of errors waiting.
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}
