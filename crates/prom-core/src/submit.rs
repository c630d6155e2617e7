//! Seam between the deck and whatever delivers swipes to the backend.

use std::fmt;
use std::future::Future;

use crate::profile::{SwipeIntent, SwipeResponse};

/// A request that did not reach the backend or was rejected by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionError {
    pub reason: String,
}

impl SubmissionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "submission failed: {}", self.reason)
    }
}

impl std::error::Error for SubmissionError {}

/// Delivers one swipe per call. Implementations must not retry.
pub trait SwipeSubmitter {
    fn submit(
        &self,
        user_id: &str,
        target_user_id: &str,
        intent: SwipeIntent,
    ) -> impl Future<Output = Result<SwipeResponse, SubmissionError>> + Send;
}

impl<T: SwipeSubmitter + Sync> SwipeSubmitter for &T {
    fn submit(
        &self,
        user_id: &str,
        target_user_id: &str,
        intent: SwipeIntent,
    ) -> impl Future<Output = Result<SwipeResponse, SubmissionError>> + Send {
        (**self).submit(user_id, target_user_id, intent)
    }
}
