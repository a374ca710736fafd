//! Trait abstraction for the submission client to enable mocking in tests

use super::client::TransportError;
use crate::state::FeedbackPayload;
use async_trait::async_trait;

/// Sends one completed form to the remote spreadsheet endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// POST the payload once. Resolves with `Ok(())` only when the endpoint
    /// answered with a success envelope.
    async fn submit(&self, endpoint: &str, payload: &FeedbackPayload)
        -> Result<(), TransportError>;
}
