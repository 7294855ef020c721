//! Submission transports.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The payload sent for a valid form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    pub id: Uuid,
    /// Trimmed field values keyed by field name.
    #[serde(flatten)]
    pub values: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
}

impl FormSubmission {
    #[must_use]
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            values,
            timestamp: Utc::now(),
        }
    }
}

/// A transport failed to deliver a submission.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// Delivers form submissions.
pub trait SubmitTransport {
    fn send(
        &self,
        submission: &FormSubmission,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Accepts every submission after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    /// Delay used when none is configured.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl SubmitTransport for SimulatedTransport {
    async fn send(&self, submission: &FormSubmission) -> Result<(), TransportError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(
            submission_id = %submission.id,
            fields = submission.values.len(),
            "Form submitted"
        );
        Ok(())
    }
}
