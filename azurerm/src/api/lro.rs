//! Long-running operation handle
//!
//! Asynchronous mutations (delete in particular) answer 202 with an
//! Azure-AsyncOperation URL. The handle polls that URL until the backend
//! reports a terminal status. This is the only wait primitive in the SDK
//! layer; callers propagate its errors verbatim.

use serde::Deserialize;
use std::time::Duration;

use super::client::Client;
use super::error::ApiError;

const POLL_INTERVAL_SECS: u64 = 2;
const DEFAULT_WAIT_SECS: u64 = 300;

#[derive(Debug, Deserialize)]
struct OperationStatus {
    status: String,
}

enum OperationState {
    Completed,
    Pending { client: Client, poll_url: String },
}

/// Handle for an in-flight backend mutation
pub struct LongRunningOperation {
    state: OperationState,
}

impl LongRunningOperation {
    pub(crate) fn completed() -> Self {
        Self {
            state: OperationState::Completed,
        }
    }

    pub(crate) fn pending(client: Client, poll_url: String) -> Self {
        Self {
            state: OperationState::Pending { client, poll_url },
        }
    }

    /// Block until the backend reports a terminal status, with the default
    /// deadline
    pub async fn wait_for_completion(self) -> Result<(), ApiError> {
        self.wait_for_completion_within(Duration::from_secs(DEFAULT_WAIT_SECS))
            .await
    }

    /// Block until the backend reports a terminal status.
    /// "Succeeded" resolves the wait; "Failed"/"Canceled" and deadline
    /// exhaustion are errors.
    pub async fn wait_for_completion_within(self, deadline: Duration) -> Result<(), ApiError> {
        let (client, poll_url) = match self.state {
            OperationState::Completed => return Ok(()),
            OperationState::Pending { client, poll_url } => (client, poll_url),
        };

        let started = tokio::time::Instant::now();
        loop {
            let (status, retry_after): (OperationStatus, _) =
                client.get_absolute(&poll_url).await?;
            tracing::debug!(url = %poll_url, status = %status.status, "polled operation");

            match status.status.as_str() {
                "Succeeded" => return Ok(()),
                "Failed" | "Canceled" => {
                    return Err(ApiError::OperationFailed {
                        url: poll_url,
                        status: status.status,
                    })
                }
                _ => {}
            }

            if started.elapsed() >= deadline {
                return Err(ApiError::OperationTimeout {
                    url: poll_url,
                    seconds: deadline.as_secs(),
                });
            }

            // Retry-After hint wins over the default interval
            let interval =
                retry_after.unwrap_or_else(|| Duration::from_secs(POLL_INTERVAL_SECS));
            tokio::time::sleep(interval).await;
        }
    }
}
