/// HTTP client for named remote functions
///
/// Calls travel in a `data` envelope: `POST {base_url}/{name}` with
/// `{"data": <argument>}`, answered by a 2xx `{"data": <value>}`. Non-2xx
/// statuses and undecodable bodies reject.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, warn};

use crate::retry::{with_deadline_retry, RetryPolicy};

#[derive(Debug, thiserror::Error)]
pub enum FunctionsError {
    #[error("remote function request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("remote function '{function}' returned status {status}: {body}")]
    Status {
        function: String,
        status: u16,
        body: String,
    },

    #[error("remote function '{function}' returned an unusable payload: {detail}")]
    Payload { function: String, detail: String },

    #[error("remote function '{function}' failed after {attempts} attempts")]
    Exhausted {
        function: String,
        attempts: u32,
        errors: Vec<FunctionsError>,
    },
}

#[derive(Serialize)]
struct CallEnvelope<'a> {
    data: Option<&'a Value>,
}

#[derive(Deserialize)]
struct ResultEnvelope {
    data: Value,
}

/// Client for the remote-functions endpoint
#[derive(Clone)]
pub struct FunctionsClient {
    base_url: String,
    http: Client,
}

impl FunctionsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Invoke a named remote function once, without retry.
    pub async fn call(
        &self,
        function: &str,
        argument: Option<&Value>,
    ) -> Result<Value, FunctionsError> {
        let url = format!("{}/{}", self.base_url, function);
        let response = self
            .http
            .post(&url)
            .json(&CallEnvelope { data: argument })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FunctionsError::Status {
                function: function.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ResultEnvelope =
            response.json().await.map_err(|e| FunctionsError::Payload {
                function: function.to_string(),
                detail: e.to_string(),
            })?;

        Ok(envelope.data)
    }

    /// Invoke a named remote function, retrying transient failures until the
    /// policy's time budget is spent.
    ///
    /// On exhaustion the aggregate error carries the function name, the
    /// attempt count, and every underlying error in order.
    pub async fn call_with_retry(
        &self,
        function: &str,
        argument: Option<&Value>,
        policy: RetryPolicy,
    ) -> Result<Value, FunctionsError> {
        let client = &*self;
        let outcome = with_deadline_retry(policy, || async move {
            match client.call(function, argument).await {
                Ok(value) => Ok(value),
                Err(e) => {
                    warn!("remote function '{}' attempt failed: {}", function, e);
                    Err(e)
                }
            }
        })
        .await;

        outcome.map_err(|exhausted| {
            error!(
                "remote function '{}' failed after {} attempts",
                function, exhausted.attempts
            );
            FunctionsError::Exhausted {
                function: function.to_string(),
                attempts: exhausted.attempts,
                errors: exhausted.errors,
            }
        })
    }
}
