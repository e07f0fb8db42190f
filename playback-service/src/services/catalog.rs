/// Video catalog facade over the document store's remote functions
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use remote_call::{FunctionsClient, RetryPolicy};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};

/// Who may play a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Members,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub asset_key: String,
    pub visibility: Visibility,
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait VideoCatalog: Send + Sync {
    /// Look up a video document; `Ok(None)` when it does not exist.
    async fn get_video(&self, video_id: &str) -> Result<Option<VideoRecord>>;
}

/// Production catalog backed by the `getVideo` remote function.
pub struct FunctionsCatalog {
    functions: FunctionsClient,
    policy: RetryPolicy,
}

impl FunctionsCatalog {
    pub fn new(functions: FunctionsClient, max_wait_secs: u64) -> Self {
        Self {
            functions,
            policy: RetryPolicy::with_max_wait_secs(max_wait_secs),
        }
    }
}

#[async_trait]
impl VideoCatalog for FunctionsCatalog {
    async fn get_video(&self, video_id: &str) -> Result<Option<VideoRecord>> {
        let argument = json!({ "videoId": video_id });
        let value = self
            .functions
            .call_with_retry("getVideo", Some(&argument), self.policy.clone())
            .await?;

        if value.is_null() {
            return Ok(None);
        }

        let record = serde_json::from_value(value).map_err(|e| {
            AppError::Upstream(format!("getVideo returned an unusable document: {}", e))
        })?;
        Ok(Some(record))
    }
}
