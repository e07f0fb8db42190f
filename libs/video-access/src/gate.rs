/// The access gate: dispatch, settle, and supersede authorization requests
use parking_lot::RwLock;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::types::{AccessError, AuthorizationRequest, AuthorizationResult, ViewerContext};

/// Observable resolution state.
///
/// `src_url` starts empty; `is_checking` is true strictly between request
/// dispatch and settlement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub src_url: String,
    pub is_checking: bool,
}

/// Resolves a playable URL for a viewer/video pair.
///
/// Each call to [`refresh`](VideoAccessGate::refresh) issues at most one
/// authorization request (no retry here). Requests carry a monotonically
/// increasing generation; a settlement whose generation is no longer the
/// latest leaves the state untouched, so a slow superseded response can
/// neither overwrite `src_url` nor clear a newer request's checking flag.
#[derive(Clone)]
pub struct VideoAccessGate {
    endpoint: String,
    http: Client,
    state: Arc<RwLock<PlaybackState>>,
    generation: Arc<AtomicU64>,
}

impl VideoAccessGate {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self::with_client(endpoint, http)
    }

    pub fn with_client(endpoint: impl Into<String>, http: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
            state: Arc::new(RwLock::new(PlaybackState::default())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the current resolution state.
    pub fn state(&self) -> PlaybackState {
        self.state.read().clone()
    }

    /// Re-run resolution for the given dependencies.
    ///
    /// Does nothing until the identity layer reports initialized and a video
    /// id is supplied. Errors propagate to the caller; the gate keeps no
    /// internal error state and leaves `src_url` unchanged on failure.
    pub async fn refresh(
        &self,
        ctx: &ViewerContext,
        video_id: Option<&str>,
    ) -> Result<(), AccessError> {
        let Some(video_id) = video_id else {
            return Ok(());
        };
        if !ctx.initialized {
            return Ok(());
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().is_checking = true;

        let request = AuthorizationRequest::for_viewer(ctx, video_id);
        debug!("requesting playback authorization for video {}", video_id);

        let outcome = self.authorize(&request).await;

        {
            let mut state = self.state.write();
            if self.generation.load(Ordering::SeqCst) == generation {
                state.is_checking = false;
                if let Ok(result) = &outcome {
                    state.src_url = result.src_url.clone();
                }
            } else {
                debug!(
                    "discarding superseded authorization response for video {}",
                    video_id
                );
            }
        }

        outcome.map(|_| ())
    }

    async fn authorize(
        &self,
        request: &AuthorizationRequest,
    ) -> Result<AuthorizationResult, AccessError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AccessError::Denied {
                status: status.as_u16(),
            });
        }

        response
            .json::<AuthorizationResult>()
            .await
            .map_err(|e| AccessError::Decode(e.to_string()))
    }
}
