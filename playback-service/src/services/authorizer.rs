/// Playback authorization decisions
use std::sync::Arc;
use tracing::info;
use video_access::AuthorizationRequest;

use crate::error::{AppError, Result};
use crate::services::catalog::{VideoCatalog, Visibility};
use crate::services::token::TokenVerifier;
use crate::services::url_signer::UrlSigner;

pub struct PlaybackAuthorizer {
    catalog: Arc<dyn VideoCatalog>,
    verifier: TokenVerifier,
    signer: UrlSigner,
    url_ttl_secs: u64,
}

impl PlaybackAuthorizer {
    pub fn new(
        catalog: Arc<dyn VideoCatalog>,
        verifier: TokenVerifier,
        signer: UrlSigner,
        url_ttl_secs: u64,
    ) -> Self {
        Self {
            catalog,
            verifier,
            signer,
            url_ttl_secs,
        }
    }

    /// Resolve a request to a signed playable URL, or refuse.
    pub async fn authorize(&self, request: &AuthorizationRequest) -> Result<String> {
        let (video_id, viewer) = match request {
            AuthorizationRequest::Authenticated {
                video_id,
                user_id,
                id_token,
            } => {
                if video_id.is_empty() || user_id.is_empty() || id_token.is_empty() {
                    return Err(AppError::ValidationError(
                        "videoId, userId and idToken are all required".to_string(),
                    ));
                }
                let claims = self.verifier.verify(id_token)?;
                if claims.sub != *user_id {
                    return Err(AppError::Unauthorized(
                        "id token does not belong to this user".to_string(),
                    ));
                }
                (video_id.as_str(), Some(claims.sub))
            }
            AuthorizationRequest::Public {
                video_id,
                public_access,
            } => {
                if video_id.is_empty() {
                    return Err(AppError::ValidationError("videoId is required".to_string()));
                }
                if !public_access {
                    return Err(AppError::ValidationError(
                        "publicAccess must be true for anonymous requests".to_string(),
                    ));
                }
                (video_id.as_str(), None)
            }
        };

        let video = self
            .catalog
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("video {} not found", video_id)))?;

        // Unpublished videos are indistinguishable from missing ones.
        if !video.published {
            return Err(AppError::NotFound(format!("video {} not found", video_id)));
        }

        match video.visibility {
            Visibility::Public => {}
            Visibility::Members => {
                if viewer.is_none() {
                    return Err(AppError::Forbidden(
                        "this video is available to members only".to_string(),
                    ));
                }
            }
        }

        let src_url = self.signer.sign(&video.asset_key, self.url_ttl_secs)?;
        info!(
            "authorized playback: video_id={}, viewer={}",
            video_id,
            viewer.as_deref().unwrap_or("anonymous")
        );
        Ok(src_url)
    }
}
