//! HTTP handlers for the playback service
use actix_web::{web, HttpResponse};
use video_access::{AuthorizationRequest, AuthorizationResult};

use crate::error::Result;
use crate::services::PlaybackAuthorizer;

/// Resolve a playable URL for a viewer/video pair
pub async fn authorize_playback(
    authorizer: web::Data<PlaybackAuthorizer>,
    request: web::Json<AuthorizationRequest>,
) -> Result<HttpResponse> {
    let src_url = authorizer.authorize(&request).await?;
    Ok(HttpResponse::Ok().json(AuthorizationResult { src_url }))
}

/// Configure routes for the playback service
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/playback").route("/authorize", web::post().to(authorize_playback)),
    );
}
