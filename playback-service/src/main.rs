/// Playback Service - HTTP Server
///
/// Resolves playable URLs for the site's video archive and livestream
/// replays: verifies viewer identity, checks video visibility against the
/// catalog, and mints signed expiring media URLs.
use actix_web::{middleware as actix_middleware, web, App, HttpResponse, HttpServer};
use playback_service::handlers;
use playback_service::services::{FunctionsCatalog, PlaybackAuthorizer, TokenVerifier, UrlSigner};
use playback_service::Config;
use remote_call::FunctionsClient;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    println!(
        "🎬 Playback Service starting HTTP server on {}",
        bind_address
    );

    let functions = FunctionsClient::new(config.functions.base_url.clone());
    let catalog = Arc::new(FunctionsCatalog::new(
        functions,
        config.functions.max_wait_secs,
    ));
    let authorizer = web::Data::new(PlaybackAuthorizer::new(
        catalog,
        TokenVerifier::new(config.auth.jwt_secret.clone()),
        UrlSigner::new(
            config.signing.secret.clone(),
            config.signing.media_domain.clone(),
        ),
        config.signing.url_ttl_secs,
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(authorizer.clone())
            .wrap(actix_middleware::Logger::default())
            .route(
                "/api/v1/health",
                web::get()
                    .to(|| async { HttpResponse::Ok().json(serde_json::json!({"status": "ok"})) }),
            )
            .route(
                "/api/v1/health/ready",
                web::get().to(|| async { HttpResponse::Ok().finish() }),
            )
            .route(
                "/api/v1/health/live",
                web::get().to(|| async { HttpResponse::Ok().finish() }),
            )
            .configure(handlers::configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
