//! Route configuration and setup

use crate::constants::{MULTIPART_OVERHEAD_BYTES, UPLOADS_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post, MethodRouter},
    Json, Router,
};
use filedrop_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let body_limit = request_body_limit(config);

    tracing::info!(
        http_concurrency_limit = config.http_concurrency_limit(),
        request_body_limit = body_limit,
        listing_enabled = config.listing_enabled(),
        "Configuring HTTP routes"
    );

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(UPLOADS_PATH, uploads_route(config))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit()))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// The mutation is always mounted; the listing query only when enabled.
fn uploads_route(config: &Config) -> MethodRouter<Arc<AppState>> {
    let upload = post(handlers::uploads::upload_file).layer(DefaultBodyLimit::disable());

    if config.listing_enabled() {
        upload.get(handlers::uploads::list_uploads)
    } else {
        upload
    }
}

/// Outer bound on request bodies. The ingestion pipeline enforces the real
/// per-file limit, so this leaves room for multipart framing.
fn request_body_limit(config: &Config) -> usize {
    config
        .max_upload_size_bytes()
        .map(|limit| limit.saturating_add(MULTIPART_OVERHEAD_BYTES))
        .and_then(|limit| usize::try_from(limit).ok())
        .unwrap_or(usize::MAX)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
