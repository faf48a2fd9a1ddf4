use filedock_api::{
    health, index, list_files,
    middleware::{log_request, panic_response},
    serve_file, stylesheet, AppState,
};
use filedock_config::ServerSettings;
use axum::{http::StatusCode, middleware, routing::get, Router};
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::{
        predicate::{DefaultPredicate, NotForContentType, Predicate},
        CompressionLayer,
    },
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};

pub fn build(settings: &ServerSettings, app_state: AppState) -> Router {
    let timeout = Duration::from_secs(settings.timeout_secs);

    // Unsupported methods on fixed routes get the same JSON 404 as unknown paths.
    let mut router = Router::new()
        .route("/", get(index).fallback(serve_file))
        .route("/health", get(health).fallback(serve_file))
        .route("/api/files", get(list_files).fallback(serve_file))
        .route("/style.css", get(stylesheet).fallback(serve_file))
        .fallback(serve_file)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(ConcurrencyLimitLayer::new(settings.max_concurrent_requests))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout));

    // Installers and archives are already compressed
    if settings.enable_compression {
        let predicate = DefaultPredicate::new()
            .and(NotForContentType::const_new("application/octet-stream"))
            .and(NotForContentType::const_new("application/zip"))
            .and(NotForContentType::const_new("application/gzip"))
            .and(NotForContentType::const_new("application/x-gzip"));
        router = router.layer(CompressionLayer::new().compress_when(predicate));
    }

    router
        .layer(build_cors_layer(&settings.allowed_origins))
        .layer(middleware::from_fn(log_request))
        .with_state(app_state)
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
