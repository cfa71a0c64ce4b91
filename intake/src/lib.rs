//! # intake: file upload validation service
//!
//! `intake` accepts single-file uploads over HTTP and applies per-endpoint validation before
//! acknowledging success. Nothing is stored: each file lives only as long as the request that
//! carried it.
//!
//! ## Endpoints
//!
//! | Endpoint | Rule | Rejection |
//! |---|---|---|
//! | `POST /upload-csv` | content parses as CSV | 500 |
//! | `POST /upload-excel` | content parses as a workbook | 500 |
//! | `POST /upload-file` | at most 4096 bytes, name ends in `.txt` | 404 |
//! | `POST /upload-image` | declared type is png, jpg or jpeg | 422 |
//!
//! Every upload is sent as `multipart/form-data` with the file in a field named `file`. Success
//! is always `{"message": "File uploaded successfully."}`; failures are `{"detail": "..."}`.
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum). The [`api`] module turns a request
//! into an [`UploadedFile`] and hands it to the rules in [`validation`], which know nothing about
//! HTTP. Handlers decide which status code each rejection maps to. There is no shared mutable
//! state between requests.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use intake::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = intake::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     intake::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     Application::new(config)?
//!         .serve(async {
//!             tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!         })
//!         .await
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod config;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test;
#[cfg(test)]
pub mod test_utils;

use crate::config::CorsOrigin;
use crate::openapi::ApiDoc;
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
pub use config::Config;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
pub use types::{TabularFormat, UploadedFile};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Build the CORS layer, or `None` when no origins are configured.
fn create_cors_layer(config: &Config) -> anyhow::Result<Option<CorsLayer>> {
    let cors = &config.cors;
    if cors.allowed_origins.is_empty() {
        return Ok(None);
    }

    let allow_origin = if cors.allowed_origins.contains(&CorsOrigin::Wildcard) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Origins never carry a path, so drop the trailing slash Url adds
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(cors.allow_credentials);

    if let Some(max_age) = cors.max_age {
        layer = layer.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(Some(layer))
}

/// Build the application router.
///
/// The upload routes share a request body limit taken from `limits.max_body_size` (0 disables
/// it). Health, OpenAPI and docs routes sit outside that limit. A tracing layer wraps
/// everything, and CORS is added when origins are configured.
///
/// # Errors
///
/// Returns an error if a configured CORS origin is not a valid header value.
#[instrument(skip_all)]
pub fn build_router(config: &Config) -> anyhow::Result<Router> {
    let body_limit = match config.limits.max_body_size {
        0 => DefaultBodyLimit::disable(),
        limit => DefaultBodyLimit::max(usize::try_from(limit)?),
    };

    let upload_routes = Router::new()
        .route("/upload-csv", post(api::handlers::uploads::upload_csv))
        .route("/upload-excel", post(api::handlers::uploads::upload_excel))
        .route("/upload-file", post(api::handlers::uploads::upload_text_file))
        .route("/upload-image", post(api::handlers::uploads::upload_image))
        .layer(body_limit);

    let mut router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(upload_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    if let Some(cors_layer) = create_cors_layer(config)? {
        router = router.layer(cors_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The configured router plus the settings needed to serve it.
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting intake with configuration: {:#?}", config);

        let router = build_router(&config)?;
        Ok(Self { router, config })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests and flush telemetry.
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Intake listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
