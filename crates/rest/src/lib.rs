//! # quire-rest - HTTP API for article access
//!
//! Serves articles to readers of a multi-tenant publishing platform. Each read
//! is resolved by [`quire_access`]: the article may come back in full, as a
//! preview, as a password prompt, or as a 404 that looks exactly like a
//! missing article.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quire_rest::{create_app, ServerConfig};
//! use quire_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("quire.db")?;
//!     backend.init_schema()?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | read | GET | `/articles/{id}?password=&includeMember=` |
//! | unlock | POST | `/articles/{id}/unlock` |
//! | health | GET | `/health` |
//! | liveness | GET | `/_liveness` |
//! | readiness | GET | `/_readiness` |
//!
//! ## HTTP Headers
//!
//! - `X-Tenant-ID` - Tenant identification (default from configuration)
//! - `X-User-ID` - Authenticated user, set by the gateway
//! - `X-User-Tenant` - The user's own tenant, set by the gateway
//! - `X-User-Roles` - Comma-separated roles, set by the gateway
//!
//! ## Response Shapes
//!
//! | Situation | Status | Body |
//! |-----------|--------|------|
//! | Full or preview | 200 | Projected article |
//! | Password outstanding | 200 | `passwordProtected=true`, `content=null` |
//! | Missing, unpublished, unapproved | 404 | `{"error":"not-found","message":"article not found"}` |
//! | Malformed tenant | 400 | `{"error":"invalid", ...}` |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and JSON error bodies
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration, engine)
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Identification headers
//! - [`extractors`] - Tenant and caller extractors
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use axum::extract::{MatchedPath, Request};
use quire_persistence::core::QuireStorage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{Span, debug_span, info};

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: QuireStorage + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use quire_rest::{create_app_with_config, ServerConfig};
/// use quire_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// backend.init_schema()?;
/// let config = ServerConfig {
///     default_tenant: "acme".to_string(),
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: QuireStorage + 'static,
{
    create_app_with_shared(Arc::new(storage), config)
}

/// Creates the Axum application over storage the caller keeps a handle to.
pub fn create_app_with_shared<S>(storage: Arc<S>, config: ServerConfig) -> Router
where
    S: QuireStorage + 'static,
{
    info!(
        backend = storage.name(),
        default_tenant = %config.default_tenant,
        "Creating article API"
    );

    let state = AppState::new(storage, config.clone());
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the span for one request.
///
/// Only the path is recorded. The query string of `GET /articles/{id}` may
/// carry an article password and must never reach the logs.
fn request_span(request: &Request) -> Span {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or("-");

    debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        route = route,
        version = ?request.version(),
    )
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` overrides
/// `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "quire_rest={level},quire_access={level},quire_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
