//! Article route configuration.

use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use quire_persistence::core::QuireStorage;

use crate::handlers;
use crate::middleware::tenant::tenant_middleware;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// ## Probes
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe (checks storage)
///
/// ## Articles
/// - `GET /articles/{id}` - Read, with optional `password` and `includeMember`
/// - `POST /articles/{id}/unlock` - Read with the password in the body
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: QuireStorage + 'static,
{
    let articles = Router::new()
        .route("/articles/{id}", get(handlers::read_article_handler::<S>))
        .route(
            "/articles/{id}/unlock",
            post(handlers::unlock_article_handler::<S>),
        )
        .layer(middleware::from_fn(tenant_middleware));

    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        .merge(articles)
        .with_state(state)
}
