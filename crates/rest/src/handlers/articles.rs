//! Article read and unlock handlers.
//!
//! Both endpoints run the same flow: load the article for the request's
//! tenant, resolve the caller's membership, run the access engine, project the
//! result, and apply the tenant's copy policy. They differ only in where the
//! password comes from.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use quire_access::{PublicArticleView, ViewerContext, apply_copy_policy, project};
use quire_persistence::core::QuireStorage;
use quire_persistence::tenant::TenantId;
use quire_persistence::types::{MembershipStatus, TenantProtectionPolicy};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::extractors::{CallerExtractor, TenantExtractor};
use crate::state::AppState;

/// Query parameters of `GET /articles/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadArticleQuery {
    /// Article password, if the reader has one.
    pub password: Option<String>,
    /// Whether member content should be attached (default true).
    pub include_member: Option<bool>,
}

/// Body of `POST /articles/{id}/unlock`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockArticleRequest {
    /// Article password.
    pub password: Option<String>,
    /// Whether member content should be attached (default true).
    pub include_member: Option<bool>,
}

/// Handler for reading an article.
///
/// # HTTP Request
///
/// `GET /articles/{id}?password=...&includeMember=true`
///
/// # Headers
///
/// - `X-Tenant-ID` - Tenant (default from configuration)
/// - `X-User-ID` - Authenticated user, absent for anonymous readers
/// - `X-User-Tenant` - Tenant the user belongs to; required for admin rights
/// - `X-User-Roles` - Comma-separated roles; `admin` grants tenant admin
///
/// # Response
///
/// - `200 OK` - Projected article, possibly a preview or a password prompt
/// - `400 Bad Request` - Malformed tenant ID or query string
/// - `404 Not Found` - Article missing or hidden from the caller
pub async fn read_article_handler<S>(
    State(state): State<AppState<S>>,
    tenant: TenantExtractor,
    caller: CallerExtractor,
    Path(id): Path<String>,
    query: Result<Query<ReadArticleQuery>, QueryRejection>,
) -> RestResult<Response>
where
    S: QuireStorage + 'static,
{
    let Query(query) = query?;
    debug!(id = %id, tenant = %tenant, "Processing article read");

    serve_article(
        &state,
        tenant.into_tenant_id(),
        caller,
        &id,
        query.password,
        query.include_member.unwrap_or(true),
    )
    .await
}

/// Handler for unlocking a password-protected article.
///
/// # HTTP Request
///
/// `POST /articles/{id}/unlock` with `{"password": "...", "includeMember": true}`
///
/// Responses match [`read_article_handler`]. A wrong password yields `200`
/// with `passwordVerified=false` and the reason "incorrect password". A
/// malformed body is `400`, a body without a JSON content type `415`.
pub async fn unlock_article_handler<S>(
    State(state): State<AppState<S>>,
    tenant: TenantExtractor,
    caller: CallerExtractor,
    Path(id): Path<String>,
    body: Result<Json<UnlockArticleRequest>, JsonRejection>,
) -> RestResult<Response>
where
    S: QuireStorage + 'static,
{
    let Json(body) = body?;
    debug!(id = %id, tenant = %tenant, "Processing article unlock");

    serve_article(
        &state,
        tenant.into_tenant_id(),
        caller,
        &id,
        body.password,
        body.include_member.unwrap_or(true),
    )
    .await
}

async fn serve_article<S>(
    state: &AppState<S>,
    tenant: TenantId,
    caller: CallerExtractor,
    id: &str,
    password: Option<String>,
    include_member: bool,
) -> RestResult<Response>
where
    S: QuireStorage + 'static,
{
    let Some(article) = state.storage().get(&tenant, id).await? else {
        debug!(id = %id, tenant = %tenant, "Article not found");
        return Err(RestError::NotFound);
    };

    let viewer = resolve_viewer(state, &tenant, caller).await;
    let decision = state.engine().resolve(&article, &viewer, password.as_deref());

    if decision.is_denied() {
        debug!(id = %id, tenant = %tenant, "Article hidden from caller");
        return Err(RestError::NotFound);
    }

    let policy = load_policy(state, &tenant).await;
    let view: PublicArticleView = project(
        &article,
        &decision,
        &state.projection_options(include_member),
    )
    .with_copy_protection(apply_copy_policy(&article, &policy));

    if decision.should_count_view() && state.count_views() {
        spawn_view_increment(state.storage_arc(), tenant, id.to_string());
    }

    // Decisions depend on the caller, so responses must not be shared.
    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, HeaderValue::from_static("private, no-store"))],
        Json(view),
    )
        .into_response())
}

/// Builds the viewer, treating a failed membership lookup as no membership.
async fn resolve_viewer<S: QuireStorage>(
    state: &AppState<S>,
    tenant: &TenantId,
    caller: CallerExtractor,
) -> ViewerContext {
    let membership = match caller.user_id() {
        None => MembershipStatus::Inactive,
        Some(user_id) => match state.storage().get_membership(tenant, user_id).await {
            Ok(Some(record)) => record.status_at(Utc::now()),
            Ok(None) => MembershipStatus::Inactive,
            Err(e) => {
                warn!(
                    tenant = %tenant,
                    user_id = %user_id,
                    error = %e,
                    "Membership lookup failed, treating caller as non-member"
                );
                MembershipStatus::Inactive
            }
        },
    };

    caller.into_viewer(tenant.clone(), membership)
}

/// Loads the tenant policy, falling back to the default on failure.
async fn load_policy<S: QuireStorage>(
    state: &AppState<S>,
    tenant: &TenantId,
) -> TenantProtectionPolicy {
    match state.storage().get_policy(tenant).await {
        Ok(policy) => policy,
        Err(e) => {
            warn!(
                tenant = %tenant,
                error = %e,
                "Tenant policy lookup failed, using default policy"
            );
            TenantProtectionPolicy::default()
        }
    }
}

/// Increments the view counter without waiting for the result.
///
/// Failures are logged and dropped.
fn spawn_view_increment<S>(storage: Arc<S>, tenant: TenantId, id: String)
where
    S: QuireStorage + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = storage.increment_view_count(&tenant, &id).await {
            warn!(tenant = %tenant, id = %id, error = %e, "Failed to increment view count");
        }
    });
}
