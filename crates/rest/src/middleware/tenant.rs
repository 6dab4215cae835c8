//! Request identification headers.
//!
//! The tenant comes from `X-Tenant-ID`, or from the configured default. The
//! caller's identity is asserted by the upstream gateway through `X-User-ID`,
//! `X-User-Tenant` and `X-User-Roles`; this service trusts those headers and
//! never sees credentials.

use axum::{
    extract::Request,
    http::{HeaderMap, header::HeaderName},
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Header name for tenant identification.
pub static X_TENANT_ID: HeaderName = HeaderName::from_static("x-tenant-id");

/// Header carrying the authenticated user ID.
pub static X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");

/// Header carrying the tenant the authenticated user belongs to.
pub static X_USER_TENANT: HeaderName = HeaderName::from_static("x-user-tenant");

/// Header carrying the caller's comma-separated roles.
pub static X_USER_ROLES: HeaderName = HeaderName::from_static("x-user-roles");

/// Returns a header's value if present, valid UTF-8 and not blank.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Logs the identification headers of every request.
///
/// This can be used with `axum::middleware::from_fn`.
pub async fn tenant_middleware(request: Request, next: Next) -> Response {
    let headers = request.headers();
    debug!(
        tenant_id = header_str(headers, &X_TENANT_ID).unwrap_or("-"),
        user_id = header_str(headers, &X_USER_ID).unwrap_or("-"),
        path = %request.uri().path(),
        "Incoming request"
    );

    next.run(request).await
}
