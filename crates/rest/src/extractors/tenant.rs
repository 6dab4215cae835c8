//! Tenant extractor.
//!
//! Reads the tenant from the X-Tenant-ID header, falling back to the
//! configured default tenant.

use axum::{extract::FromRequestParts, http::request::Parts};
use quire_persistence::core::QuireStorage;
use quire_persistence::tenant::TenantId;

use crate::error::RestError;
use crate::middleware::tenant::{X_TENANT_ID, header_str};
use crate::state::AppState;

/// Axum extractor for the request's tenant.
///
/// # Example
///
/// ```rust,ignore
/// use quire_rest::extractors::TenantExtractor;
///
/// async fn handler(tenant: TenantExtractor) {
///     println!("Tenant ID: {}", tenant.tenant_id());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TenantExtractor {
    tenant_id: TenantId,
}

impl TenantExtractor {
    /// Creates a new TenantExtractor with the given tenant ID.
    pub fn new(tenant_id: TenantId) -> Self {
        Self { tenant_id }
    }

    /// Returns the tenant ID.
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Consumes the extractor and returns the tenant ID.
    pub fn into_tenant_id(self) -> TenantId {
        self.tenant_id
    }
}

impl std::fmt::Display for TenantExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tenant_id)
    }
}

/// Resolves the tenant from headers, validating an explicit header value.
fn resolve_tenant(parts: &Parts, default: &TenantId) -> Result<TenantId, RestError> {
    match header_str(&parts.headers, &X_TENANT_ID) {
        Some(raw) => TenantId::parse(raw).map_err(RestError::from),
        None => Ok(default.clone()),
    }
}

impl<S> FromRequestParts<AppState<S>> for TenantExtractor
where
    S: QuireStorage,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        resolve_tenant(parts, state.default_tenant()).map(TenantExtractor::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(tenant: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/articles/a-1");
        if let Some(t) = tenant {
            builder = builder.header("x-tenant-id", t);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_header_tenant_wins() {
        let tenant = resolve_tenant(&parts(Some("acme")), &TenantId::new("default")).unwrap();
        assert_eq!(tenant.as_str(), "acme");
    }

    #[test]
    fn test_missing_header_uses_default() {
        let tenant = resolve_tenant(&parts(None), &TenantId::new("default")).unwrap();
        assert_eq!(tenant.as_str(), "default");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let err = resolve_tenant(&parts(Some("bad tenant!")), &TenantId::new("default"))
            .unwrap_err();
        assert!(matches!(err, RestError::BadRequest { .. }));
    }
}
