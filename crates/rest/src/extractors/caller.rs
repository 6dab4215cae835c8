//! Caller identity extractor.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use quire_access::ViewerContext;
use quire_persistence::tenant::TenantId;
use quire_persistence::types::MembershipStatus;

use crate::middleware::tenant::{X_USER_ID, X_USER_ROLES, X_USER_TENANT, header_str};

/// Role granting tenant administration.
pub const ADMIN_ROLE: &str = "admin";

/// Identity asserted by the gateway headers.
///
/// Membership is not part of the headers; handlers load it from storage and
/// combine the two with [`CallerExtractor::into_viewer`].
///
/// `X-Tenant-ID` only selects which tenant is being read. The caller's own
/// tenant comes from `X-User-Tenant`, and admin rights require it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerExtractor {
    user_id: Option<String>,
    home_tenant: Option<TenantId>,
    roles: Vec<String>,
}

impl CallerExtractor {
    /// An anonymous caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Parses the identity headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let user_id = header_str(headers, &X_USER_ID).map(str::to_owned);
        let home_tenant =
            header_str(headers, &X_USER_TENANT).and_then(|raw| TenantId::parse(raw).ok());
        let roles = header_str(headers, &X_USER_ROLES)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_ascii_lowercase)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            user_id,
            home_tenant,
            roles,
        }
    }

    /// Returns the user ID, if identified.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Returns the tenant the caller belongs to, if asserted.
    pub fn home_tenant(&self) -> Option<&TenantId> {
        self.home_tenant.as_ref()
    }

    /// Returns true if the caller carries the admin role.
    ///
    /// Roles are ignored for anonymous callers and for callers without a
    /// home tenant.
    pub fn is_admin(&self) -> bool {
        self.user_id.is_some()
            && self.home_tenant.is_some()
            && self.roles.iter().any(|r| r == ADMIN_ROLE)
    }

    /// Builds the viewer for a request against `tenant`.
    ///
    /// The viewer belongs to the caller's home tenant when one is asserted,
    /// so an admin reading another tenant gets no override there.
    pub fn into_viewer(self, tenant: TenantId, membership: MembershipStatus) -> ViewerContext {
        let is_admin = self.is_admin();
        match self.user_id {
            None => ViewerContext::anonymous(),
            Some(user_id) => ViewerContext::user(user_id, self.home_tenant.unwrap_or(tenant))
                .with_admin(is_admin)
                .with_membership(membership),
        }
    }
}

impl<S> FromRequestParts<S> for CallerExtractor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
