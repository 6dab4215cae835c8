//! The caller's identity as seen by the access engine.
//!
//! A [`ViewerContext`] is built once per request and never persisted. The
//! membership it carries has already been resolved against the clock, so the
//! engine itself stays deterministic.

use quire_persistence::tenant::TenantId;
use quire_persistence::types::{ArticleRecord, MembershipStatus};

/// An identified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerIdentity {
    user_id: String,
    tenant_id: TenantId,
    is_admin: bool,
    membership: MembershipStatus,
}

/// The caller of a single request.
///
/// # Examples
///
/// ```
/// use quire_access::ViewerContext;
/// use quire_persistence::tenant::TenantId;
/// use quire_persistence::types::{MembershipStatus, MembershipTier};
///
/// let anonymous = ViewerContext::anonymous();
/// assert!(!anonymous.membership_active());
///
/// let member = ViewerContext::user("reader-1", TenantId::new("acme"))
///     .with_membership(MembershipStatus::Active { tier: MembershipTier::Unlimited });
/// assert!(member.membership_active());
/// assert!(!member.is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerContext {
    /// No identity was presented.
    #[default]
    Anonymous,
    /// An identified user.
    User(ViewerIdentity),
}

impl ViewerContext {
    /// Creates an anonymous viewer.
    pub fn anonymous() -> Self {
        ViewerContext::Anonymous
    }

    /// Creates an identified, non-admin viewer without a membership.
    pub fn user(user_id: impl Into<String>, tenant_id: TenantId) -> Self {
        ViewerContext::User(ViewerIdentity {
            user_id: user_id.into(),
            tenant_id,
            is_admin: false,
            membership: MembershipStatus::Inactive,
        })
    }

    /// Sets the admin flag. Has no effect on anonymous viewers.
    pub fn with_admin(mut self, is_admin: bool) -> Self {
        if let ViewerContext::User(identity) = &mut self {
            identity.is_admin = is_admin;
        }
        self
    }

    /// Sets the resolved membership. Has no effect on anonymous viewers,
    /// which never hold a membership.
    pub fn with_membership(mut self, membership: MembershipStatus) -> Self {
        if let ViewerContext::User(identity) = &mut self {
            identity.membership = membership;
        }
        self
    }

    /// Returns true if no identity was presented.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, ViewerContext::Anonymous)
    }

    /// Returns the caller's user ID.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            ViewerContext::Anonymous => None,
            ViewerContext::User(identity) => Some(&identity.user_id),
        }
    }

    /// Returns the tenant the caller authenticated against.
    pub fn tenant_id(&self) -> Option<&TenantId> {
        match self {
            ViewerContext::Anonymous => None,
            ViewerContext::User(identity) => Some(&identity.tenant_id),
        }
    }

    /// Returns true if the caller is a tenant administrator.
    pub fn is_admin(&self) -> bool {
        matches!(self, ViewerContext::User(identity) if identity.is_admin)
    }

    /// Returns the caller's resolved membership.
    pub fn membership(&self) -> MembershipStatus {
        match self {
            ViewerContext::Anonymous => MembershipStatus::Inactive,
            ViewerContext::User(identity) => identity.membership,
        }
    }

    /// Returns true if the caller holds a current membership.
    pub fn membership_active(&self) -> bool {
        self.membership().is_active()
    }

    /// Returns true if the caller wrote the article.
    pub fn is_owner(&self, article: &ArticleRecord) -> bool {
        self.user_id() == Some(article.owner_id.as_str())
    }

    /// Returns true if the caller may bypass publication, review and tier
    /// gates for this article.
    ///
    /// Admin rights only count inside the admin's own tenant.
    pub fn has_management_override(&self, article: &ArticleRecord) -> bool {
        let admin_here = self.is_admin() && self.tenant_id() == Some(&article.tenant_id);
        admin_here || self.is_owner(article)
    }
}
