//! Storage traits consumed by the access layer.
//!
//! Each trait covers one collaborator: article rows, tenant protection
//! policies, and memberships. All lookups take a [`TenantId`], so a caller
//! cannot read another tenant's rows by guessing an ID.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::tenant::TenantId;
use crate::types::{ArticleRecord, MembershipRecord, TenantProtectionPolicy};

/// Storage for article rows.
///
/// # Example
///
/// ```ignore
/// use quire_persistence::core::ArticleStore;
/// use quire_persistence::tenant::TenantId;
///
/// async fn example<S: ArticleStore>(store: &S) -> StorageResult<()> {
///     let tenant = TenantId::parse("acme")?;
///     if let Some(article) = store.get(&tenant, "a-1").await? {
///         store.increment_view_count(&tenant, &article.id).await?;
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Reads an article by ID within a tenant.
    ///
    /// Returns `None` when no article with this ID exists for the tenant,
    /// including when the ID belongs to a different tenant.
    async fn get(&self, tenant: &TenantId, id: &str) -> StorageResult<Option<ArticleRecord>>;

    /// Inserts or replaces an article row.
    async fn put(&self, article: &ArticleRecord) -> StorageResult<()>;

    /// Atomically adds one to an article's view count.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If the article does not exist
    async fn increment_view_count(&self, tenant: &TenantId, id: &str) -> StorageResult<()>;
}

/// Storage for tenant protection policies.
#[async_trait]
pub trait TenantPolicyStore: Send + Sync {
    /// Returns the tenant's protection policy.
    ///
    /// Tenants without saved settings get [`TenantProtectionPolicy::default`].
    async fn get_policy(&self, tenant: &TenantId) -> StorageResult<TenantProtectionPolicy>;

    /// Saves the tenant's protection policy.
    async fn put_policy(
        &self,
        tenant: &TenantId,
        policy: &TenantProtectionPolicy,
    ) -> StorageResult<()>;
}

/// Storage for reader memberships.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Returns the user's membership in the tenant, if any, expired or not.
    async fn get_membership(
        &self,
        tenant: &TenantId,
        user_id: &str,
    ) -> StorageResult<Option<MembershipRecord>>;

    /// Inserts or replaces a membership.
    async fn put_membership(&self, membership: &MembershipRecord) -> StorageResult<()>;
}
