//! Store trait implementations for SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};

use crate::core::{ArticleStore, MembershipStore, TenantPolicyStore};
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::tenant::TenantId;
use crate::types::{
    ArticleRecord, ArticleStatus, CopyPolicyMode, MembershipRecord, MembershipTier, ReviewStatus,
    TenantProtectionPolicy,
};

use super::SqliteBackend;
use super::backend::internal_error;

fn serialization_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::SerializationError { message })
}

fn parse_timestamp(column: &str, value: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| serialization_error(format!("Invalid {} '{}': {}", column, value, e)))
}

/// Raw column values of an `articles` row, before domain decoding.
struct ArticleRow {
    tenant_id: String,
    id: String,
    owner_id: String,
    title: String,
    summary: Option<String>,
    content: Option<String>,
    member_content: Option<String>,
    preview_content: Option<String>,
    status: i64,
    review_status: i64,
    access_level: i64,
    enable_tiered_read: bool,
    password_hash: Option<String>,
    allow_copy: bool,
    watermark: bool,
    view_count: i64,
    created_at: String,
    updated_at: String,
}

const ARTICLE_COLUMNS: &str = "tenant_id, id, owner_id, title, summary, content, member_content,
     preview_content, status, review_status, access_level, enable_tiered_read, password_hash,
     allow_copy, watermark, view_count, created_at, updated_at";

impl ArticleRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            tenant_id: row.get(0)?,
            id: row.get(1)?,
            owner_id: row.get(2)?,
            title: row.get(3)?,
            summary: row.get(4)?,
            content: row.get(5)?,
            member_content: row.get(6)?,
            preview_content: row.get(7)?,
            status: row.get(8)?,
            review_status: row.get(9)?,
            access_level: row.get(10)?,
            enable_tiered_read: row.get(11)?,
            password_hash: row.get(12)?,
            allow_copy: row.get(13)?,
            watermark: row.get(14)?,
            view_count: row.get(15)?,
            created_at: row.get(16)?,
            updated_at: row.get(17)?,
        })
    }

    fn into_record(self) -> StorageResult<ArticleRecord> {
        let access_level = u32::try_from(self.access_level).map_err(|_| {
            serialization_error(format!("Invalid access_level {}", self.access_level))
        })?;
        let view_count = u64::try_from(self.view_count)
            .map_err(|_| serialization_error(format!("Invalid view_count {}", self.view_count)))?;

        Ok(ArticleRecord {
            id: self.id,
            tenant_id: TenantId::new(self.tenant_id),
            owner_id: self.owner_id,
            title: self.title,
            summary: self.summary,
            content: self.content,
            member_content: self.member_content,
            preview_content: self.preview_content,
            status: ArticleStatus::try_from(self.status)?,
            review_status: ReviewStatus::try_from(self.review_status)?,
            access_level,
            enable_tiered_read: self.enable_tiered_read,
            password_hash: self.password_hash.filter(|h| !h.is_empty()),
            allow_copy: self.allow_copy,
            watermark: self.watermark,
            view_count,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
        })
    }
}

#[async_trait]
impl ArticleStore for SqliteBackend {
    async fn get(&self, tenant: &TenantId, id: &str) -> StorageResult<Option<ArticleRecord>> {
        let conn = self.get_connection()?;

        let row = conn
            .query_row(
                &format!(
                    "SELECT {} FROM articles WHERE tenant_id = ?1 AND id = ?2",
                    ARTICLE_COLUMNS
                ),
                params![tenant.as_str(), id],
                ArticleRow::from_row,
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read article: {}", e)))?;

        row.map(ArticleRow::into_record).transpose()
    }

    async fn put(&self, article: &ArticleRecord) -> StorageResult<()> {
        let conn = self.get_connection()?;

        let view_count = i64::try_from(article.view_count)
            .map_err(|_| serialization_error(format!("Invalid view_count {}", article.view_count)))?;

        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO articles ({})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                ARTICLE_COLUMNS
            ),
            params![
                article.tenant_id.as_str(),
                article.id,
                article.owner_id,
                article.title,
                article.summary,
                article.content,
                article.member_content,
                article.preview_content,
                article.status.code(),
                article.review_status.code(),
                i64::from(article.access_level),
                article.enable_tiered_read,
                article.password_hash(),
                article.allow_copy,
                article.watermark,
                view_count,
                article.created_at.to_rfc3339(),
                article.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| internal_error(format!("Failed to write article: {}", e)))?;

        Ok(())
    }

    async fn increment_view_count(&self, tenant: &TenantId, id: &str) -> StorageResult<()> {
        let conn = self.get_connection()?;

        let updated = conn
            .execute(
                "UPDATE articles SET view_count = view_count + 1 WHERE tenant_id = ?1 AND id = ?2",
                params![tenant.as_str(), id],
            )
            .map_err(|e| internal_error(format!("Failed to increment view count: {}", e)))?;

        if updated == 0 {
            return Err(StorageError::Resource(ResourceError::NotFound {
                kind: "article",
                tenant_id: tenant.clone(),
                id: id.to_string(),
            }));
        }

        Ok(())
    }
}

#[async_trait]
impl TenantPolicyStore for SqliteBackend {
    async fn get_policy(&self, tenant: &TenantId) -> StorageResult<TenantProtectionPolicy> {
        let conn = self.get_connection()?;

        let row: Option<(String, bool)> = conn
            .query_row(
                "SELECT copy_mode, watermark_enabled FROM tenant_policies WHERE tenant_id = ?1",
                params![tenant.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read tenant policy: {}", e)))?;

        match row {
            Some((copy_mode, watermark_enabled)) => Ok(TenantProtectionPolicy {
                copy_mode: copy_mode.parse::<CopyPolicyMode>()?,
                watermark_enabled,
            }),
            None => {
                tracing::debug!(tenant = %tenant, "No stored protection policy, using default");
                Ok(TenantProtectionPolicy::default())
            }
        }
    }

    async fn put_policy(
        &self,
        tenant: &TenantId,
        policy: &TenantProtectionPolicy,
    ) -> StorageResult<()> {
        let conn = self.get_connection()?;

        conn.execute(
            "INSERT OR REPLACE INTO tenant_policies (tenant_id, copy_mode, watermark_enabled)
             VALUES (?1, ?2, ?3)",
            params![
                tenant.as_str(),
                policy.copy_mode.as_str(),
                policy.watermark_enabled
            ],
        )
        .map_err(|e| internal_error(format!("Failed to write tenant policy: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl MembershipStore for SqliteBackend {
    async fn get_membership(
        &self,
        tenant: &TenantId,
        user_id: &str,
    ) -> StorageResult<Option<MembershipRecord>> {
        let conn = self.get_connection()?;

        let row: Option<(Option<i64>, Option<String>)> = conn
            .query_row(
                "SELECT tier, expires_at FROM memberships WHERE tenant_id = ?1 AND user_id = ?2",
                params![tenant.as_str(), user_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read membership: {}", e)))?;

        let Some((tier, expires_at)) = row else {
            return Ok(None);
        };

        let tier = match tier {
            None => MembershipTier::Unlimited,
            Some(level) => MembershipTier::Level(
                u32::try_from(level)
                    .map_err(|_| serialization_error(format!("Invalid membership tier {}", level)))?,
            ),
        };
        let expires_at = expires_at
            .map(|value| parse_timestamp("expires_at", &value))
            .transpose()?;

        Ok(Some(MembershipRecord {
            tenant_id: tenant.clone(),
            user_id: user_id.to_string(),
            tier,
            expires_at,
        }))
    }

    async fn put_membership(&self, membership: &MembershipRecord) -> StorageResult<()> {
        let conn = self.get_connection()?;

        let tier = match membership.tier {
            MembershipTier::Unlimited => None,
            MembershipTier::Level(level) => Some(i64::from(level)),
        };

        conn.execute(
            "INSERT OR REPLACE INTO memberships (tenant_id, user_id, tier, expires_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                membership.tenant_id.as_str(),
                membership.user_id,
                tier,
                membership.expires_at.map(|dt| dt.to_rfc3339()),
            ],
        )
        .map_err(|e| internal_error(format!("Failed to write membership: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_backend() -> SqliteBackend {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();
        backend
    }

    fn tenant() -> TenantId {
        TenantId::new("test-tenant")
    }

    fn published_article() -> ArticleRecord {
        ArticleRecord {
            id: "a-1".to_string(),
            status: ArticleStatus::Published,
            summary: Some("Summary".to_string()),
            content: Some("Body".to_string()),
            member_content: Some("Members only".to_string()),
            access_level: 2,
            enable_tiered_read: true,
            password_hash: Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string()),
            allow_copy: false,
            watermark: true,
            view_count: 41,
            ..ArticleRecord::new(tenant(), "author-1", "Title")
        }
    }

    #[tokio::test]
    async fn test_put_and_get_article() {
        let backend = create_test_backend();
        let article = published_article();

        backend.put(&article).await.unwrap();
        let read = backend.get(&tenant(), "a-1").await.unwrap().unwrap();

        assert_eq!(read.id, "a-1");
        assert_eq!(read.status, ArticleStatus::Published);
        assert_eq!(read.review_status, ReviewStatus::Approved);
        assert_eq!(read.access_level, 2);
        assert!(read.enable_tiered_read);
        assert_eq!(read.password_hash, article.password_hash);
        assert_eq!(read.member_content.as_deref(), Some("Members only"));
        assert!(!read.allow_copy);
        assert!(read.watermark);
        assert_eq!(read.view_count, 41);
        assert_eq!(read.created_at.timestamp(), article.created_at.timestamp());
    }

    #[tokio::test]
    async fn test_get_missing_article() {
        let backend = create_test_backend();
        assert!(backend.get(&tenant(), "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_articles_are_tenant_scoped() {
        let backend = create_test_backend();
        backend.put(&published_article()).await.unwrap();

        let other = TenantId::new("other-tenant");
        assert!(backend.get(&other, "a-1").await.unwrap().is_none());
        assert!(backend.increment_view_count(&other, "a-1").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_password_hash_reads_back_as_none() {
        let backend = create_test_backend();
        let article = ArticleRecord {
            password_hash: Some(String::new()),
            ..published_article()
        };
        backend.put(&article).await.unwrap();

        let read = backend.get(&tenant(), "a-1").await.unwrap().unwrap();
        assert_eq!(read.password_hash, None);
    }

    #[tokio::test]
    async fn test_increment_view_count() {
        let backend = create_test_backend();
        backend.put(&published_article()).await.unwrap();

        backend.increment_view_count(&tenant(), "a-1").await.unwrap();
        backend.increment_view_count(&tenant(), "a-1").await.unwrap();

        let read = backend.get(&tenant(), "a-1").await.unwrap().unwrap();
        assert_eq!(read.view_count, 43);
    }

    #[tokio::test]
    async fn test_increment_missing_article_is_not_found() {
        let backend = create_test_backend();
        let err = backend
            .increment_view_count(&tenant(), "missing")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Resource(ResourceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_status_code_is_serialization_error() {
        let backend = create_test_backend();
        backend.put(&published_article()).await.unwrap();
        {
            let conn = backend.get_connection().unwrap();
            conn.execute("UPDATE articles SET status = 9", []).unwrap();
        }

        let err = backend.get(&tenant(), "a-1").await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::Backend(BackendError::SerializationError { .. })
        ));
    }

    #[tokio::test]
    async fn test_policy_defaults_when_missing() {
        let backend = create_test_backend();
        let policy = backend.get_policy(&tenant()).await.unwrap();
        assert_eq!(policy, TenantProtectionPolicy::default());
    }

    #[tokio::test]
    async fn test_put_and_get_policy() {
        let backend = create_test_backend();
        let policy = TenantProtectionPolicy {
            copy_mode: CopyPolicyMode::GlobalDeny,
            watermark_enabled: true,
        };
        backend.put_policy(&tenant(), &policy).await.unwrap();

        assert_eq!(backend.get_policy(&tenant()).await.unwrap(), policy);
        assert_eq!(
            backend
                .get_policy(&TenantId::new("other-tenant"))
                .await
                .unwrap(),
            TenantProtectionPolicy::default()
        );
    }

    #[tokio::test]
    async fn test_membership_roundtrip() {
        let backend = create_test_backend();
        let expires_at = Utc::now() + Duration::days(30);

        let leveled = MembershipRecord {
            tenant_id: tenant(),
            user_id: "reader-1".to_string(),
            tier: MembershipTier::Level(3),
            expires_at: Some(expires_at),
        };
        let unlimited = MembershipRecord {
            tenant_id: tenant(),
            user_id: "reader-2".to_string(),
            tier: MembershipTier::Unlimited,
            expires_at: None,
        };
        backend.put_membership(&leveled).await.unwrap();
        backend.put_membership(&unlimited).await.unwrap();

        let read = backend
            .get_membership(&tenant(), "reader-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(read.tier, MembershipTier::Level(3));
        assert_eq!(
            read.expires_at.map(|dt| dt.timestamp()),
            Some(expires_at.timestamp())
        );

        let read = backend
            .get_membership(&tenant(), "reader-2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(read.tier, MembershipTier::Unlimited);
        assert_eq!(read.expires_at, None);

        assert!(
            backend
                .get_membership(&tenant(), "stranger")
                .await
                .unwrap()
                .is_none()
        );
    }
}
