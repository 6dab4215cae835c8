//! Test fixtures for REST API testing.

use chrono::{Duration, Utc};
use quire_access::hash_password;
use quire_persistence::tenant::TenantId;
use quire_persistence::types::{
    ArticleRecord, ArticleStatus, MembershipRecord, MembershipTier, ReviewStatus,
};

/// Author of every fixture article.
pub const AUTHOR: &str = "author-1";

/// A published, approved, public article.
pub fn published(tenant: &str, id: &str) -> ArticleRecord {
    let mut article = ArticleRecord::new(TenantId::new(tenant), AUTHOR, "A day in the hills");
    article.id = id.to_string();
    article.status = ArticleStatus::Published;
    article.review_status = ReviewStatus::Approved;
    article.summary = Some("A short walk.".to_string());
    article.content = Some("We set out at dawn and climbed until noon.".to_string());
    article
}

/// A draft article.
pub fn draft(tenant: &str, id: &str) -> ArticleRecord {
    let mut article = published(tenant, id);
    article.status = ArticleStatus::Draft;
    article
}

/// A published article behind `password`.
pub fn protected(tenant: &str, id: &str, password: &str) -> ArticleRecord {
    let mut article = published(tenant, id);
    article.password_hash = Some(hash_password(password).expect("Failed to hash password"));
    article
}

/// A published article gated at `level`, with member content.
pub fn tiered(tenant: &str, id: &str, level: u32) -> ArticleRecord {
    let mut article = published(tenant, id);
    article.access_level = level;
    article.enable_tiered_read = true;
    article.preview_content = Some("The first mile.".to_string());
    article.member_content = Some("Map and GPX track.".to_string());
    article
}

/// A membership that expires in a day.
pub fn membership(tenant: &str, user: &str, tier: MembershipTier) -> MembershipRecord {
    MembershipRecord {
        tenant_id: TenantId::new(tenant),
        user_id: user.to_string(),
        tier,
        expires_at: Some(Utc::now() + Duration::days(1)),
    }
}

/// A membership that expired yesterday.
pub fn expired_membership(tenant: &str, user: &str) -> MembershipRecord {
    MembershipRecord {
        expires_at: Some(Utc::now() - Duration::days(1)),
        ..membership(tenant, user, MembershipTier::Unlimited)
    }
}
