//! Article records.
//!
//! [`ArticleRecord`] is the denormalized article row read for a single access
//! resolution. It is an immutable snapshot: the access engine never mutates
//! it, and the view-count side effect goes back through the store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::tenant::TenantId;

/// Publication workflow state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// Being written; visible to management only.
    Draft,
    /// Publicly listed.
    Published,
    /// Withdrawn by the author or an administrator.
    Offline,
}

impl ArticleStatus {
    /// Returns the integer code used in storage.
    pub fn code(self) -> i64 {
        match self {
            ArticleStatus::Draft => 0,
            ArticleStatus::Published => 1,
            ArticleStatus::Offline => 2,
        }
    }
}

impl TryFrom<i64> for ArticleStatus {
    type Error = BackendError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ArticleStatus::Draft),
            1 => Ok(ArticleStatus::Published),
            2 => Ok(ArticleStatus::Offline),
            other => Err(BackendError::SerializationError {
                message: format!("unknown article status code {}", other),
            }),
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleStatus::Draft => write!(f, "draft"),
            ArticleStatus::Published => write!(f, "published"),
            ArticleStatus::Offline => write!(f, "offline"),
        }
    }
}

/// Moderation state of an article.
///
/// Tenants that do not moderate store every article as `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Awaiting moderation.
    Pending,
    /// Cleared for readers.
    Approved,
    /// Refused by a moderator.
    Rejected,
}

impl ReviewStatus {
    /// Returns the integer code used in storage.
    pub fn code(self) -> i64 {
        match self {
            ReviewStatus::Pending => 0,
            ReviewStatus::Approved => 1,
            ReviewStatus::Rejected => 2,
        }
    }
}

impl TryFrom<i64> for ReviewStatus {
    type Error = BackendError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ReviewStatus::Pending),
            1 => Ok(ReviewStatus::Approved),
            2 => Ok(ReviewStatus::Rejected),
            other => Err(BackendError::SerializationError {
                message: format!("unknown review status code {}", other),
            }),
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewStatus::Pending => write!(f, "pending"),
            ReviewStatus::Approved => write!(f, "approved"),
            ReviewStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A denormalized article row.
///
/// Text fields grow in exclusivity: `preview_content` is a teaser,
/// `content` is the body, and `member_content` is an extra block reserved
/// for members and management.
///
/// # Examples
///
/// ```
/// use quire_persistence::tenant::TenantId;
/// use quire_persistence::types::{ArticleRecord, ArticleStatus};
///
/// let article = ArticleRecord {
///     content: Some("Full text".to_string()),
///     ..ArticleRecord::new(TenantId::new("acme"), "author-1", "Hello")
/// };
///
/// assert_eq!(article.status, ArticleStatus::Draft);
/// assert!(!article.is_password_protected());
/// assert!(!article.has_member_content());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// The article's logical ID.
    pub id: String,
    /// The tenant that owns this article.
    pub tenant_id: TenantId,
    /// User ID of the author.
    pub owner_id: String,
    /// Display title.
    pub title: String,
    /// Short abstract shown in listings.
    pub summary: Option<String>,
    /// Full body text.
    pub content: Option<String>,
    /// Extra block reserved for members.
    pub member_content: Option<String>,
    /// Author-written teaser shown when the body is withheld.
    pub preview_content: Option<String>,
    /// Publication workflow state.
    pub status: ArticleStatus,
    /// Moderation state.
    pub review_status: ReviewStatus,
    /// Membership level required to read the body; 0 means public.
    pub access_level: u32,
    /// When false, `access_level` is ignored.
    pub enable_tiered_read: bool,
    /// PHC-format password hash; presence makes the article password protected.
    pub password_hash: Option<String>,
    /// Whether the author allows readers to copy text.
    pub allow_copy: bool,
    /// Whether the author asks for a watermark overlay.
    pub watermark: bool,
    /// Number of counted views.
    pub view_count: u64,
    /// When the article was created.
    pub created_at: DateTime<Utc>,
    /// When the article was last modified.
    pub updated_at: DateTime<Utc>,
}

impl ArticleRecord {
    /// Creates a draft article with a generated ID and no content.
    pub fn new(tenant_id: TenantId, owner_id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tenant_id,
            owner_id: owner_id.into(),
            title: title.into(),
            summary: None,
            content: None,
            member_content: None,
            preview_content: None,
            status: ArticleStatus::Draft,
            review_status: ReviewStatus::Approved,
            access_level: 0,
            enable_tiered_read: false,
            password_hash: None,
            allow_copy: true,
            watermark: false,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the stored password hash, treating an empty string as absent.
    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref().filter(|h| !h.is_empty())
    }

    /// Returns true if readers must supply a password.
    pub fn is_password_protected(&self) -> bool {
        self.password_hash().is_some()
    }

    /// Returns true if the record carries a non-empty member-only block.
    pub fn has_member_content(&self) -> bool {
        self.member_content.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Returns the membership level actually required to read the body.
    pub fn required_level(&self) -> u32 {
        if self.enable_tiered_read {
            self.access_level
        } else {
            0
        }
    }
}
