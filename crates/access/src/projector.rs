//! Projection of an article through an access decision.

use chrono::{DateTime, Utc};
use quire_persistence::tenant::TenantId;
use quire_persistence::types::{ArticleRecord, TenantProtectionPolicy};
use serde::Serialize;

use crate::decision::AccessDecision;
use crate::protection::{CopyProtection, apply_copy_policy};

/// Length of the preview cut from `content` when no teaser exists.
pub const DEFAULT_PREVIEW_MAX_CHARS: usize = 800;

/// Per-request projection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionOptions {
    /// Characters of `content` used as a last-resort preview.
    pub preview_max_chars: usize,
    /// Whether the caller asked for member content at all.
    pub include_member: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            preview_max_chars: DEFAULT_PREVIEW_MAX_CHARS,
            include_member: true,
        }
    }
}

/// The externally visible form of an article.
///
/// Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicArticleView {
    pub id: String,
    pub tenant_id: TenantId,
    pub owner_id: String,
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub member_content: Option<String>,
    pub access_level: u32,
    pub enable_tiered_read: bool,
    pub preview_only: bool,
    pub password_protected: bool,
    pub password_verified: bool,
    pub member_content_locked: bool,
    pub access_denied_reason: Option<String>,
    pub allow_copy: bool,
    pub watermark_enabled: bool,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PublicArticleView {
    /// Replaces the copy affordances.
    pub fn with_copy_protection(mut self, protection: CopyProtection) -> Self {
        self.allow_copy = protection.allow_copy;
        self.watermark_enabled = protection.watermark_enabled;
        self
    }
}

/// Builds the preview shown in place of `content`.
///
/// Falls back from the explicit teaser to the summary to a character-safe
/// prefix of the body.
fn preview_text(article: &ArticleRecord, max_chars: usize) -> Option<String> {
    let non_empty = |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);

    non_empty(&article.preview_content)
        .or_else(|| non_empty(&article.summary))
        .or_else(|| {
            article
                .content
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|body| body.chars().take(max_chars).collect())
        })
}

/// Applies `decision` to `article`.
///
/// Copy flags start from the default tenant policy; callers holding the real
/// policy replace them with [`PublicArticleView::with_copy_protection`].
pub fn project(
    article: &ArticleRecord,
    decision: &AccessDecision,
    options: &ProjectionOptions,
) -> PublicArticleView {
    let withheld = decision.password_challenge_required() || decision.is_denied();

    let content = if decision.content_visible() {
        article.content.clone()
    } else if decision.preview_only() {
        preview_text(article, options.preview_max_chars)
    } else {
        None
    };

    let member_content = if decision.member_content_visible() && options.include_member {
        article.member_content.clone()
    } else {
        None
    };

    let protection = apply_copy_policy(article, &TenantProtectionPolicy::default());

    PublicArticleView {
        id: article.id.clone(),
        tenant_id: article.tenant_id.clone(),
        owner_id: article.owner_id.clone(),
        title: article.title.clone(),
        summary: if withheld { None } else { article.summary.clone() },
        content,
        member_content,
        access_level: article.access_level,
        enable_tiered_read: article.enable_tiered_read,
        preview_only: decision.preview_only(),
        password_protected: article.is_password_protected(),
        password_verified: decision.password_verified(),
        member_content_locked: decision.has_member_content() && !decision.member_content_visible(),
        access_denied_reason: decision.denied_reason().map(str::to_owned),
        allow_copy: protection.allow_copy,
        watermark_enabled: protection.watermark_enabled,
        view_count: article.view_count,
        created_at: article.created_at,
        updated_at: article.updated_at,
    }
}
