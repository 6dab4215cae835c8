//! Tenant copy-protection policy.

use quire_persistence::types::{ArticleRecord, CopyPolicyMode, TenantProtectionPolicy};
use serde::Serialize;

/// Copy and watermark affordances for one article under one tenant policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyProtection {
    /// Whether readers may copy text.
    pub allow_copy: bool,
    /// Whether the reader UI overlays a watermark.
    pub watermark_enabled: bool,
}

/// Combines the tenant policy with the article's own flags.
///
/// The result only drives UI affordances and never feeds back into access
/// resolution. A watermark requires both the tenant and the article to opt in.
pub fn apply_copy_policy(article: &ArticleRecord, policy: &TenantProtectionPolicy) -> CopyProtection {
    let allow_copy = match policy.copy_mode {
        CopyPolicyMode::GlobalAllow => true,
        CopyPolicyMode::GlobalDeny => false,
        CopyPolicyMode::FollowArticle => article.allow_copy,
    };

    CopyProtection {
        allow_copy,
        watermark_enabled: policy.watermark_enabled && article.watermark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_persistence::tenant::TenantId;
    use rstest::rstest;

    fn article(allow_copy: bool, watermark: bool) -> ArticleRecord {
        let mut article = ArticleRecord::new(TenantId::new("acme"), "author-1", "Title");
        article.allow_copy = allow_copy;
        article.watermark = watermark;
        article
    }

    #[rstest]
    #[case(CopyPolicyMode::GlobalAllow, false, true)]
    #[case(CopyPolicyMode::GlobalAllow, true, true)]
    #[case(CopyPolicyMode::GlobalDeny, true, false)]
    #[case(CopyPolicyMode::GlobalDeny, false, false)]
    #[case(CopyPolicyMode::FollowArticle, true, true)]
    #[case(CopyPolicyMode::FollowArticle, false, false)]
    fn test_copy_mode(
        #[case] mode: CopyPolicyMode,
        #[case] article_allows: bool,
        #[case] expected: bool,
    ) {
        let policy = TenantProtectionPolicy {
            copy_mode: mode,
            watermark_enabled: false,
        };
        assert_eq!(
            apply_copy_policy(&article(article_allows, false), &policy).allow_copy,
            expected
        );
    }

    #[rstest]
    #[case(true, true, true)]
    #[case(true, false, false)]
    #[case(false, true, false)]
    #[case(false, false, false)]
    fn test_watermark_needs_both(
        #[case] tenant: bool,
        #[case] article_flag: bool,
        #[case] expected: bool,
    ) {
        let policy = TenantProtectionPolicy {
            copy_mode: CopyPolicyMode::FollowArticle,
            watermark_enabled: tenant,
        };
        assert_eq!(
            apply_copy_policy(&article(true, article_flag), &policy).watermark_enabled,
            expected
        );
    }

    #[test]
    fn test_default_policy_follows_article_without_watermark() {
        let protection = apply_copy_policy(&article(false, true), &TenantProtectionPolicy::default());
        assert_eq!(
            protection,
            CopyProtection {
                allow_copy: false,
                watermark_enabled: false
            }
        );
    }
}
