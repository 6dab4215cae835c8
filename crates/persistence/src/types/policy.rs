//! Tenant-wide copy and watermark protection policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// How a tenant governs the copy affordance of its articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyPolicyMode {
    /// Each article's own `allow_copy` flag decides.
    #[default]
    FollowArticle,
    /// Copying is allowed on every article.
    GlobalAllow,
    /// Copying is denied on every article.
    GlobalDeny,
}

impl CopyPolicyMode {
    /// Returns the name used in storage and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            CopyPolicyMode::FollowArticle => "follow_article",
            CopyPolicyMode::GlobalAllow => "global_allow",
            CopyPolicyMode::GlobalDeny => "global_deny",
        }
    }
}

impl fmt::Display for CopyPolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CopyPolicyMode {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "follow_article" => Ok(CopyPolicyMode::FollowArticle),
            "global_allow" => Ok(CopyPolicyMode::GlobalAllow),
            "global_deny" => Ok(CopyPolicyMode::GlobalDeny),
            other => Err(BackendError::SerializationError {
                message: format!("unknown copy policy mode '{}'", other),
            }),
        }
    }
}

/// Per-tenant protection settings.
///
/// The default is the safest policy: defer to each article and keep the
/// watermark off. Stores return it for tenants with no saved settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TenantProtectionPolicy {
    /// Copy affordance mode.
    pub copy_mode: CopyPolicyMode,
    /// Whether the tenant opts in to watermarking.
    pub watermark_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_follow_article_without_watermark() {
        let policy = TenantProtectionPolicy::default();
        assert_eq!(policy.copy_mode, CopyPolicyMode::FollowArticle);
        assert!(!policy.watermark_enabled);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(
            "global_deny".parse::<CopyPolicyMode>().unwrap(),
            CopyPolicyMode::GlobalDeny
        );
        assert!("deny_everything".parse::<CopyPolicyMode>().is_err());
        assert_eq!(CopyPolicyMode::GlobalAllow.to_string(), "global_allow");
    }
}
