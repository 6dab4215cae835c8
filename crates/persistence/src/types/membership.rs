//! Reader memberships.
//!
//! Membership expiry is resolved against a caller-supplied clock in
//! [`MembershipRecord::status_at`], so that code consuming a
//! [`MembershipStatus`] never reads the wall clock itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tenant::TenantId;

/// The article level a membership unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    /// Unlocks articles whose required level is at most this value.
    Level(u32),
    /// Unlocks every level.
    Unlimited,
}

impl MembershipTier {
    /// Returns true if this tier unlocks the given required level.
    pub fn covers(self, required_level: u32) -> bool {
        match self {
            MembershipTier::Unlimited => true,
            MembershipTier::Level(level) => level >= required_level,
        }
    }
}

/// A membership with its expiry already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MembershipStatus {
    /// No membership, or an expired one.
    #[default]
    Inactive,
    /// A current membership.
    Active {
        /// Level unlocked by the membership.
        tier: MembershipTier,
    },
}

impl MembershipStatus {
    /// Returns true for a current membership.
    pub fn is_active(&self) -> bool {
        matches!(self, MembershipStatus::Active { .. })
    }

    /// Returns true if the membership is current and unlocks the given level.
    pub fn covers(&self, required_level: u32) -> bool {
        match self {
            MembershipStatus::Inactive => false,
            MembershipStatus::Active { tier } => tier.covers(required_level),
        }
    }
}

/// A stored membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    /// Tenant the membership belongs to.
    pub tenant_id: TenantId,
    /// Member's user ID.
    pub user_id: String,
    /// Level unlocked while the membership is current.
    pub tier: MembershipTier,
    /// Expiry instant; `None` never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

impl MembershipRecord {
    /// Resolves the membership against the given instant.
    ///
    /// A membership is current strictly before its expiry instant.
    pub fn status_at(&self, now: DateTime<Utc>) -> MembershipStatus {
        match self.expires_at {
            Some(expires_at) if expires_at <= now => MembershipStatus::Inactive,
            _ => MembershipStatus::Active { tier: self.tier },
        }
    }
}
