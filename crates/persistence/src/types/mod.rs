//! Domain records stored and served by Quire.
//!
//! - [`ArticleRecord`] - the denormalized article row
//! - [`TenantProtectionPolicy`] - tenant-wide copy/watermark settings
//! - [`MembershipRecord`] - a reader's membership and its expiry

mod article;
mod membership;
mod policy;

pub use article::{ArticleRecord, ArticleStatus, ReviewStatus};
pub use membership::{MembershipRecord, MembershipStatus, MembershipTier};
pub use policy::{CopyPolicyMode, TenantProtectionPolicy};
