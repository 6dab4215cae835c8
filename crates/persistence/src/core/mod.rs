//! Core storage traits and abstractions.
//!
//! - [`Backend`] - Database driver abstraction (naming, health, schema)
//! - [`ArticleStore`] - Article rows and the view counter
//! - [`TenantPolicyStore`] - Tenant copy/watermark policy
//! - [`MembershipStore`] - Reader memberships
//!
//! A full backend implements all four; the HTTP layer requires
//! [`QuireStorage`], which bundles them.

mod backend;
mod storage;

pub use backend::{Backend, BackendKind};
pub use storage::{ArticleStore, MembershipStore, TenantPolicyStore};

/// Everything the article access service needs from a backend.
pub trait QuireStorage: Backend + ArticleStore + TenantPolicyStore + MembershipStore {}

impl<T> QuireStorage for T where T: Backend + ArticleStore + TenantPolicyStore + MembershipStore {}
