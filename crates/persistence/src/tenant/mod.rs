//! Tenant identification for multi-tenant article storage.
//!
//! Every storage lookup is scoped by a [`TenantId`]; an article stored under
//! one tenant is invisible to lookups made on behalf of another.
//!
//! ```
//! use quire_persistence::tenant::TenantId;
//!
//! let tenant = TenantId::parse("acme-press").unwrap();
//! assert_eq!(tenant.as_str(), "acme-press");
//! assert!(TenantId::parse("acme press").is_err());
//! ```

mod id;

pub use id::{MAX_TENANT_ID_LEN, TenantId};
