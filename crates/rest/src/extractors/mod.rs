//! Axum extractors for request identification.
//!
//! - [`TenantExtractor`] - Tenant from `X-Tenant-ID` or the configured default
//! - [`CallerExtractor`] - Caller identity from gateway headers

mod caller;
mod tenant;

pub use caller::{ADMIN_ROLE, CallerExtractor};
pub use tenant::TenantExtractor;
