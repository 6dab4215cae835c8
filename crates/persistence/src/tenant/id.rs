//! Tenant identifier type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TenantError;

/// Longest tenant identifier accepted by [`TenantId::parse`].
pub const MAX_TENANT_ID_LEN: usize = 64;

/// An opaque tenant identifier.
///
/// Identifiers arriving from outside the process (headers, configuration)
/// should go through [`TenantId::parse`], which restricts them to ASCII
/// alphanumerics, `-` and `_`. [`TenantId::new`] skips validation and is meant
/// for values that were already validated, such as rows read back from storage.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a tenant ID without validating it.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses and validates a tenant ID.
    ///
    /// # Errors
    ///
    /// Returns [`TenantError::InvalidTenant`] when the identifier is empty,
    /// longer than [`MAX_TENANT_ID_LEN`], or contains characters other than
    /// ASCII alphanumerics, `-` and `_`.
    pub fn parse(id: &str) -> Result<Self, TenantError> {
        let invalid = |reason: &str| TenantError::InvalidTenant {
            tenant_id: id.to_string(),
            reason: reason.to_string(),
        };

        if id.is_empty() {
            return Err(invalid("tenant id is empty"));
        }
        if id.len() > MAX_TENANT_ID_LEN {
            return Err(invalid("tenant id is too long"));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid("tenant id contains unsupported characters"));
        }

        Ok(Self(id.to_string()))
    }

    /// Returns the tenant ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TenantId({})", self.0)
    }
}

impl FromStr for TenantId {
    type Err = TenantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TenantId::parse(s)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
