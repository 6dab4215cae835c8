//! Error types for the persistence layer.
//!
//! Errors are split by category so that the HTTP layer can map each one to a
//! response without inspecting backend-specific messages.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::tenant::TenantId;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Record state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Tenant identification errors
    #[error(transparent)]
    Tenant(#[from] TenantError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to the state of a stored record.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested record was not found.
    #[error("{kind} not found: {tenant_id}/{id}")]
    NotFound {
        kind: &'static str,
        tenant_id: TenantId,
        id: String,
    },
}

/// Errors related to tenant identification.
#[derive(Error, Debug)]
pub enum TenantError {
    /// The tenant identifier is malformed.
    #[error("invalid tenant: {tenant_id}: {reason}")]
    InvalidTenant { tenant_id: String, reason: String },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A stored value could not be decoded into its domain type.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StorageError::from(ResourceError::NotFound {
            kind: "article",
            tenant_id: TenantId::new("acme"),
            id: "a-1".to_string(),
        });
        assert_eq!(err.to_string(), "article not found: acme/a-1");
    }

    #[test]
    fn test_backend_error_wraps_transparently() {
        let err = StorageError::from(BackendError::SerializationError {
            message: "bad status 9".to_string(),
        });
        assert_eq!(err.to_string(), "serialization error: bad status 9");
        assert!(matches!(err, StorageError::Backend(_)));
    }
}
