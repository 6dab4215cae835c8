//! Backend abstraction for database drivers.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::BackendError;

/// Identifies the type of database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// SQLite database (file-based or in-memory).
    Sqlite,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Driver-level operations shared by every backend.
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Returns the backend kind.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for logging and health output.
    fn name(&self) -> &'static str;

    /// Verifies that the backend can serve queries.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Creates or migrates the schema.
    async fn initialize(&self) -> Result<(), BackendError>;
}
