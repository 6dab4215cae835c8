//! Quire Persistence Layer
//!
//! Tenant-scoped storage for the records the article access service reads:
//! article rows, tenant protection policies, and reader memberships.
//!
//! # Architecture
//!
//! - [`tenant`] - Tenant identifiers; every lookup is tenant scoped
//! - [`types`] - Domain records ([`ArticleRecord`](types::ArticleRecord), ...)
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits
//! - [`backends`] - Backend implementations (SQLite)
//!
//! # Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use quire_persistence::backends::sqlite::SqliteBackend;
//! use quire_persistence::core::ArticleStore;
//! use quire_persistence::tenant::TenantId;
//! use quire_persistence::types::{ArticleRecord, ArticleStatus};
//!
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let tenant = TenantId::parse("acme")?;
//! let article = ArticleRecord {
//!     id: "hello".to_string(),
//!     status: ArticleStatus::Published,
//!     content: Some("Hello, readers".to_string()),
//!     ..ArticleRecord::new(tenant.clone(), "author-1", "Hello")
//! };
//! backend.put(&article).await?;
//!
//! let stored = backend.get(&tenant, "hello").await?;
//! assert!(stored.is_some());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod tenant;
pub mod types;

pub use error::{StorageError, StorageResult};
