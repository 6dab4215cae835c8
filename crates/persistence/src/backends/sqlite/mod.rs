//! SQLite backend implementation.
//!
//! Implements every storage trait on top of a pooled SQLite database. It
//! supports in-memory databases (for tests) and file-based databases.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE articles (
//!     tenant_id TEXT NOT NULL,
//!     id TEXT NOT NULL,
//!     owner_id TEXT NOT NULL,
//!     title TEXT NOT NULL,
//!     summary TEXT,
//!     content TEXT,
//!     member_content TEXT,
//!     preview_content TEXT,
//!     status INTEGER NOT NULL,
//!     review_status INTEGER NOT NULL,
//!     access_level INTEGER NOT NULL DEFAULT 0,
//!     enable_tiered_read INTEGER NOT NULL DEFAULT 0,
//!     password_hash TEXT,
//!     allow_copy INTEGER NOT NULL DEFAULT 1,
//!     watermark INTEGER NOT NULL DEFAULT 0,
//!     view_count INTEGER NOT NULL DEFAULT 0,
//!     created_at TEXT NOT NULL,
//!     updated_at TEXT NOT NULL,
//!     PRIMARY KEY (tenant_id, id)
//! );
//!
//! CREATE TABLE tenant_policies (
//!     tenant_id TEXT PRIMARY KEY,
//!     copy_mode TEXT NOT NULL,
//!     watermark_enabled INTEGER NOT NULL
//! );
//!
//! CREATE TABLE memberships (
//!     tenant_id TEXT NOT NULL,
//!     user_id TEXT NOT NULL,
//!     tier INTEGER,            -- NULL means unlimited
//!     expires_at TEXT,         -- NULL never expires
//!     PRIMARY KEY (tenant_id, user_id)
//! );
//! ```

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
