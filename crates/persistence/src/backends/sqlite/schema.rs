//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 2;

fn migration_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::MigrationError { message })
}

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, 1)?;
        migrate_schema(conn, 1)?;
    } else if current_version < SCHEMA_VERSION {
        migrate_schema(conn, current_version)?;
    }

    Ok(())
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error(format!("Failed to create schema_version table: {}", e)))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| migration_error(format!("Failed to clear schema_version: {}", e)))?;

    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| migration_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Creates the article and tenant policy tables.
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS articles (
            tenant_id TEXT NOT NULL,
            id TEXT NOT NULL,
            owner_id TEXT NOT NULL,
            title TEXT NOT NULL,
            summary TEXT,
            content TEXT,
            member_content TEXT,
            preview_content TEXT,
            status INTEGER NOT NULL,
            review_status INTEGER NOT NULL,
            access_level INTEGER NOT NULL DEFAULT 0,
            enable_tiered_read INTEGER NOT NULL DEFAULT 0,
            password_hash TEXT,
            allow_copy INTEGER NOT NULL DEFAULT 1,
            watermark INTEGER NOT NULL DEFAULT 0,
            view_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (tenant_id, id)
        );

        CREATE INDEX IF NOT EXISTS idx_articles_owner
            ON articles (tenant_id, owner_id);

        CREATE TABLE IF NOT EXISTS tenant_policies (
            tenant_id TEXT PRIMARY KEY,
            copy_mode TEXT NOT NULL,
            watermark_enabled INTEGER NOT NULL DEFAULT 0
        );",
    )
    .map_err(|e| migration_error(format!("Failed to create v1 schema: {}", e)))
}

/// Runs migrations from `from_version` up to [`SCHEMA_VERSION`].
fn migrate_schema(conn: &Connection, from_version: i32) -> StorageResult<()> {
    let mut version = from_version;

    while version < SCHEMA_VERSION {
        match version {
            1 => migrate_v1_to_v2(conn)?,
            other => {
                return Err(migration_error(format!(
                    "No migration path from schema version {}",
                    other
                )));
            }
        }
        version += 1;
        set_schema_version(conn, version)?;
        tracing::debug!(version, "Applied SQLite schema migration");
    }

    Ok(())
}

/// v2: memberships table.
fn migrate_v1_to_v2(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS memberships (
            tenant_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            tier INTEGER,
            expires_at TEXT,
            PRIMARY KEY (tenant_id, user_id)
        );",
    )
    .map_err(|e| migration_error(format!("Failed to create memberships table: {}", e)))
}
