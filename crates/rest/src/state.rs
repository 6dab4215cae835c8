//! Application state for the article access API.
//!
//! Holds the storage backend, configuration, and the access engine shared by
//! all request handlers.

use std::sync::Arc;

use quire_access::{AccessEngine, ProjectionOptions};
use quire_persistence::core::QuireStorage;
use quire_persistence::tenant::TenantId;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`QuireStorage`])
///
/// # Example
///
/// ```rust,ignore
/// use quire_rest::{AppState, ServerConfig};
/// use quire_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// backend.init_schema()?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Access resolution engine.
    engine: Arc<AccessEngine>,

    /// Tenant used when a request names none.
    default_tenant: TenantId,
}

// S is behind an Arc and need not be Clone.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
            engine: Arc::clone(&self.engine),
            default_tenant: self.default_tenant.clone(),
        }
    }
}

impl<S: QuireStorage> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    ///
    /// The default tenant is taken as configured; [`ServerConfig::validate`]
    /// is responsible for rejecting malformed values at startup.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        let default_tenant = TenantId::new(config.default_tenant.clone());
        Self {
            storage,
            config: Arc::new(config),
            engine: Arc::new(AccessEngine::new()),
            default_tenant,
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a clone of the storage Arc.
    pub fn storage_arc(&self) -> Arc<S> {
        Arc::clone(&self.storage)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the access engine.
    pub fn engine(&self) -> &AccessEngine {
        &self.engine
    }

    /// Returns the default tenant ID from configuration.
    pub fn default_tenant(&self) -> &TenantId {
        &self.default_tenant
    }

    /// Returns whether reads should increment view counters.
    pub fn count_views(&self) -> bool {
        self.config.count_views
    }

    /// Builds projection options for one request.
    pub fn projection_options(&self, include_member: bool) -> ProjectionOptions {
        ProjectionOptions {
            preview_max_chars: self.config.preview_max_chars,
            include_member,
        }
    }
}
