//! Server configuration for the article access API.
//!
//! Configuration can be built programmatically, parsed from the command line,
//! or read from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QUIRE_SERVER_PORT` | 8080 | Server port |
//! | `QUIRE_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `QUIRE_LOG_LEVEL` | info | Log level |
//! | `QUIRE_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `QUIRE_ENABLE_CORS` | true | Enable CORS |
//! | `QUIRE_CORS_ORIGINS` | * | Allowed origins |
//! | `QUIRE_CORS_METHODS` | GET,POST,OPTIONS | Allowed methods |
//! | `QUIRE_CORS_HEADERS` | Content-Type,Accept,X-Tenant-ID,X-User-ID,X-User-Tenant,X-User-Roles | Allowed headers |
//! | `QUIRE_DEFAULT_TENANT` | default | Tenant for requests without `X-Tenant-ID` |
//! | `QUIRE_DATABASE_URL` | (in-memory) | SQLite database path |
//! | `QUIRE_PREVIEW_MAX_CHARS` | 800 | Length of body-derived previews |
//! | `QUIRE_COUNT_VIEWS` | true | Increment view counters on read |
//!
//! # Example
//!
//! ```rust
//! use quire_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::Parser;
use quire_access::DEFAULT_PREVIEW_MAX_CHARS;
use quire_persistence::tenant::TenantId;

const DEFAULT_CORS_HEADERS: &str = "Content-Type,Accept,X-Tenant-ID,X-User-ID,X-User-Tenant,X-User-Roles";

/// Server configuration for the article access API.
#[derive(Debug, Clone, Parser)]
#[command(name = "quire")]
#[command(about = "Multi-tenant article access server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "QUIRE_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "QUIRE_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "QUIRE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "QUIRE_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "QUIRE_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "QUIRE_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "QUIRE_CORS_METHODS", default_value = "GET,POST,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "QUIRE_CORS_HEADERS", default_value = DEFAULT_CORS_HEADERS)]
    pub cors_headers: String,

    /// Tenant used for requests without an X-Tenant-ID header.
    #[arg(long, env = "QUIRE_DEFAULT_TENANT", default_value = "default")]
    pub default_tenant: String,

    /// SQLite database path. An in-memory database is used when unset.
    #[arg(long, env = "QUIRE_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Characters of the article body used as a preview of last resort.
    #[arg(long, env = "QUIRE_PREVIEW_MAX_CHARS", default_value_t = DEFAULT_PREVIEW_MAX_CHARS)]
    pub preview_max_chars: usize,

    /// Increment view counters for counted reads.
    #[arg(long, env = "QUIRE_COUNT_VIEWS", default_value = "true")]
    pub count_views: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,OPTIONS".to_string(),
            cors_headers: DEFAULT_CORS_HEADERS.to_string(),
            default_tenant: "default".to_string(),
            database_url: None,
            preview_max_chars: DEFAULT_PREVIEW_MAX_CHARS,
            count_views: true,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables, falling back to
    /// defaults when parsing fails.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.preview_max_chars == 0 {
            errors.push("Preview length cannot be 0".to_string());
        }

        if let Err(e) = TenantId::parse(&self.default_tenant) {
            errors.push(format!("Invalid default tenant: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// View counting stays on so tests can observe increments.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            default_tenant: "test-tenant".to_string(),
            database_url: None,
            preview_max_chars: DEFAULT_PREVIEW_MAX_CHARS,
            count_views: true,
        }
    }
}
