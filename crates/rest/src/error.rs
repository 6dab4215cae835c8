//! Error types for the article access API.
//!
//! # Error Mapping
//!
//! | Source | HTTP Status | `error` code |
//! |--------|-------------|--------------|
//! | Denied or missing article | 404 | not-found |
//! | Invalid tenant or request | 400 | invalid |
//! | Unlock body without a JSON content type | 415 | not-supported |
//! | Backend unavailable | 503 | unavailable |
//! | Any other storage failure | 500 | exception |
//!
//! Every denial renders the same 404 body, so callers cannot tell a missing
//! article from a draft, an unapproved article, or another tenant's article.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quire_persistence::error::{BackendError, ResourceError, StorageError, TenantError};
use std::fmt;

/// Message used for every 404.
pub const NOT_FOUND_MESSAGE: &str = "article not found";

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Article missing or hidden from the caller (HTTP 404).
    NotFound,

    /// Malformed request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Request body is not JSON (HTTP 415).
    UnsupportedMediaType {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },

    /// Storage temporarily unavailable (HTTP 503).
    ServiceUnavailable {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound => write!(f, "Not found"),
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::UnsupportedMediaType { message } => {
                write!(f, "Unsupported media type: {}", message)
            }
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
            RestError::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl RestError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::NotFound => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            RestError::NotFound => ("not-found", NOT_FOUND_MESSAGE.to_string()),
            RestError::BadRequest { message } => ("invalid", message),
            RestError::UnsupportedMediaType { message } => ("not-supported", message),
            RestError::InternalError { message } => {
                tracing::error!(error = %message, "Request failed");
                ("exception", "internal server error".to_string())
            }
            RestError::ServiceUnavailable { message } => ("unavailable", message),
        };

        (status, Json(error_body(code, &message))).into_response()
    }
}

/// Builds the JSON error body.
fn error_body(code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "error": code,
        "message": message,
    })
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Tenant(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { .. } => RestError::NotFound,
        }
    }
}

impl From<TenantError> for RestError {
    fn from(err: TenantError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unavailable { .. } | BackendError::ConnectionFailed { .. } => {
                RestError::ServiceUnavailable {
                    message: err.to_string(),
                }
            }
            _ => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

impl From<QueryRejection> for RestError {
    fn from(rejection: QueryRejection) -> Self {
        RestError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => RestError::UnsupportedMediaType {
                message: rejection.body_text(),
            },
            _ => RestError::BadRequest {
                message: rejection.body_text(),
            },
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::BadRequest {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use quire_persistence::tenant::TenantId;

    #[test]
    fn test_not_found_body() {
        let body = error_body("not-found", NOT_FOUND_MESSAGE);
        assert_eq!(body["error"], "not-found");
        assert_eq!(body["message"], "article not found");
    }

    #[test]
    fn test_storage_not_found_maps_to_404() {
        let err: RestError = StorageError::from(ResourceError::NotFound {
            kind: "article",
            tenant_id: TenantId::new("acme"),
            id: "a-1".to_string(),
        })
        .into();
        assert!(matches!(err, RestError::NotFound));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_tenant_maps_to_400() {
        let err: RestError = StorageError::from(TenantError::InvalidTenant {
            tenant_id: "a b".to_string(),
            reason: "bad characters".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_backend_errors() {
        let unavailable: RestError = BackendError::Unavailable {
            backend_name: "sqlite".to_string(),
            message: "pool exhausted".to_string(),
        }
        .into();
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let internal: RestError = BackendError::SerializationError {
            message: "bad status".to_string(),
        }
        .into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display() {
        let err = RestError::BadRequest {
            message: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "Bad request: nope");
    }
}
