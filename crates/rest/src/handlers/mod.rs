//! HTTP request handlers.
//!
//! - [`articles`] - Article read and password unlock
//! - [`health`] - Health, liveness and readiness probes

pub mod articles;
pub mod health;

pub use articles::{read_article_handler, unlock_article_handler};
pub use health::{health_handler, liveness_handler, readiness_handler};
