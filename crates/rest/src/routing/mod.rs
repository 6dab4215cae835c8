//! Route configuration for the article access API.

pub mod article_routes;

pub use article_routes::create_routes;
