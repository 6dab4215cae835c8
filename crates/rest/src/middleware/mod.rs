//! HTTP middleware for the article access API.
//!
//! - [`tenant`] - Identification headers and request logging

pub mod tenant;
