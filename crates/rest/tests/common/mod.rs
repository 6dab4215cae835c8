//! Common test utilities for REST API testing.
//!
//! - [`harness`] - Test server over an in-memory SQLite backend
//! - [`fixtures`] - Article, policy and membership fixtures
//! - [`assertions`] - HTTP response assertions

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod harness;
