//! # quire-access
//!
//! Decides what a reader may see of an article.
//!
//! Resolution is split into three pure steps:
//!
//! 1. [`resolve`] runs the article and [`ViewerContext`] through the ordered
//!    access gates and produces an [`AccessDecision`].
//! 2. [`project`] applies the decision to the article, yielding a
//!    [`PublicArticleView`] that never exposes withheld content or the
//!    password hash.
//! 3. [`apply_copy_policy`] merges the tenant's copy-protection policy into the
//!    view's UI affordances.
//!
//! Nothing here performs I/O. Membership expiry is resolved by the caller
//! before the viewer is built, and decisions are never cached.
//!
//! ## Quick start
//!
//! ```
//! use quire_access::{AccessEngine, ProjectionOptions, ViewerContext, project};
//! use quire_persistence::tenant::TenantId;
//! use quire_persistence::types::{ArticleRecord, ArticleStatus};
//!
//! let mut article = ArticleRecord::new(TenantId::new("acme"), "author-1", "Hello");
//! article.status = ArticleStatus::Published;
//! article.content = Some("Body".to_string());
//! article.access_level = 1;
//! article.enable_tiered_read = true;
//! article.summary = Some("Teaser".to_string());
//!
//! let decision = AccessEngine::new().resolve(&article, &ViewerContext::anonymous(), None);
//! let view = project(&article, &decision, &ProjectionOptions::default());
//!
//! assert!(view.preview_only);
//! assert_eq!(view.content.as_deref(), Some("Teaser"));
//! ```

pub mod decision;
pub mod engine;
pub mod password;
pub mod projector;
pub mod protection;
pub mod viewer;

pub use decision::{AccessDecision, AccessOutcome};
pub use engine::{AccessEngine, resolve};
pub use password::{Argon2PasswordVerifier, PasswordHashError, PasswordVerifier, hash_password};
pub use projector::{DEFAULT_PREVIEW_MAX_CHARS, ProjectionOptions, PublicArticleView, project};
pub use protection::{CopyProtection, apply_copy_policy};
pub use viewer::{ViewerContext, ViewerIdentity};
