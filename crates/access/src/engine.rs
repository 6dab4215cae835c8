//! Access resolution.
//!
//! The engine evaluates a fixed sequence of gates against one article and one
//! viewer. Each gate either lets resolution continue or short-circuits with a
//! final [`AccessDecision`]. Gates that run after the chain (member content and
//! view counting) are evaluated in [`Resolution::finish`], so every path that
//! grants some form of access passes through them.
//!
//! | # | Gate | Short-circuits with |
//! |---|------|---------------------|
//! | 1 | publication | "not found" unless owner/admin |
//! | 2 | review | "not found" unless owner/admin |
//! | 3 | management bypass | full access |
//! | 4 | password | password challenge |
//! | 5 | membership tier | (never; downgrades to preview) |

use std::ops::ControlFlow;

use quire_persistence::types::{ArticleRecord, ArticleStatus, ReviewStatus};
use tracing::{debug, trace};

use crate::decision::AccessDecision;
use crate::password::{Argon2PasswordVerifier, PasswordVerifier};
use crate::viewer::ViewerContext;

type Gate = fn(&mut Resolution<'_>) -> ControlFlow<AccessDecision>;

const GATES: [(&str, Gate); 5] = [
    ("publication", publication_gate),
    ("review", review_gate),
    ("management", management_gate),
    ("password", password_gate),
    ("tier", tier_gate),
];

/// Working state threaded through the gates.
struct Resolution<'a> {
    article: &'a ArticleRecord,
    viewer: &'a ViewerContext,
    supplied_password: Option<&'a str>,
    verifier: &'a dyn PasswordVerifier,
    management_override: bool,
    password_verified: bool,
    content_visible: bool,
    preview_only: bool,
}

impl<'a> Resolution<'a> {
    fn new(
        article: &'a ArticleRecord,
        viewer: &'a ViewerContext,
        supplied_password: Option<&'a str>,
        verifier: &'a dyn PasswordVerifier,
    ) -> Self {
        Self {
            article,
            viewer,
            supplied_password: supplied_password.filter(|p| !p.is_empty()),
            verifier,
            management_override: viewer.has_management_override(article),
            password_verified: false,
            content_visible: false,
            preview_only: false,
        }
    }

    fn has_member_content(&self) -> bool {
        self.article.has_member_content()
    }

    /// Applies the member-content and view-count gates.
    fn finish(&self) -> AccessDecision {
        let member_content_visible = self.management_override
            || (self.viewer.membership_active() && self.content_visible);
        let should_count_view = self.article.status == ArticleStatus::Published
            && (!self.article.is_password_protected() || self.password_verified);

        AccessDecision {
            content_visible: self.content_visible,
            preview_only: self.preview_only,
            member_content_visible,
            password_challenge_required: false,
            password_verified: self.password_verified,
            denied_reason: None,
            should_count_view,
            has_member_content: self.has_member_content(),
            management_override: self.management_override,
        }
    }
}

fn publication_gate(res: &mut Resolution<'_>) -> ControlFlow<AccessDecision> {
    if res.article.status != ArticleStatus::Published && !res.management_override {
        return ControlFlow::Break(AccessDecision::not_found(res.has_member_content()));
    }
    ControlFlow::Continue(())
}

fn review_gate(res: &mut Resolution<'_>) -> ControlFlow<AccessDecision> {
    if res.article.review_status != ReviewStatus::Approved && !res.management_override {
        return ControlFlow::Break(AccessDecision::not_found(res.has_member_content()));
    }
    ControlFlow::Continue(())
}

fn management_gate(res: &mut Resolution<'_>) -> ControlFlow<AccessDecision> {
    if res.management_override {
        res.content_visible = true;
        res.preview_only = false;
        return ControlFlow::Break(res.finish());
    }
    ControlFlow::Continue(())
}

fn password_gate(res: &mut Resolution<'_>) -> ControlFlow<AccessDecision> {
    let Some(hash) = res.article.password_hash() else {
        return ControlFlow::Continue(());
    };

    let verified = res
        .supplied_password
        .is_some_and(|plain| res.verifier.verify(plain, hash));
    if !verified {
        return ControlFlow::Break(AccessDecision::password_challenge(
            res.supplied_password.is_some(),
            res.has_member_content(),
        ));
    }

    res.password_verified = true;
    ControlFlow::Continue(())
}

fn tier_gate(res: &mut Resolution<'_>) -> ControlFlow<AccessDecision> {
    let required = res.article.required_level();
    if required == 0 || res.viewer.membership().covers(required) {
        res.content_visible = true;
        res.preview_only = false;
    } else {
        res.content_visible = false;
        res.preview_only = true;
    }
    ControlFlow::Continue(())
}

/// Decides what `viewer` may see of `article`.
///
/// Total and side-effect free: every combination of inputs maps to a
/// decision, and identical inputs always map to identical decisions.
/// An empty `supplied_password` is treated as no password.
pub fn resolve(
    article: &ArticleRecord,
    viewer: &ViewerContext,
    supplied_password: Option<&str>,
    verifier: &dyn PasswordVerifier,
) -> AccessDecision {
    let mut res = Resolution::new(article, viewer, supplied_password, verifier);

    for (name, gate) in GATES {
        if let ControlFlow::Break(decision) = gate(&mut res) {
            debug!(
                article_id = %article.id,
                tenant_id = %article.tenant_id,
                gate = name,
                outcome = ?decision.outcome(),
                "Access resolved"
            );
            return decision;
        }
        trace!(article_id = %article.id, gate = name, "Gate passed");
    }

    let decision = res.finish();
    debug!(
        article_id = %article.id,
        tenant_id = %article.tenant_id,
        outcome = ?decision.outcome(),
        member_content_visible = decision.member_content_visible(),
        "Access resolved"
    );
    decision
}

/// Resolves access with a fixed password verifier.
///
/// # Examples
///
/// ```
/// use quire_access::{AccessEngine, AccessOutcome, ViewerContext};
/// use quire_persistence::tenant::TenantId;
/// use quire_persistence::types::{ArticleRecord, ArticleStatus};
///
/// let mut article = ArticleRecord::new(TenantId::new("acme"), "author-1", "Hello");
/// article.status = ArticleStatus::Published;
/// article.content = Some("Body".to_string());
///
/// let engine = AccessEngine::new();
/// let decision = engine.resolve(&article, &ViewerContext::anonymous(), None);
/// assert_eq!(decision.outcome(), AccessOutcome::Full);
/// assert!(decision.should_count_view());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessEngine<V = Argon2PasswordVerifier> {
    verifier: V,
}

impl AccessEngine<Argon2PasswordVerifier> {
    /// Creates an engine verifying Argon2 PHC hashes.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: PasswordVerifier> AccessEngine<V> {
    /// Creates an engine with a custom verifier.
    pub fn with_verifier(verifier: V) -> Self {
        Self { verifier }
    }

    /// Returns the verifier.
    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// See [`resolve`].
    pub fn resolve(
        &self,
        article: &ArticleRecord,
        viewer: &ViewerContext,
        supplied_password: Option<&str>,
    ) -> AccessDecision {
        resolve(article, viewer, supplied_password, &self.verifier)
    }
}
