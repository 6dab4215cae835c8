//! The engine's output.

use serde::Serialize;

/// Reason given for every denial; deliberately identical for missing,
/// unpublished and unapproved articles.
pub const NOT_FOUND_REASON: &str = "not found";

/// Reason given when a protected article is requested without a password.
pub const PASSWORD_REQUIRED_REASON: &str = "password required";

/// Reason given when the supplied password does not match.
pub const INCORRECT_PASSWORD_REASON: &str = "incorrect password";

/// Tagged summary of an [`AccessDecision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessOutcome {
    /// Treat as a missing article.
    Denied,
    /// Ask the reader for the article password.
    PasswordChallenge,
    /// Serve the teaser instead of the body.
    Preview,
    /// Serve the body.
    Full,
}

/// Everything the projector needs to know about one resolution.
///
/// Decisions are built only by [`resolve`](crate::resolve) and are never
/// cached: membership and password results are specific to one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub(crate) content_visible: bool,
    pub(crate) preview_only: bool,
    pub(crate) member_content_visible: bool,
    pub(crate) password_challenge_required: bool,
    pub(crate) password_verified: bool,
    pub(crate) denied_reason: Option<String>,
    pub(crate) should_count_view: bool,
    pub(crate) has_member_content: bool,
    pub(crate) management_override: bool,
}

impl AccessDecision {
    /// A denial indistinguishable from a missing article.
    pub(crate) fn not_found(has_member_content: bool) -> Self {
        Self {
            content_visible: false,
            preview_only: false,
            member_content_visible: false,
            password_challenge_required: false,
            password_verified: false,
            denied_reason: Some(NOT_FOUND_REASON.to_string()),
            should_count_view: false,
            has_member_content,
            management_override: false,
        }
    }

    /// An outstanding password challenge; neither body nor preview is shown.
    pub(crate) fn password_challenge(password_supplied: bool, has_member_content: bool) -> Self {
        let reason = if password_supplied {
            INCORRECT_PASSWORD_REASON
        } else {
            PASSWORD_REQUIRED_REASON
        };
        Self {
            content_visible: false,
            preview_only: false,
            member_content_visible: false,
            password_challenge_required: true,
            password_verified: false,
            denied_reason: Some(reason.to_string()),
            should_count_view: false,
            has_member_content,
            management_override: false,
        }
    }

    /// May `content` be returned verbatim.
    pub fn content_visible(&self) -> bool {
        self.content_visible
    }

    /// Must the teaser be substituted for `content`.
    pub fn preview_only(&self) -> bool {
        self.preview_only
    }

    /// May `member_content` be attached.
    pub fn member_content_visible(&self) -> bool {
        self.member_content_visible
    }

    /// Must the reader be asked for the article password.
    pub fn password_challenge_required(&self) -> bool {
        self.password_challenge_required
    }

    /// Did the supplied password match.
    pub fn password_verified(&self) -> bool {
        self.password_verified
    }

    /// Why the body is withheld, for denials and password challenges.
    pub fn denied_reason(&self) -> Option<&str> {
        self.denied_reason.as_deref()
    }

    /// Should the view counter be incremented.
    pub fn should_count_view(&self) -> bool {
        self.should_count_view
    }

    /// Does the original record carry member content, whether or not it is
    /// visible to this viewer.
    pub fn has_member_content(&self) -> bool {
        self.has_member_content
    }

    /// Did the viewer bypass the gates as the owner or a tenant admin.
    pub fn management_override(&self) -> bool {
        self.management_override
    }

    /// Returns true for a denial that must surface as "not found".
    pub fn is_denied(&self) -> bool {
        !self.content_visible && !self.preview_only && !self.password_challenge_required
    }

    /// Returns the tagged outcome.
    pub fn outcome(&self) -> AccessOutcome {
        if self.content_visible {
            AccessOutcome::Full
        } else if self.password_challenge_required {
            AccessOutcome::PasswordChallenge
        } else if self.preview_only {
            AccessOutcome::Preview
        } else {
            AccessOutcome::Denied
        }
    }
}
