//! Page guard for authenticated-only views.
//!
//! A page starts in [`SessionStatus::Loading`] and resolves exactly once to
//! either an authenticated session or no session. The guard never renders
//! protected content before resolution.

use crate::session::Session;

/// Path of the sign-in page.
pub const SIGN_IN_PATH: &str = "/auth/signin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Authenticated(Session),
    Unauthenticated,
}

impl SessionStatus {
    pub fn from_resolved(session: Option<Session>) -> Self {
        match session {
            Some(session) => Self::Authenticated(session),
            None => Self::Unauthenticated,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// What a guarded page should do for a given status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<'a> {
    /// Status unknown yet; show a placeholder.
    Placeholder,
    Render(&'a Session),
    Redirect(String),
}

pub fn guard<'a>(status: &'a SessionStatus, sign_in_path: &str) -> GuardOutcome<'a> {
    match status {
        SessionStatus::Loading => GuardOutcome::Placeholder,
        SessionStatus::Authenticated(session) => GuardOutcome::Render(session),
        SessionStatus::Unauthenticated => GuardOutcome::Redirect(sign_in_path.to_string()),
    }
}
