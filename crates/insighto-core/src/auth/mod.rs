//! Sign-in rules: credential and third-party authentication, session
//! claims, and callback redirect resolution.

mod authenticator;
mod redirect;
mod session;

pub use authenticator::{AuthenticatedUser, Authenticator, MIN_PASSWORD_LENGTH};
pub use redirect::{DEFAULT_REDIRECT_PATH, resolve_redirect};
pub use session::{CREDENTIALS_PROVIDER, ProviderGrant, SESSION_MAX_AGE_DAYS, SessionClaims};

/// Mask an email for logging, keeping the first character and the domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}
