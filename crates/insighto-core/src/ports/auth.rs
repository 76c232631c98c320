//! Authentication and authorization ports.

use async_trait::async_trait;
use chrono::TimeDelta;

use crate::auth::SessionClaims;
use crate::error::RepoError;

/// Signed, time-limited session tokens.
///
/// The token is the only source of truth for a session; no server-side
/// session table is consulted.
pub trait SessionStore: Send + Sync {
    /// Encode and sign the claims.
    fn issue(&self, claims: &SessionClaims) -> Result<String, AuthError>;

    /// Verify the signature and expiry, then decode.
    fn decode(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Lifetime of a freshly issued session.
    fn max_age(&self) -> TimeDelta;

    /// Resolve an optional presented token into an authorization result.
    fn authorize(&self, token: Option<&str>) -> Authorization {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Authorization::Denied(DenialReason::MissingSession);
        };

        match self.decode(token) {
            Ok(claims) => Authorization::Granted(claims),
            Err(AuthError::TokenExpired) => Authorization::Denied(DenialReason::Expired),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                Authorization::Denied(DenialReason::Invalid)
            }
        }
    }
}

/// Outcome of checking a request's session.
#[derive(Debug, Clone)]
pub enum Authorization {
    Granted(SessionClaims),
    Denied(DenialReason),
}

impl Authorization {
    pub fn claims(&self) -> Option<&SessionClaims> {
        match self {
            Self::Granted(claims) => Some(claims),
            Self::Denied(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    MissingSession,
    Expired,
    Invalid,
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Identity returned by a third-party provider after the code exchange.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    pub provider: String,
    pub provider_account_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub access_token: Option<String>,
}

/// OAuth authorization-code provider (Google, GitHub, ...).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Stable identifier used in URLs and sessions, e.g. `"github"`.
    fn id(&self) -> &'static str;

    /// Human readable name.
    fn name(&self) -> &'static str;

    /// URL of the provider consent screen.
    fn authorization_url(&self, state: &str, redirect_uri: &str) -> Result<String, AuthError>;

    /// Exchange an authorization code for the signed-in profile.
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<ProviderProfile, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Identity is not linked to the existing account for this email")]
    AccountNotLinked,

    #[error("Identity provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Repository(#[from] RepoError),
}
