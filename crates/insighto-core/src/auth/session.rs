use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use super::AuthenticatedUser;

/// Both the session and its token live for this many days.
pub const SESSION_MAX_AGE_DAYS: i64 = 30;

/// Provider name recorded for email/password sign-ins.
pub const CREDENTIALS_PROVIDER: &str = "credentials";

/// How the user signed in, recorded once when the token is first minted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderGrant {
    pub provider: String,
    pub access_token: Option<String>,
}

impl ProviderGrant {
    pub fn credentials() -> Self {
        Self {
            provider: CREDENTIALS_PROVIDER.to_string(),
            access_token: None,
        }
    }
}

/// Everything a session token carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub provider: Option<String>,
    pub access_token: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Claims for a fresh sign-in, expiring `max_age` after `now`.
    pub fn on_sign_in(
        user: &AuthenticatedUser,
        grant: ProviderGrant,
        now: DateTime<Utc>,
        max_age: TimeDelta,
    ) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            image: user.image.clone(),
            provider: Some(grant.provider),
            access_token: grant.access_token,
            issued_at: now,
            expires_at: now + max_age,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            name: Some("Ada".to_string()),
            image: None,
        }
    }

    #[test]
    fn test_on_sign_in_sets_expiry_from_max_age() {
        let now = Utc::now();
        let user = user();

        let claims = SessionClaims::on_sign_in(
            &user,
            ProviderGrant::credentials(),
            now,
            TimeDelta::days(SESSION_MAX_AGE_DAYS),
        );

        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.provider.as_deref(), Some("credentials"));
        assert!(claims.access_token.is_none());
        assert_eq!(claims.expires_at - claims.issued_at, TimeDelta::days(30));
    }

    #[test]
    fn test_oauth_grant_carries_access_token() {
        let claims = SessionClaims::on_sign_in(
            &user(),
            ProviderGrant {
                provider: "github".to_string(),
                access_token: Some("gho_abc".to_string()),
            },
            Utc::now(),
            TimeDelta::days(1),
        );

        assert_eq!(claims.provider.as_deref(), Some("github"));
        assert_eq!(claims.access_token.as_deref(), Some("gho_abc"));
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let claims =
            SessionClaims::on_sign_in(&user(), ProviderGrant::credentials(), now, TimeDelta::days(30));

        assert!(!claims.is_expired_at(now + TimeDelta::days(29)));
        assert!(claims.is_expired_at(now + TimeDelta::days(30)));
        assert!(claims.is_expired_at(now + TimeDelta::days(31)));
    }
}
