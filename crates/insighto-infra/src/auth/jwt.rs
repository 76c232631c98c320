//! JWT session store implementation.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use insighto_core::auth::{SESSION_MAX_AGE_DAYS, SessionClaims};
use insighto_core::ports::{AuthError, SessionStore};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT session store configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub max_age_days: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            max_age_days: SESSION_MAX_AGE_DAYS,
            issuer: "insighto".to_string(),
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());

        // Warn if using default secret in production
        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default session secret in production! Set SESSION_SECRET."
                );
            } else {
                tracing::warn!("Using default session secret. Set SESSION_SECRET for production use.");
            }
        }

        Self {
            secret,
            max_age_days: std::env::var("SESSION_MAX_AGE_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|days: &i64| *days > 0)
                .unwrap_or(SESSION_MAX_AGE_DAYS),
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "insighto".to_string()),
        }
    }
}

/// Wire form of the session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provider: Option<String>,
    #[serde(default, rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    iat: i64,
    exp: i64,
    iss: String,
}

/// HS256-signed session tokens.
pub struct JwtSessionStore {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtSessionStore {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(JwtConfig::from_env())
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, AuthError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| AuthError::InvalidToken(format!("timestamp out of range: {secs}")))
}

impl SessionStore for JwtSessionStore {
    fn issue(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        let wire = Claims {
            sub: claims.user_id.to_string(),
            email: claims.email.clone(),
            name: claims.name.clone(),
            picture: claims.image.clone(),
            provider: claims.provider.clone(),
            access_token: claims.access_token.clone(),
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &wire, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;
        let claims = token_data.claims;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let issued_at = timestamp(claims.iat)?;
        let expires_at = timestamp(claims.exp)?;

        // Tokens minted with a longer lifetime than configured are not honoured.
        if expires_at - issued_at > self.max_age() {
            return Err(AuthError::InvalidToken("lifetime exceeds max age".to_string()));
        }

        Ok(SessionClaims {
            user_id,
            email: claims.email,
            name: claims.name,
            image: claims.picture,
            provider: claims.provider,
            access_token: claims.access_token,
            issued_at,
            expires_at,
        })
    }

    fn max_age(&self) -> TimeDelta {
        TimeDelta::days(self.config.max_age_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insighto_core::auth::{AuthenticatedUser, ProviderGrant};
    use insighto_core::ports::{Authorization, DenialReason};

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            max_age_days: 30,
            issuer: "test-issuer".to_string(),
        }
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: Some("Test".to_string()),
            image: Some("https://img.example.com/a.png".to_string()),
        }
    }

    fn claims_at(store: &JwtSessionStore, issued_at: DateTime<Utc>) -> SessionClaims {
        SessionClaims::on_sign_in(
            &user(),
            ProviderGrant {
                provider: "google".to_string(),
                access_token: Some("ya29.token".to_string()),
            },
            issued_at,
            store.max_age(),
        )
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let store = JwtSessionStore::new(test_config());
        // Whole seconds only survive the encoding.
        let now = DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap();
        let claims = claims_at(&store, now);

        let token = store.issue(&claims).unwrap();
        let decoded = store.decode(&token).unwrap();

        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_token_older_than_max_age_is_absent() {
        let store = JwtSessionStore::new(test_config());
        let claims = claims_at(&store, Utc::now() - TimeDelta::days(31));
        let token = store.issue(&claims).unwrap();

        assert!(matches!(store.decode(&token), Err(AuthError::TokenExpired)));
        assert!(matches!(
            store.authorize(Some(&token)),
            Authorization::Denied(DenialReason::Expired)
        ));
    }

    #[test]
    fn test_token_within_max_age_is_granted() {
        let store = JwtSessionStore::new(test_config());
        let claims = claims_at(&store, Utc::now() - TimeDelta::days(29));
        let token = store.issue(&claims).unwrap();

        let authorization = store.authorize(Some(&token));
        assert_eq!(authorization.claims().map(|c| c.user_id), Some(claims.user_id));
    }

    #[test]
    fn test_overlong_lifetime_rejected() {
        let store = JwtSessionStore::new(test_config());
        let mut claims = claims_at(&store, Utc::now());
        claims.expires_at = claims.issued_at + TimeDelta::days(365);
        let token = store.issue(&claims).unwrap();

        assert!(matches!(store.decode(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_missing_and_garbage_tokens_denied() {
        let store = JwtSessionStore::new(test_config());

        assert!(matches!(
            store.authorize(None),
            Authorization::Denied(DenialReason::MissingSession)
        ));
        assert!(matches!(
            store.authorize(Some("")),
            Authorization::Denied(DenialReason::MissingSession)
        ));
        assert!(matches!(
            store.authorize(Some("invalid-token")),
            Authorization::Denied(DenialReason::Invalid)
        ));
    }

    #[test]
    fn test_wrong_secret_or_issuer_rejected() {
        let store = JwtSessionStore::new(test_config());
        let other_secret = JwtSessionStore::new(JwtConfig {
            secret: "other-secret".to_string(),
            ..test_config()
        });
        let other_issuer = JwtSessionStore::new(JwtConfig {
            issuer: "someone-else".to_string(),
            ..test_config()
        });

        let token = store.issue(&claims_at(&store, Utc::now())).unwrap();

        assert!(other_secret.decode(&token).is_err());
        assert!(other_issuer.decode(&token).is_err());
    }

    #[test]
    fn test_max_age() {
        let store = JwtSessionStore::new(JwtConfig::default());
        assert_eq!(store.max_age().num_seconds(), 30 * 24 * 60 * 60);
    }
}
