use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{LinkedIdentity, NewUser, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthError, PasswordService, ProviderProfile, UserRepository};

use super::mask_email;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimal identity handed to the session layer after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            image: user.image,
        }
    }
}

/// Validates sign-in attempts against stored users.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Check an email/password pair.
    ///
    /// Every rejection is `Ok(None)`: missing fields, unknown email, a user
    /// without a password, and a wrong password are indistinguishable to the
    /// caller. Only storage failures surface as errors.
    pub async fn authorize_credentials(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Option<AuthenticatedUser>, RepoError> {
        let (Some(email), Some(password)) = (
            email.map(str::trim).filter(|e| !e.is_empty()),
            password.filter(|p| !p.is_empty()),
        ) else {
            return Ok(None);
        };

        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::debug!(user_email = %mask_email(email), "Sign-in for unknown email");
            return Ok(None);
        };

        let Some(hash) = user.password_hash.as_deref() else {
            tracing::debug!(user_id = %user.id, "Credential sign-in for password-less user");
            return Ok(None);
        };

        match self.passwords.verify(password, hash) {
            Ok(true) => {}
            Ok(false) => return Ok(None),
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                return Ok(None);
            }
        }

        self.record_sign_in(&user).await?;
        Ok(Some(user.into()))
    }

    /// Sign in with a profile obtained from a third-party provider.
    ///
    /// A known identity resolves to its user. An unknown identity whose email
    /// already belongs to a user is refused rather than linked. Otherwise a
    /// new user and identity are created together.
    pub async fn sign_in_with_provider(
        &self,
        profile: ProviderProfile,
    ) -> Result<AuthenticatedUser, AuthError> {
        if let Some(user) = self
            .users
            .find_by_identity(&profile.provider, &profile.provider_account_id)
            .await?
        {
            self.record_sign_in(&user).await?;
            return Ok(user.into());
        }

        let email = profile
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AuthError::Provider("provider returned no email".to_string()))?;

        if self.users.find_by_email(&email).await?.is_some() {
            tracing::warn!(
                provider = %profile.provider,
                user_email = %mask_email(&email),
                "Refusing to link identity to existing account"
            );
            return Err(AuthError::AccountNotLinked);
        }

        let user = User::new(NewUser {
            email,
            name: profile.name,
            image: profile.image,
            ..Default::default()
        });
        let identity = LinkedIdentity::new(user.id, profile.provider, profile.provider_account_id);
        let user = self.users.create_with_identity(user, identity).await?;

        tracing::info!(user_id = %user.id, "Created user from provider sign-in");
        self.record_sign_in(&user).await?;
        Ok(user.into())
    }

    /// Create a credential user.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
        timezone: Option<String>,
    ) -> Result<AuthenticatedUser, DomainError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(DomainError::Duplicate("Email already registered".to_string()));
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = User::new(NewUser {
            email: email.to_string(),
            name,
            timezone,
            password_hash: Some(password_hash),
            ..Default::default()
        });

        let saved = self.users.insert(user).await.map_err(|e| match e {
            RepoError::Constraint(_) => DomainError::Duplicate("Email already registered".to_string()),
            other => DomainError::Repository(other),
        })?;

        tracing::info!(user_email = %mask_email(&saved.email), "User registered");
        Ok(saved.into())
    }

    async fn record_sign_in(&self, user: &User) -> Result<(), RepoError> {
        tracing::info!(user_email = %mask_email(&user.email), "User signed in");
        self.users.touch(user.id, Utc::now()).await
    }
}
