use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SocialAccount;

/// Timezone assigned to users who never picked one.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// User entity - an identity record that owns social accounts and insights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub timezone: String,
    /// Absent for users that only ever signed in through a third party.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a user.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub timezone: Option<String>,
    pub password_hash: Option<String>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(new_user: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: new_user.email,
            name: new_user.name,
            image: new_user.image,
            timezone: new_user
                .timezone
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Per-user relation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCounts {
    pub social_accounts: u64,
    pub insights: u64,
}

/// A user together with their active social accounts, newest connection first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithAccounts {
    pub user: User,
    pub social_accounts: Vec<SocialAccount>,
    pub counts: AccountCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_timezone() {
        let user = User::new(NewUser {
            email: "a@b.com".to_string(),
            ..Default::default()
        });

        assert_eq!(user.timezone, "UTC");
        assert!(user.password_hash.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new(NewUser {
            email: "a@b.com".to_string(),
            password_hash: Some("$argon2id$secret".to_string()),
            ..Default::default()
        });

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret"));
    }
}
