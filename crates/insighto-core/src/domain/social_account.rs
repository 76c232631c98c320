use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Platform;

/// A link between a user and one external platform identity.
///
/// At most one account exists per (user, platform) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccount {
    pub id: Uuid,
    pub user_id: Uuid,
    pub platform: Platform,
    /// Account id on the external platform.
    pub account_id: String,
    pub username: Option<String>,
    #[serde(skip_serializing, default)]
    pub access_token: String,
    #[serde(skip_serializing, default)]
    pub refresh_token: Option<String>,
    pub is_active: bool,
    pub connected_at: DateTime<Utc>,
    pub last_sync_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewSocialAccount {
    pub user_id: Uuid,
    pub platform: Platform,
    pub account_id: String,
    pub username: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Replacement credentials for an existing account.
///
/// A missing refresh token leaves the stored one untouched.
#[derive(Debug, Clone)]
pub struct AccountTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl SocialAccount {
    pub fn new(data: NewSocialAccount) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            platform: data.platform,
            account_id: data.account_id,
            username: data.username,
            access_token: data.access_token,
            refresh_token: data.refresh_token,
            is_active: true,
            connected_at: Utc::now(),
            last_sync_at: None,
        }
    }

    /// Apply new tokens and stamp the sync time.
    pub fn with_tokens(mut self, tokens: AccountTokens, at: DateTime<Utc>) -> Self {
        self.access_token = tokens.access_token;
        if let Some(refresh) = tokens.refresh_token {
            self.refresh_token = Some(refresh);
        }
        self.last_sync_at = Some(at);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> SocialAccount {
        SocialAccount::new(NewSocialAccount {
            user_id: Uuid::new_v4(),
            platform: Platform::Twitter,
            account_id: "12345".to_string(),
            username: Some("@insighto".to_string()),
            access_token: "old-access".to_string(),
            refresh_token: Some("old-refresh".to_string()),
        })
    }

    #[test]
    fn test_new_account_is_active_and_unsynced() {
        let account = account();
        assert!(account.is_active);
        assert!(account.last_sync_at.is_none());
    }

    #[test]
    fn test_with_tokens_keeps_refresh_when_absent() {
        let now = Utc::now();
        let updated = account().with_tokens(
            AccountTokens {
                access_token: "new-access".to_string(),
                refresh_token: None,
            },
            now,
        );

        assert_eq!(updated.access_token, "new-access");
        assert_eq!(updated.refresh_token.as_deref(), Some("old-refresh"));
        assert_eq!(updated.last_sync_at, Some(now));
    }
}
