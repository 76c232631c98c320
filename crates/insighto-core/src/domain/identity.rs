use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Third-party sign-in identity linked to a user.
///
/// Unique per (provider, provider account id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedIdentity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String,
    pub provider_account_id: String,
    pub created_at: DateTime<Utc>,
}

impl LinkedIdentity {
    pub fn new(user_id: Uuid, provider: impl Into<String>, provider_account_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            provider: provider.into(),
            provider_account_id: provider_account_id.into(),
            created_at: Utc::now(),
        }
    }
}
