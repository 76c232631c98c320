//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Request to register a new credential user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Credential sign-in form. Fields are optional so that missing values are a
/// sign-in failure rather than a malformed request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
}

/// Issued after a successful sign-in or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub session: Session,
    /// Where the client should navigate next.
    pub url: String,
}

/// Query accepted by the provider sign-in redirect.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInQuery {
    #[serde(default)]
    pub callback_url: Option<String>,
}

/// Query the provider appends when redirecting back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    pub signin_url: String,
    pub callback_url: String,
}

/// Public view of a social account; tokens never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialAccountView {
    pub id: String,
    pub platform: String,
    pub account_id: String,
    pub username: Option<String>,
    pub is_active: bool,
    pub connected_at: DateTime<Utc>,
    pub last_sync_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    pub social_accounts: Vec<SocialAccountView>,
    pub social_account_count: u64,
    pub insight_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectAccountRequest {
    pub platform: String,
    pub account_id: String,
    #[serde(default)]
    pub username: Option<String>,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTokensRequest {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertPostRequest {
    pub post_id: String,
    #[serde(default)]
    pub content: Option<String>,
    pub post_date: DateTime<Utc>,
    #[serde(default)]
    pub likes_count: Option<i64>,
    #[serde(default)]
    pub comments_count: Option<i64>,
    #[serde(default)]
    pub shares_count: Option<i64>,
    #[serde(default)]
    pub post_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentPostsQuery {
    #[serde(default)]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResultView {
    pub metric: String,
    pub value: f64,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: String,
    pub post_id: String,
    pub content: Option<String>,
    pub post_type: String,
    pub post_date: DateTime<Utc>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub shares_count: i64,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analytics: Vec<AnalyticsResultView>,
}
