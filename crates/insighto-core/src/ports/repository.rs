use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    AccountTokens, LinkedIdentity, Platform, Post, PostUpsert, PostWithAnalytics, SocialAccount,
    User, UserWithAccounts,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique key collisions fail with
    /// [`RepoError::Constraint`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Set `updated_at`; used as the last sign-in marker.
    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepoError>;

    /// User plus active accounts (newest connection first) and relation counts.
    async fn find_with_accounts(&self, id: Uuid) -> Result<Option<UserWithAccounts>, RepoError>;

    /// Resolve a third-party identity to its linked user.
    async fn find_by_identity(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<User>, RepoError>;

    /// Insert a user and its first linked identity atomically.
    async fn create_with_identity(
        &self,
        user: User,
        identity: LinkedIdentity,
    ) -> Result<User, RepoError>;
}

/// Social account repository.
#[async_trait]
pub trait SocialAccountRepository: BaseRepository<SocialAccount, Uuid> {
    async fn find_by_platform(
        &self,
        user_id: Uuid,
        platform: Platform,
    ) -> Result<Option<SocialAccount>, RepoError>;

    /// Replace tokens and stamp `last_sync_at`.
    async fn update_tokens(
        &self,
        id: Uuid,
        tokens: AccountTokens,
    ) -> Result<SocialAccount, RepoError>;

    /// Replace tokens and mark the account active again, as one write.
    async fn reconnect(&self, id: Uuid, tokens: AccountTokens) -> Result<SocialAccount, RepoError>;

    /// All accounts of a user, newest connection first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SocialAccount>, RepoError>;

    async fn set_active(&self, id: Uuid, active: bool) -> Result<SocialAccount, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Update counters on a (social account, external id) match, else insert.
    async fn upsert(&self, data: PostUpsert) -> Result<Post, RepoError>;

    /// Non-deleted posts, newest `post_date` first, with their analytics.
    async fn recent_posts(
        &self,
        social_account_id: Uuid,
        limit: u64,
    ) -> Result<Vec<PostWithAnalytics>, RepoError>;
}
