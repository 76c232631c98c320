//! In-memory repositories.
//!
//! Used when no database is configured and by tests. Unique keys are
//! enforced the same way the relational schema enforces them.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use insighto_core::domain::{
    AccountCounts, AccountTokens, AiInsight, AnalyticsResult, LinkedIdentity, Platform, Post,
    PostUpsert, PostWithAnalytics, SocialAccount, User, UserWithAccounts,
};
use insighto_core::error::RepoError;
use insighto_core::ports::{
    BaseRepository, PostRepository, SocialAccountRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    identities: Vec<LinkedIdentity>,
    social_accounts: HashMap<Uuid, SocialAccount>,
    posts: HashMap<Uuid, Post>,
    analytics: Vec<AnalyticsResult>,
    insights: Vec<AiInsight>,
}

/// Shared backing store for the in-memory repositories.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, RepoError> {
        self.tables
            .read()
            .map_err(|_| RepoError::Connection("in-memory store poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, RepoError> {
        self.tables
            .write()
            .map_err(|_| RepoError::Connection("in-memory store poisoned".to_string()))
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository(self.clone())
    }

    pub fn social_accounts(&self) -> InMemorySocialAccountRepository {
        InMemorySocialAccountRepository(self.clone())
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository(self.clone())
    }

    /// Attach an analytics row to a post.
    pub fn record_analytics(&self, result: AnalyticsResult) -> Result<(), RepoError> {
        let mut tables = self.write()?;
        if !tables.posts.contains_key(&result.post_id) {
            return Err(RepoError::Constraint("analytics_results.post_id".to_string()));
        }
        tables.analytics.push(result);
        Ok(())
    }

    /// Attach an insight row to a user.
    pub fn record_insight(&self, insight: AiInsight) -> Result<(), RepoError> {
        let mut tables = self.write()?;
        if !tables.users.contains_key(&insight.user_id) {
            return Err(RepoError::Constraint("ai_insights.user_id".to_string()));
        }
        tables.insights.push(insight);
        Ok(())
    }
}

fn insert_user(tables: &mut Tables, user: User) -> Result<User, RepoError> {
    if tables.users.values().any(|u| u.email == user.email) {
        return Err(RepoError::Constraint("users.email".to_string()));
    }
    tables.users.insert(user.id, user.clone());
    Ok(user)
}

fn newest_first(accounts: &mut [SocialAccount]) {
    accounts.sort_by(|a, b| b.connected_at.cmp(&a.connected_at));
}

pub struct InMemoryUserRepository(InMemoryStore);

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.0.read()?.users.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.0.write()?;
        insert_user(&mut tables, user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.0.write()?;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;

        // Mirror ON DELETE CASCADE.
        tables.identities.retain(|i| i.user_id != id);
        tables.insights.retain(|i| i.user_id != id);
        let accounts: Vec<Uuid> = tables
            .social_accounts
            .values()
            .filter(|a| a.user_id == id)
            .map(|a| a.id)
            .collect();
        for account in &accounts {
            tables.social_accounts.remove(account);
        }
        let posts: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| accounts.contains(&p.social_account_id))
            .map(|p| p.id)
            .collect();
        tables.posts.retain(|id, _| !posts.contains(id));
        tables.analytics.retain(|r| !posts.contains(&r.post_id));
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .0
            .read()?
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepoError> {
        let mut tables = self.0.write()?;
        let user = tables.users.get_mut(&id).ok_or(RepoError::NotFound)?;
        user.updated_at = at;
        Ok(())
    }

    async fn find_with_accounts(&self, id: Uuid) -> Result<Option<UserWithAccounts>, RepoError> {
        let tables = self.0.read()?;
        let Some(user) = tables.users.get(&id).cloned() else {
            return Ok(None);
        };

        let owned: Vec<&SocialAccount> = tables
            .social_accounts
            .values()
            .filter(|a| a.user_id == id)
            .collect();
        let mut social_accounts: Vec<SocialAccount> = owned
            .iter()
            .filter(|a| a.is_active)
            .map(|a| (*a).clone())
            .collect();
        newest_first(&mut social_accounts);

        let counts = AccountCounts {
            social_accounts: owned.len() as u64,
            insights: tables.insights.iter().filter(|i| i.user_id == id).count() as u64,
        };

        Ok(Some(UserWithAccounts {
            user,
            social_accounts,
            counts,
        }))
    }

    async fn find_by_identity(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<User>, RepoError> {
        let tables = self.0.read()?;
        Ok(tables
            .identities
            .iter()
            .find(|i| i.provider == provider && i.provider_account_id == provider_account_id)
            .and_then(|i| tables.users.get(&i.user_id))
            .cloned())
    }

    async fn create_with_identity(
        &self,
        user: User,
        identity: LinkedIdentity,
    ) -> Result<User, RepoError> {
        // Both checks run under one write lock, so either both rows land or neither.
        let mut tables = self.0.write()?;
        if tables.identities.iter().any(|i| {
            i.provider == identity.provider && i.provider_account_id == identity.provider_account_id
        }) {
            return Err(RepoError::Constraint(
                "linked_identities.provider_account".to_string(),
            ));
        }
        let user = insert_user(&mut tables, user)?;
        tables.identities.push(identity);
        Ok(user)
    }
}

pub struct InMemorySocialAccountRepository(InMemoryStore);

#[async_trait]
impl BaseRepository<SocialAccount, Uuid> for InMemorySocialAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SocialAccount>, RepoError> {
        Ok(self.0.read()?.social_accounts.get(&id).cloned())
    }

    async fn insert(&self, account: SocialAccount) -> Result<SocialAccount, RepoError> {
        let mut tables = self.0.write()?;
        if !tables.users.contains_key(&account.user_id) {
            return Err(RepoError::Constraint("social_accounts.user_id".to_string()));
        }
        if tables
            .social_accounts
            .values()
            .any(|a| a.user_id == account.user_id && a.platform == account.platform)
        {
            return Err(RepoError::Constraint(
                "social_accounts.user_id_platform".to_string(),
            ));
        }
        tables.social_accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.0.write()?;
        tables.social_accounts.remove(&id).ok_or(RepoError::NotFound)?;
        let posts: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.social_account_id == id)
            .map(|p| p.id)
            .collect();
        tables.posts.retain(|id, _| !posts.contains(id));
        tables.analytics.retain(|r| !posts.contains(&r.post_id));
        Ok(())
    }
}

#[async_trait]
impl SocialAccountRepository for InMemorySocialAccountRepository {
    async fn find_by_platform(
        &self,
        user_id: Uuid,
        platform: Platform,
    ) -> Result<Option<SocialAccount>, RepoError> {
        Ok(self
            .0
            .read()?
            .social_accounts
            .values()
            .find(|a| a.user_id == user_id && a.platform == platform)
            .cloned())
    }

    async fn update_tokens(
        &self,
        id: Uuid,
        tokens: AccountTokens,
    ) -> Result<SocialAccount, RepoError> {
        let mut tables = self.0.write()?;
        let account = tables.social_accounts.remove(&id).ok_or(RepoError::NotFound)?;
        let account = account.with_tokens(tokens, Utc::now());
        tables.social_accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn reconnect(&self, id: Uuid, tokens: AccountTokens) -> Result<SocialAccount, RepoError> {
        let mut tables = self.0.write()?;
        let account = tables.social_accounts.remove(&id).ok_or(RepoError::NotFound)?;
        let mut account = account.with_tokens(tokens, Utc::now());
        account.is_active = true;
        tables.social_accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SocialAccount>, RepoError> {
        let mut accounts: Vec<SocialAccount> = self
            .0
            .read()?
            .social_accounts
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut accounts);
        Ok(accounts)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<SocialAccount, RepoError> {
        let mut tables = self.0.write()?;
        let account = tables.social_accounts.get_mut(&id).ok_or(RepoError::NotFound)?;
        account.is_active = active;
        Ok(account.clone())
    }
}

pub struct InMemoryPostRepository(InMemoryStore);

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.0.read()?.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.0.write()?;
        if !tables.social_accounts.contains_key(&post.social_account_id) {
            return Err(RepoError::Constraint("posts.social_account_id".to_string()));
        }
        if tables
            .posts
            .values()
            .any(|p| p.social_account_id == post.social_account_id && p.post_id == post.post_id)
        {
            return Err(RepoError::Constraint(
                "posts.social_account_id_post_id".to_string(),
            ));
        }
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.0.write()?;
        tables.posts.remove(&id).ok_or(RepoError::NotFound)?;
        tables.analytics.retain(|r| r.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn upsert(&self, data: PostUpsert) -> Result<Post, RepoError> {
        let mut tables = self.0.write()?;
        let existing = tables
            .posts
            .values()
            .find(|p| p.social_account_id == data.social_account_id && p.post_id == data.post_id)
            .cloned();

        let post = match existing {
            Some(existing) => data.apply_to(existing),
            None => {
                if !tables.social_accounts.contains_key(&data.social_account_id) {
                    return Err(RepoError::Constraint("posts.social_account_id".to_string()));
                }
                data.into_post()
            }
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn recent_posts(
        &self,
        social_account_id: Uuid,
        limit: u64,
    ) -> Result<Vec<PostWithAnalytics>, RepoError> {
        let tables = self.0.read()?;
        let mut posts: Vec<&Post> = tables
            .posts
            .values()
            .filter(|p| p.social_account_id == social_account_id && !p.is_deleted)
            .collect();
        posts.sort_by(|a, b| b.post_date.cmp(&a.post_date));

        Ok(posts
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|post| PostWithAnalytics {
                post: post.clone(),
                analytics_results: tables
                    .analytics
                    .iter()
                    .filter(|r| r.post_id == post.id)
                    .cloned()
                    .collect(),
            })
            .collect())
    }
}
