//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use insighto_core::auth::mask_email;
use insighto_core::domain::{
    AccountCounts, AccountTokens, LinkedIdentity, Platform, Post, PostUpsert, PostWithAnalytics,
    SocialAccount, User, UserWithAccounts,
};
use insighto_core::error::RepoError;
use insighto_core::ports::{PostRepository, SocialAccountRepository, UserRepository};

use super::connections::with_transaction;
use super::entity::ai_insight::{self, Entity as AiInsightEntity};
use super::entity::analytics_result::Entity as AnalyticsResultEntity;
use super::entity::linked_identity::{self, Entity as LinkedIdentityEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::social_account::{self, Entity as SocialAccountEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL social account repository.
pub type PostgresSocialAccountRepository = PostgresBaseRepository<SocialAccountEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepoError> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::UpdatedAt, Expr::value(at.fixed_offset()))
            .filter(user::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn find_with_accounts(&self, id: Uuid) -> Result<Option<UserWithAccounts>, RepoError> {
        let Some(user) = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let social_accounts = SocialAccountEntity::find()
            .filter(social_account::Column::UserId.eq(id))
            .filter(social_account::Column::IsActive.eq(true))
            .order_by_desc(social_account::Column::ConnectedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        let account_count = SocialAccountEntity::find()
            .filter(social_account::Column::UserId.eq(id))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        let insight_count = AiInsightEntity::find()
            .filter(ai_insight::Column::UserId.eq(id))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(Some(UserWithAccounts {
            user: user.into(),
            social_accounts: social_accounts.into_iter().map(Into::into).collect(),
            counts: AccountCounts {
                social_accounts: account_count,
                insights: insight_count,
            },
        }))
    }

    async fn find_by_identity(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<User>, RepoError> {
        let Some(identity) = LinkedIdentityEntity::find()
            .filter(linked_identity::Column::Provider.eq(provider))
            .filter(linked_identity::Column::ProviderAccountId.eq(provider_account_id))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let result = UserEntity::find_by_id(identity.user_id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create_with_identity(
        &self,
        user: User,
        identity: LinkedIdentity,
    ) -> Result<User, RepoError> {
        let user_model: user::ActiveModel = user.into();
        let identity_model: linked_identity::ActiveModel = identity.into();

        let created = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                let created = user_model.insert(txn).await?;
                identity_model.insert(txn).await?;
                Ok(created)
            })
        })
        .await?;

        Ok(created.into())
    }
}

/// A missing refresh token keeps the stored one.
fn token_update(id: Uuid, tokens: AccountTokens) -> social_account::ActiveModel {
    let mut model = social_account::ActiveModel {
        id: Set(id),
        access_token: Set(tokens.access_token),
        last_sync_at: Set(Some(Utc::now().fixed_offset())),
        ..Default::default()
    };
    if let Some(refresh) = tokens.refresh_token {
        model.refresh_token = Set(Some(refresh));
    }
    model
}

#[async_trait]
impl SocialAccountRepository for PostgresSocialAccountRepository {
    async fn find_by_platform(
        &self,
        user_id: Uuid,
        platform: Platform,
    ) -> Result<Option<SocialAccount>, RepoError> {
        let platform: super::entity::enums::Platform = platform.into();
        let result = SocialAccountEntity::find()
            .filter(social_account::Column::UserId.eq(user_id))
            .filter(social_account::Column::Platform.eq(platform))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn update_tokens(
        &self,
        id: Uuid,
        tokens: AccountTokens,
    ) -> Result<SocialAccount, RepoError> {
        let updated = token_update(id, tokens)
            .update(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(updated.into())
    }

    async fn reconnect(&self, id: Uuid, tokens: AccountTokens) -> Result<SocialAccount, RepoError> {
        let mut model = token_update(id, tokens);
        model.is_active = Set(true);

        let updated = model.update(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(updated.into())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SocialAccount>, RepoError> {
        let result = SocialAccountEntity::find()
            .filter(social_account::Column::UserId.eq(user_id))
            .order_by_desc(social_account::Column::ConnectedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<SocialAccount, RepoError> {
        let model = social_account::ActiveModel {
            id: Set(id),
            is_active: Set(active),
            ..Default::default()
        };

        let updated = model.update(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(updated.into())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn upsert(&self, data: PostUpsert) -> Result<Post, RepoError> {
        let model: post::ActiveModel = data.into_post().into();

        let on_conflict = OnConflict::columns([post::Column::SocialAccountId, post::Column::PostId])
            .update_columns([
                post::Column::LikesCount,
                post::Column::CommentsCount,
                post::Column::SharesCount,
                post::Column::UpdatedAt,
            ])
            .to_owned();

        let saved = PostEntity::insert(model)
            .on_conflict(on_conflict)
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(saved.into())
    }

    async fn recent_posts(
        &self,
        social_account_id: Uuid,
        limit: u64,
    ) -> Result<Vec<PostWithAnalytics>, RepoError> {
        let posts = PostEntity::find()
            .filter(post::Column::SocialAccountId.eq(social_account_id))
            .filter(post::Column::IsDeleted.eq(false))
            .order_by_desc(post::Column::PostDate)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        let analytics = posts
            .load_many(AnalyticsResultEntity, self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(posts
            .into_iter()
            .zip(analytics)
            .map(|(post, results)| PostWithAnalytics {
                post: post.into(),
                analytics_results: results.into_iter().map(Into::into).collect(),
            })
            .collect())
    }
}
