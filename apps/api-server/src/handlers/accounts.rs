//! Profile, social account and post handlers. All require a session.

use std::str::FromStr;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use insighto_core::domain::{
    AccountTokens, NewSocialAccount, Platform, PostType, PostUpsert, PostWithAnalytics,
    RECENT_POSTS_LIMIT, SocialAccount,
};
use insighto_core::ports::BaseRepository;
use insighto_shared::dto::{
    AnalyticsResultView, ConnectAccountRequest, PostView, RecentPostsQuery, SocialAccountView,
    UpdateTokensRequest, UpsertPostRequest, UserProfileResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Upper bound for `?limit=` on the posts listing.
const MAX_POSTS_LIMIT: u64 = 200;

fn account_view(account: SocialAccount) -> SocialAccountView {
    SocialAccountView {
        id: account.id.to_string(),
        platform: account.platform.to_string(),
        account_id: account.account_id,
        username: account.username,
        is_active: account.is_active,
        connected_at: account.connected_at,
        last_sync_at: account.last_sync_at,
    }
}

fn post_view(item: PostWithAnalytics) -> PostView {
    let post = item.post;
    PostView {
        id: post.id.to_string(),
        post_id: post.post_id,
        content: post.content,
        post_type: post.post_type.to_string(),
        post_date: post.post_date,
        likes_count: post.likes_count,
        comments_count: post.comments_count,
        shares_count: post.shares_count,
        updated_at: post.updated_at,
        analytics: item
            .analytics_results
            .into_iter()
            .map(|r| AnalyticsResultView {
                metric: r.metric,
                value: r.value,
                computed_at: r.computed_at,
            })
            .collect(),
    }
}

fn require_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Fetch an account the caller owns. Someone else's account is reported as
/// missing so its existence is not revealed.
async fn owned_account(state: &AppState, identity: &Identity, id: Uuid) -> AppResult<SocialAccount> {
    match state.social_accounts.find_by_id(id).await? {
        Some(account) if account.user_id == identity.user_id => Ok(account),
        _ => Err(AppError::NotFound(format!("Social account {id} not found"))),
    }
}

/// GET /api/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let found = state
        .users
        .find_with_accounts(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let user = found.user;
    Ok(HttpResponse::Ok().json(UserProfileResponse {
        id: user.id.to_string(),
        email: user.email,
        name: user.name,
        image: user.image,
        timezone: user.timezone,
        created_at: user.created_at,
        social_accounts: found.social_accounts.into_iter().map(account_view).collect(),
        social_account_count: found.counts.social_accounts,
        insight_count: found.counts.insights,
    }))
}

/// GET /api/accounts
pub async fn list_accounts(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let accounts = state.social_accounts.list_for_user(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(
        accounts
            .into_iter()
            .map(account_view)
            .collect::<Vec<_>>(),
    ))
}

/// POST /api/accounts
///
/// A disconnected account for the same platform is reactivated with the new
/// tokens; an active one is a conflict.
pub async fn connect_account(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ConnectAccountRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let platform = Platform::from_str(&req.platform)?;
    require_non_empty("account_id", &req.account_id)?;
    require_non_empty("access_token", &req.access_token)?;

    if let Some(existing) = state
        .social_accounts
        .find_by_platform(identity.user_id, platform)
        .await?
    {
        if existing.is_active {
            return Err(AppError::Conflict(format!("{platform} account already connected")));
        }

        let account = state
            .social_accounts
            .reconnect(
                existing.id,
                AccountTokens {
                    access_token: req.access_token,
                    refresh_token: req.refresh_token,
                },
            )
            .await?;
        tracing::info!(user_id = %identity.user_id, %platform, "Social account reconnected");
        return Ok(HttpResponse::Ok().json(account_view(account)));
    }

    let account = state
        .social_accounts
        .insert(SocialAccount::new(NewSocialAccount {
            user_id: identity.user_id,
            platform,
            account_id: req.account_id,
            username: req.username,
            access_token: req.access_token,
            refresh_token: req.refresh_token,
        }))
        .await?;

    tracing::info!(user_id = %identity.user_id, %platform, "Social account connected");
    Ok(HttpResponse::Created().json(account_view(account)))
}

/// PUT /api/accounts/{id}/tokens
pub async fn update_tokens(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTokensRequest>,
) -> AppResult<HttpResponse> {
    let account = owned_account(&state, &identity, path.into_inner()).await?;
    let req = body.into_inner();
    require_non_empty("access_token", &req.access_token)?;

    let updated = state
        .social_accounts
        .update_tokens(
            account.id,
            AccountTokens {
                access_token: req.access_token,
                refresh_token: req.refresh_token,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(account_view(updated)))
}

/// DELETE /api/accounts/{id}
pub async fn disconnect_account(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let account = owned_account(&state, &identity, path.into_inner()).await?;
    state.social_accounts.set_active(account.id, false).await?;

    tracing::info!(
        user_id = %identity.user_id,
        platform = %account.platform,
        "Social account disconnected"
    );
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/accounts/{id}/posts
pub async fn upsert_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpsertPostRequest>,
) -> AppResult<HttpResponse> {
    let account = owned_account(&state, &identity, path.into_inner()).await?;
    let req = body.into_inner();
    require_non_empty("post_id", &req.post_id)?;
    let post_type = req
        .post_type
        .as_deref()
        .map(PostType::from_str)
        .transpose()?;

    let post = state
        .posts
        .upsert(PostUpsert {
            social_account_id: account.id,
            post_id: req.post_id,
            content: req.content,
            post_date: req.post_date,
            likes_count: req.likes_count,
            comments_count: req.comments_count,
            shares_count: req.shares_count,
            post_type,
        })
        .await?;

    Ok(HttpResponse::Ok().json(post_view(PostWithAnalytics {
        post,
        analytics_results: Vec::new(),
    })))
}

/// GET /api/accounts/{id}/posts?limit=
pub async fn recent_posts(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    query: web::Query<RecentPostsQuery>,
) -> AppResult<HttpResponse> {
    let account = owned_account(&state, &identity, path.into_inner()).await?;
    let limit = query
        .limit
        .unwrap_or(RECENT_POSTS_LIMIT)
        .clamp(1, MAX_POSTS_LIMIT);

    let posts = state.posts.recent_posts(account.id, limit).await?;

    Ok(HttpResponse::Ok().json(posts.into_iter().map(post_view).collect::<Vec<_>>()))
}
