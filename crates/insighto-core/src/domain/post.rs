use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PostType;

/// Default page size for recent post listings.
pub const RECENT_POSTS_LIMIT: u64 = 50;

/// Post entity - content published through a social account.
///
/// Unique per (social account, external post id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub social_account_id: Uuid,
    /// Post id on the external platform.
    pub post_id: String,
    pub content: Option<String>,
    pub post_type: PostType,
    pub post_date: DateTime<Utc>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub shares_count: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for the post upsert.
///
/// On a key match only the counters and `updated_at` change; missing
/// counters reset to zero.
#[derive(Debug, Clone)]
pub struct PostUpsert {
    pub social_account_id: Uuid,
    pub post_id: String,
    pub content: Option<String>,
    pub post_date: DateTime<Utc>,
    pub likes_count: Option<i64>,
    pub comments_count: Option<i64>,
    pub shares_count: Option<i64>,
    pub post_type: Option<PostType>,
}

impl PostUpsert {
    /// Build the row inserted when no post matches the key.
    pub fn into_post(self) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            social_account_id: self.social_account_id,
            post_id: self.post_id,
            content: self.content,
            post_type: self.post_type.unwrap_or_default(),
            post_date: self.post_date,
            likes_count: self.likes_count.unwrap_or(0),
            comments_count: self.comments_count.unwrap_or(0),
            shares_count: self.shares_count.unwrap_or(0),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the update half of the upsert to an existing row.
    pub fn apply_to(&self, mut existing: Post) -> Post {
        existing.likes_count = self.likes_count.unwrap_or(0);
        existing.comments_count = self.comments_count.unwrap_or(0);
        existing.shares_count = self.shares_count.unwrap_or(0);
        existing.updated_at = Utc::now();
        existing
    }
}

/// A computed metric attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    pub id: Uuid,
    pub post_id: Uuid,
    pub metric: String,
    pub value: f64,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithAnalytics {
    pub post: Post,
    pub analytics_results: Vec<AnalyticsResult>,
}
