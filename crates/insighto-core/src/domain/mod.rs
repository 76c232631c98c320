//! Domain entities - the core business objects.

mod enums;
mod identity;
mod insight;
mod post;
mod social_account;
mod user;

pub use enums::{InsightType, Platform, PostType, UnknownVariant};
pub use identity::LinkedIdentity;
pub use insight::AiInsight;
pub use post::{AnalyticsResult, Post, PostUpsert, PostWithAnalytics, RECENT_POSTS_LIMIT};
pub use social_account::{AccountTokens, NewSocialAccount, SocialAccount};
pub use user::{AccountCounts, NewUser, User, UserWithAccounts};
