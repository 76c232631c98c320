//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use super::enums::PostType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub social_account_id: Uuid,
    /// External post id; unique together with `social_account_id`.
    pub post_id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub post_type: PostType,
    pub post_date: DateTimeWithTimeZone,
    pub likes_count: i64,
    pub comments_count: i64,
    pub shares_count: i64,
    pub is_deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::social_account::Entity",
        from = "Column::SocialAccountId",
        to = "super::social_account::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    SocialAccount,
    #[sea_orm(has_many = "super::analytics_result::Entity")]
    AnalyticsResult,
}

impl Related<super::social_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialAccount.def()
    }
}

impl Related<super::analytics_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnalyticsResult.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for insighto_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            social_account_id: model.social_account_id,
            post_id: model.post_id,
            content: model.content,
            post_type: model.post_type.into(),
            post_date: model.post_date.into(),
            likes_count: model.likes_count,
            comments_count: model.comments_count,
            shares_count: model.shares_count,
            is_deleted: model.is_deleted,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<insighto_core::domain::Post> for ActiveModel {
    fn from(post: insighto_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            social_account_id: Set(post.social_account_id),
            post_id: Set(post.post_id),
            content: Set(post.content),
            post_type: Set(post.post_type.into()),
            post_date: Set(post.post_date.into()),
            likes_count: Set(post.likes_count),
            comments_count: Set(post.comments_count),
            shares_count: Set(post.shares_count),
            is_deleted: Set(post.is_deleted),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
