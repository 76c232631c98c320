//! Social account entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use super::enums::Platform;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "social_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub platform: Platform,
    pub account_id: String,
    pub username: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub access_token: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub refresh_token: Option<String>,
    pub is_active: bool,
    pub connected_at: DateTimeWithTimeZone,
    pub last_sync_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for insighto_core::domain::SocialAccount {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            platform: model.platform.into(),
            account_id: model.account_id,
            username: model.username,
            access_token: model.access_token,
            refresh_token: model.refresh_token,
            is_active: model.is_active,
            connected_at: model.connected_at.into(),
            last_sync_at: model.last_sync_at.map(Into::into),
        }
    }
}

impl From<insighto_core::domain::SocialAccount> for ActiveModel {
    fn from(account: insighto_core::domain::SocialAccount) -> Self {
        Self {
            id: Set(account.id),
            user_id: Set(account.user_id),
            platform: Set(account.platform.into()),
            account_id: Set(account.account_id),
            username: Set(account.username),
            access_token: Set(account.access_token),
            refresh_token: Set(account.refresh_token),
            is_active: Set(account.is_active),
            connected_at: Set(account.connected_at.into()),
            last_sync_at: Set(account.last_sync_at.map(Into::into)),
        }
    }
}
