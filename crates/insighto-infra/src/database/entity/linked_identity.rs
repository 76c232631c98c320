//! Third-party sign-in identities ("accounts" in auth-adapter terms).

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "linked_identities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String,
    pub provider_account_id: String,
    pub created_at: DateTimeWithTimeZone,
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
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for insighto_core::domain::LinkedIdentity {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            provider: model.provider,
            provider_account_id: model.provider_account_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<insighto_core::domain::LinkedIdentity> for ActiveModel {
    fn from(identity: insighto_core::domain::LinkedIdentity) -> Self {
        Self {
            id: Set(identity.id),
            user_id: Set(identity.user_id),
            provider: Set(identity.provider),
            provider_account_id: Set(identity.provider_account_id),
            created_at: Set(identity.created_at.into()),
        }
    }
}
